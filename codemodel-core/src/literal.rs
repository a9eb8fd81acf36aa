//! Literal tokens.
//!
//! String and char literals are quoted with a fixed escape table; floating
//! point values map the non-finite cases onto the boxed type's named
//! constants so the token is always valid source.

/// Characters with a named escape sequence.
const CHAR_ESCAPE: &str = "\u{8}\t\n\u{c}\r\"'\\";
/// Escape letters, parallel to [`CHAR_ESCAPE`].
const CHAR_MACRO: &str = "btnfr\"'\\";

/// Quotes `s` with `quote` (`"` or `'`), escaping as needed.
///
/// The quote character that is not in use is emitted verbatim. Characters
/// outside printable ASCII become `\uxxxx` escapes of their UTF-16 units.
#[must_use]
pub fn quotify(quote: char, s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        if let Some(j) = CHAR_ESCAPE.chars().position(|e| e == c) {
            if (quote == '"' && c == '\'') || (quote == '\'' && c == '"') {
                out.push(c);
            } else {
                out.push('\\');
                out.extend(CHAR_MACRO.chars().nth(j));
            }
        } else if (c as u32) < 0x20 || (c as u32) > 0x7E {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        } else {
            out.push(c);
        }
    }
    out.push(quote);
    out
}

/// Renders an `int` literal.
#[must_use]
pub fn int_token(n: i32) -> String {
    n.to_string()
}

/// Renders a `long` literal.
#[must_use]
pub fn long_token(n: i64) -> String {
    format!("{n}L")
}

/// Renders a `float` literal.
#[must_use]
pub fn float_token(f: f32) -> String {
    if f.is_nan() {
        "java.lang.Float.NaN".to_string()
    } else if f == f32::INFINITY {
        "java.lang.Float.POSITIVE_INFINITY".to_string()
    } else if f == f32::NEG_INFINITY {
        "java.lang.Float.NEGATIVE_INFINITY".to_string()
    } else {
        format!("{f:?}F")
    }
}

/// Renders a `double` literal.
#[must_use]
pub fn double_token(d: f64) -> String {
    if d.is_nan() {
        "java.lang.Double.NaN".to_string()
    } else if d == f64::INFINITY {
        "java.lang.Double.POSITIVE_INFINITY".to_string()
    } else if d == f64::NEG_INFINITY {
        "java.lang.Double.NEGATIVE_INFINITY".to_string()
    } else {
        format!("{d:?}D")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotify_escapes() {
        assert_eq!(quotify('"', "a\tb"), "\"a\\tb\"");
        assert_eq!(quotify('"', "say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quotify('"', "it's"), "\"it's\"");
        assert_eq!(quotify('\'', "'"), "'\\''");
        assert_eq!(quotify('\'', "\""), "'\"'");
        assert_eq!(quotify('"', "back\\slash"), "\"back\\\\slash\"");
    }

    #[test]
    fn test_quotify_unicode() {
        assert_eq!(quotify('"', "\u{1}"), "\"\\u0001\"");
        assert_eq!(quotify('"', "é"), "\"\\u00e9\"");
        assert_eq!(quotify('"', "\u{1F600}"), "\"\\ud83d\\ude00\"");
    }

    #[test]
    fn test_negative_zero_is_distinct() {
        assert_eq!(double_token(-0.0), "-0.0D");
        assert_eq!(double_token(0.0), "0.0D");
        assert_eq!(float_token(-0.0), "-0.0F");
        assert_ne!(float_token(-0.0), float_token(0.0));
    }

    #[test]
    fn test_non_finite_tokens() {
        assert_eq!(
            double_token(f64::INFINITY),
            "java.lang.Double.POSITIVE_INFINITY"
        );
        assert_eq!(
            double_token(f64::NEG_INFINITY),
            "java.lang.Double.NEGATIVE_INFINITY"
        );
        assert_eq!(float_token(f32::NAN), "java.lang.Float.NaN");
    }

    #[test]
    fn test_integral_tokens() {
        assert_eq!(int_token(-5), "-5");
        assert_eq!(long_token(42), "42L");
        assert_eq!(double_token(1.5), "1.5D");
    }
}
