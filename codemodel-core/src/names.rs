//! Identifier validation and naming helpers for the target language.

/// Reserved words of the target language, including the literal keywords.
const RESERVED_WORDS: [&str; 53] = [
    "abstract",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "extends",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "try",
    "void",
    "volatile",
    "while",
    "true",
    "false",
    "null",
    "assert",
    "enum",
];

/// Returns true if `word` is a reserved word.
#[must_use]
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// Returns true if `c` may start an identifier.
#[must_use]
pub fn is_identifier_start(c: char) -> bool {
    unicode_ident::is_xid_start(c) || c == '_' || c == '$'
}

/// Returns true if `c` may appear after the first character of an identifier.
#[must_use]
pub fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || unicode_ident::is_xid_continue(c)
}

/// Returns true if `s` is a legal, non-reserved identifier.
#[must_use]
pub fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if is_reserved_word(s) || !is_identifier_start(first) {
        return false;
    }
    chars.all(is_identifier_part)
}

/// Returns true if every dot-separated segment of `s` is an identifier.
///
/// The empty string denotes the unnamed package and is accepted.
#[must_use]
pub fn is_java_package_name(s: &str) -> bool {
    s.is_empty() || s.split('.').all(is_java_identifier)
}

/// Returns true if `s` is a syntactically valid fully qualified class name.
#[must_use]
pub fn is_fully_qualified_class_name(s: &str) -> bool {
    !s.is_empty() && is_java_package_name(s)
}

/// One row of the pluralization table: `prefix + suffix` becomes
/// `prefix + replacement` when the prefix has at least `min_prefix` chars.
struct PluralRule {
    min_prefix: usize,
    suffix: &'static str,
    replacement: &'static str,
}

const fn rule(min_prefix: usize, suffix: &'static str, replacement: &'static str) -> PluralRule {
    PluralRule {
        min_prefix,
        suffix,
        replacement,
    }
}

const PLURAL_RULES: [PluralRule; 24] = [
    rule(0, "child", "children"),
    rule(1, "fe", "ves"),
    rule(0, "mouse", "mice"),
    rule(1, "f", "ves"),
    rule(1, "ch", "ches"),
    rule(1, "sh", "shes"),
    rule(0, "tooth", "teeth"),
    rule(1, "um", "a"),
    rule(1, "an", "en"),
    rule(1, "ato", "atoes"),
    rule(0, "basis", "bases"),
    rule(0, "axis", "axes"),
    rule(1, "is", "ises"),
    rule(1, "ss", "sses"),
    rule(1, "us", "uses"),
    rule(1, "s", "s"),
    rule(0, "foot", "feet"),
    rule(1, "ix", "ixes"),
    rule(1, "ex", "ices"),
    rule(1, "nx", "nxes"),
    rule(1, "x", "xes"),
    rule(1, "y", "ies"),
    rule(1, "", "s"),
    rule(0, "", ""),
];

impl PluralRule {
    fn apply(&self, word: &str) -> Option<String> {
        let split = word.len().checked_sub(self.suffix.len())?;
        if split < self.min_prefix || !word.is_char_boundary(split) {
            return None;
        }
        let (prefix, tail) = word.split_at(split);
        if !tail.eq_ignore_ascii_case(self.suffix) {
            return None;
        }
        Some(format!("{prefix}{}", self.replacement))
    }
}

/// Computes the English plural of `word` with a small suffix table.
///
/// Words with non-ASCII characters are returned unchanged; all-uppercase
/// words stay uppercase.
#[must_use]
pub fn plural_form(word: &str) -> String {
    if !word.is_ascii() {
        return word.to_string();
    }
    let all_upper = !word.chars().any(|c| c.is_ascii_lowercase());

    for rule in &PLURAL_RULES {
        if let Some(plural) = rule.apply(word) {
            return if all_upper {
                plural.to_ascii_uppercase()
            } else {
                plural
            };
        }
    }
    word.to_string()
}
