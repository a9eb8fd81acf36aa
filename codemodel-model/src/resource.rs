//! Resource files attached to packages.

use indexmap::IndexMap;

/// A non-source file written next to the generated sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceFile {
    /// Raw bytes.
    Binary {
        /// File name.
        name: String,
        /// File contents.
        data: Vec<u8>,
    },
    /// UTF-8 text.
    Text {
        /// File name.
        name: String,
        /// File contents.
        contents: String,
    },
    /// A `key=value` properties file.
    Property {
        /// File name.
        name: String,
        /// Entries in insertion order.
        entries: IndexMap<String, String>,
    },
}

impl ResourceFile {
    /// Binary resource.
    #[must_use]
    pub fn binary(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Binary {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Text resource.
    #[must_use]
    pub fn text(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Empty properties resource.
    #[must_use]
    pub fn property(name: impl Into<String>) -> Self {
        Self::Property {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    /// Adds or replaces a property entry; no-op for other kinds.
    #[must_use]
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Property { entries, .. } = &mut self {
            entries.insert(key.into(), value.into());
        }
        self
    }

    /// File name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Binary { name, .. } | Self::Text { name, .. } | Self::Property { name, .. } => {
                name
            }
        }
    }

    /// Bytes to write.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        match self {
            Self::Binary { data, .. } => data.clone(),
            Self::Text { contents, .. } => contents.as_bytes().to_vec(),
            Self::Property { entries, .. } => {
                let mut out = String::new();
                for (key, value) in entries {
                    out.push_str(&escape_property(key, true));
                    out.push('=');
                    out.push_str(&escape_property(value, false));
                    out.push('\n');
                }
                out.into_bytes()
            }
        }
    }
}

/// Escapes a property key or value in the `.properties` syntax.
fn escape_property(s: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || (c as u32) > 0x7E => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_rendering() {
        let file = ResourceFile::property("app.properties")
            .entry("greeting", "hello world")
            .entry("path", "a=b:c");
        let text = String::from_utf8(file.contents()).expect("utf8");
        assert_eq!(text, "greeting=hello world\npath=a\\=b\\:c\n");
    }

    #[test]
    fn test_property_escapes_keys_and_unicode() {
        let file = ResourceFile::property("x.properties").entry("a key", " é");
        let text = String::from_utf8(file.contents()).expect("utf8");
        assert_eq!(text, "a\\ key=\\ \\u00E9\n");
    }

    #[test]
    fn test_names_and_contents() {
        let bin = ResourceFile::binary("logo.png", vec![0u8, 1, 2]);
        assert_eq!(bin.name(), "logo.png");
        assert_eq!(bin.contents(), vec![0, 1, 2]);
        let text = ResourceFile::text("README", "hi");
        assert_eq!(text.contents(), b"hi".to_vec());
    }
}
