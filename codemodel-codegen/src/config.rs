//! Formatter and build configuration.

/// Options of the Java source formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    pub(crate) indent: String,
    pub(crate) implicit_package: Option<String>,
}

impl FormatterConfig {
    /// Four-space indentation with `java.lang` imported implicitly.
    #[must_use]
    pub fn new() -> Self {
        Self {
            indent: "    ".to_string(),
            implicit_package: Some("java.lang".to_string()),
        }
    }

    /// Sets the text emitted once per indentation level.
    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets the package whose classes never need an import statement.
    ///
    /// `None` disables the implicit package entirely.
    #[must_use]
    pub fn implicit_package(mut self, package: Option<String>) -> Self {
        self.implicit_package = package;
        self
    }

    /// Text of one indentation level.
    #[must_use]
    pub fn indent_unit(&self) -> &str {
        &self.indent
    }

    /// Name of the implicitly imported package.
    #[must_use]
    pub fn implicit_package_name(&self) -> Option<&str> {
        self.implicit_package.as_deref()
    }
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for writing a whole model to a [`CodeWriter`](crate::writer::CodeWriter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub(crate) formatter: FormatterConfig,
    pub(crate) source_extension: String,
    pub(crate) escape_non_ascii: bool,
    pub(crate) prolog: Option<String>,
}

impl BuildConfig {
    /// Creates a configuration writing `.java` files with the default
    /// formatter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            formatter: FormatterConfig::default(),
            source_extension: "java".to_string(),
            escape_non_ascii: false,
            prolog: None,
        }
    }

    /// Replaces the formatter options.
    #[must_use]
    pub fn formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    /// Sets the extension of generated source files, without the dot.
    #[must_use]
    pub fn source_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = extension.into();
        self
    }

    /// Escapes every non-ASCII character of generated sources as `\uXXXX`.
    #[must_use]
    pub fn escape_non_ascii(mut self, escape: bool) -> Self {
        self.escape_non_ascii = escape;
        self
    }

    /// Sets a comment written at the top of every source file.
    #[must_use]
    pub fn prolog(mut self, prolog: impl Into<String>) -> Self {
        self.prolog = Some(prolog.into());
        self
    }

    /// Formatter options.
    #[must_use]
    pub fn formatter_config(&self) -> &FormatterConfig {
        &self.formatter
    }

    /// Extension of generated source files.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.source_extension
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_defaults() {
        let config = FormatterConfig::default();
        assert_eq!(config.indent_unit(), "    ");
        assert_eq!(config.implicit_package_name(), Some("java.lang"));
    }

    #[test]
    fn test_build_builders() {
        let config = BuildConfig::new()
            .source_extension("jav")
            .escape_non_ascii(true)
            .prolog("generated")
            .formatter(FormatterConfig::new().indent("\t").implicit_package(None));
        assert_eq!(config.extension(), "jav");
        assert!(config.escape_non_ascii);
        assert_eq!(config.prolog.as_deref(), Some("generated"));
        assert_eq!(config.formatter_config().indent_unit(), "\t");
        assert!(config.formatter_config().implicit_package_name().is_none());
    }
}
