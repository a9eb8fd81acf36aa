//! Model configuration.

use crate::catalog::TypeCatalog;

/// Configuration of a [`CodeModel`](crate::CodeModel).
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub(crate) case_sensitive: bool,
    pub(crate) catalog: TypeCatalog,
}

impl ModelConfig {
    /// Creates the default configuration.
    ///
    /// Class names are case sensitive except on targets whose file systems
    /// usually are not (Windows, macOS).
    #[must_use]
    pub fn new() -> Self {
        Self {
            case_sensitive: !cfg!(any(target_os = "windows", target_os = "macos")),
            catalog: TypeCatalog::jdk(),
        }
    }

    /// Sets whether two class names differing only in case may coexist.
    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Replaces the catalog of external types.
    #[must_use]
    pub fn catalog(mut self, catalog: TypeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Returns the catalog of external types.
    #[must_use]
    pub fn type_catalog(&self) -> &TypeCatalog {
        &self.catalog
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new()
    }
}
