//! Error types for source generation.

use thiserror::Error;

/// Error type for rendering and building.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The model rejected an operation.
    #[error("model error: {0}")]
    Model(#[from] codemodel_core::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}

/// Result type for source generation.
pub type Result<T> = std::result::Result<T, CodegenError>;
