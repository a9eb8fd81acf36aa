//! # Codemodel Codegen
//!
//! Java source generation from a [`CodeModel`].
//!
//! This crate provides:
//! - A two-pass formatter that collects referenced types, decides which
//!   ones can be imported, then prints the source
//! - Generators for types, expressions, statements, declarations,
//!   annotations and javadoc
//! - Output writers for directories, single streams and memory
//! - Whole-model builds that write classes, `package-info` files and
//!   resources
//!
//! # Example
//!
//! ```
//! use codemodel_core::{Mods, TypeId};
//! use codemodel_model::{ClassKind, CodeModel};
//!
//! let mut cm = CodeModel::new();
//! let class = cm.new_class("com.acme.Point", ClassKind::Class).unwrap();
//! cm.class_mut(class).field(Mods::PRIVATE, TypeId::INT, "x").unwrap();
//!
//! let source = codemodel_codegen::render_class(&cm, class).unwrap();
//! assert!(source.contains("    private int x;\n"));
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod formatter;
pub mod java;
pub mod writer;

pub use build::{BuildReport, build, build_split};
pub use config::{BuildConfig, FormatterConfig};
pub use error::{CodegenError, Result};
pub use formatter::{Formatter, Fragment};
pub use writer::{
    CodeWriter, FileCodeWriter, MemoryCodeWriter, PrologCodeWriter, SingleStreamCodeWriter,
};

use codemodel_core::ClassId;
use codemodel_model::CodeModel;
use std::path::Path;

/// Renders one top-level class as a complete compilation unit.
///
/// # Arguments
/// * `model` - The model owning the class
/// * `class` - A top-level class
///
/// # Returns
/// The source text, starting with the package line and imports.
///
/// # Errors
/// Returns `CodegenError` if the class cannot be rendered.
pub fn render_class(model: &CodeModel, class: ClassId) -> Result<String> {
    Formatter::new(model, &FormatterConfig::default()).render_class(class)
}

/// Writes the whole model below an existing directory with default options.
///
/// # Arguments
/// * `model` - The model to write
/// * `dir` - Root of the package tree
///
/// # Returns
/// The number of files written.
///
/// # Errors
/// Returns `CodegenError` if `dir` does not exist or a file cannot be
/// written.
pub fn build_to_directory(model: &CodeModel, dir: &Path) -> Result<BuildReport> {
    let mut writer = FileCodeWriter::new(dir)?;
    build(model, &mut writer, &BuildConfig::default())
}
