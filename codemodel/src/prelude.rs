//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types.
//!
//! ```
//! use codemodel::prelude::*;
//! ```

// Handles, errors and modifiers
pub use codemodel_core::{
    BlockId, ClassId, Error as ModelError, MethodId, Mods, PackageId, Result as ModelResult,
    TypeId, VarId,
};

// Model
pub use codemodel_model::{
    Annotatable, ClassKind, CodeModel, Expr, Invocation, Literal, ModelConfig, NewArray,
    ResourceFile, op,
};

// Rendering and output
pub use codemodel_codegen::{
    BuildConfig, BuildReport, CodeWriter, CodegenError, FileCodeWriter, Formatter,
    FormatterConfig, Fragment, MemoryCodeWriter, PrologCodeWriter, SingleStreamCodeWriter,
    build, render_class,
};
