//! # Codemodel Core
//!
//! Foundation types shared by the code model and the formatter.
//!
//! This crate provides:
//! - Arena handles used to address every node of a model
//! - The error taxonomy raised while building a model
//! - Modifier sets and their per-declaration legality rules
//! - Identifier validation and English pluralization helpers
//! - Literal quoting and floating point token rendering

pub mod error;
pub mod ids;
pub mod literal;
pub mod mods;
pub mod names;

pub use error::{Error, Result};
pub use ids::{
    AnnotationId, BlockId, CatchId, ClassId, ForId, IfId, MethodId, PackageId, SwitchId, TryId,
    TypeId, VarId,
};
pub use mods::{ModKind, Mods};
