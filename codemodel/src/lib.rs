//! # Codemodel
//!
//! An in-memory model of Java source and a formatter that renders it with
//! resolved imports.
//!
//! Codemodel builds classes, members, statements and expressions as a graph
//! of typed handles, then prints every top-level class as a complete
//! compilation unit.
//!
//! ## Features
//!
//! - **Interned type references** - Handle equality is type equality
//! - **Declaration builders** - Classes, enums, interfaces, annotations,
//!   fields, methods, constructors and initializers
//! - **Statement and expression trees** - With constant folding of
//!   boolean conditions
//! - **Import resolution** - Short names are used unless they collide
//! - **Pluggable output** - Directory trees, single streams or memory
//!
//! ## Quick Start
//!
//! ```
//! use codemodel::prelude::*;
//!
//! let mut cm = CodeModel::new();
//! let class = cm.new_class("com.acme.Greeter", ClassKind::Class).unwrap();
//! let hello = cm
//!     .class_mut(class)
//!     .method(Mods::PUBLIC, TypeId::VOID, "hello")
//!     .unwrap();
//! let body = cm.method_mut(hello).body();
//! let out = cm.ref_name("java.lang.System");
//! cm.block_mut(body).invoke(
//!     Invocation::method(Expr::static_field(out, "out"), "println").arg("hello"),
//! );
//!
//! let source = render_class(&cm, class).unwrap();
//! assert!(source.contains("System.out.println(\"hello\");"));
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Handles, errors, modifiers and naming helpers
//! - [`model`] - The code model and its builders
//! - [`codegen`] - Formatter, output writers and builds

pub mod prelude;

/// Handles, errors, modifiers and naming helpers.
pub mod core {
    pub use codemodel_core::*;
}

/// The code model and its builders.
pub mod model {
    pub use codemodel_model::*;
}

/// Source formatting and output.
pub mod codegen {
    pub use codemodel_codegen::*;
}

// Re-export commonly used items at the crate root
pub use codemodel_codegen::{BuildConfig, CodeWriter, FormatterConfig, build, render_class};
pub use codemodel_core::{ClassId, Error, Mods, Result, TypeId};
pub use codemodel_model::{ClassKind, CodeModel};
