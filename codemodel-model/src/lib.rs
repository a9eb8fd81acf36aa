//! # Codemodel Model
//!
//! In-memory model of Java source: types, packages, classes, members,
//! statements and expressions.
//!
//! This crate provides:
//! - The [`CodeModel`] registry that owns every node in arenas
//! - Interned type references with handle equality
//! - A catalog of well-known JDK classes and a type-name parser
//! - Mutable views (`ClassMut`, `MethodMut`, `BlockMut`, ...) for building
//!   declarations and statements
//! - Annotations, javadoc comments and resource files
//!
//! # Example
//!
//! ```
//! use codemodel_model::{ClassKind, CodeModel};
//! use codemodel_core::{Mods, TypeId};
//!
//! let mut cm = CodeModel::new();
//! let class = cm.new_class("com.acme.Point", ClassKind::Class).unwrap();
//! cm.class_mut(class).field(Mods::PRIVATE, TypeId::INT, "x").unwrap();
//! assert_eq!(cm.class(class).fields().len(), 1);
//! ```

pub mod annotation;
pub mod block;
pub mod catalog;
pub mod class;
pub mod config;
pub mod expr;
pub mod javadoc;
pub mod method;
pub mod package;
pub mod parser;
pub mod registry;
pub mod resource;
pub mod typed;
pub mod types;
pub mod var;

pub use annotation::{Annotatable, AnnotationArrayMut, AnnotationMut, AnnotationUse, AnnotationValue};
pub use block::{
    Block, BlockMut, Case, CatchBlock, Conditional, ConditionalMut, Content, DEFAULT_CATCH_PARAM,
    ForInit, ForLoop, ForMut, Statement, Switch, SwitchMut, TryBlock, TryMut,
};
pub use catalog::{ClassInfo, ExternalType, TypeCatalog};
pub use class::{ClassMut, Container, DefinedClass, EnumConstant, EnumConstantMut};
pub use config::ModelConfig;
pub use expr::{
    BinaryOp, Callee, Expr, Invocation, Literal, NewArray, PostfixOp, Target, UnaryOp, op,
};
pub use javadoc::{CommentPart, CommentText, DocComment};
pub use method::{Method, MethodMut};
pub use package::{Package, PackageMut};
pub use registry::CodeModel;
pub use resource::ResourceFile;
pub use typed::{AnnotationSchema, MemberKind, TypedAnnotation};
pub use types::{ClassKind, PrimitiveKind, ReferencedClass, TypeKind, TypeVarData};
pub use var::{Var, VarMut};
