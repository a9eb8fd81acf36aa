//! Java generators for the model nodes.
//!
//! Each submodule extends [`Formatter`](crate::formatter::Formatter) with the
//! generators of one node family. Every generator runs in both passes; the
//! formatter's mode decides whether it records references or writes text.

mod annotations;
mod declarations;
mod exprs;
mod javadoc;
mod statements;
mod types;

pub use javadoc::escape_comment;
