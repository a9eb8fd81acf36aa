//! # Codemodel Bench
//!
//! Benchmarking utilities for codemodel performance testing.

pub mod fixtures;
