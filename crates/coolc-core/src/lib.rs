// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Class hierarchy engine for the Cool compiler.
//!
//! This crate contains the compile-time view of a program's classes:
//! - Class declarations (names, parents, attributes, methods)
//! - Inheritance graph construction and validation
//! - Type-reasoning queries (conformance, least common ancestor)
//! - Object layouts and dispatch tables for code generation
//!
//! Validation collects every problem instead of stopping at the first one,
//! so a single run reports all of a program's hierarchy errors.

pub mod ast;
pub mod codegen;
pub mod semantic_analysis;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{ClassDeclaration, Feature, Identifier};
    pub use crate::codegen::layout::{ClassLayout, LayoutTable};
    pub use crate::semantic_analysis::{
        Analysis, ClassGraph, ClassGraphError, GraphConfig, LookupError,
    };
    pub use crate::source_analysis::{Diagnostic, Severity, Span};
}
