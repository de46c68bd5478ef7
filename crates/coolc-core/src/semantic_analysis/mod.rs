// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Semantic analysis.
//!
//! This module builds and validates the inheritance graph of a program:
//! - Built-in class injection (`Object`, `IO`, `String`, `Int`, `Bool`)
//! - Duplicate and restricted class detection
//! - Parent resolution and inheritance restrictions
//! - Cycle detection and entry-class checking
//!
//! The frozen graph then answers the type-reasoning queries used by later
//! phases: conformance, joins, ancestor paths and child navigation.

use crate::ast::ClassDeclaration;

pub mod class_graph;
pub mod error;

pub use class_graph::{
    Analysis, BuiltinClass, Building, ClassGraph, ClassId, Frozen, GraphConfig, Node,
};
pub use error::{ClassGraphError, ClassGraphErrorKind, LookupError};

/// Builds the class graph for a program and validates it.
///
/// Shorthand for [`ClassGraph::build`].
#[must_use]
pub fn analyse(
    declarations: impl IntoIterator<Item = ClassDeclaration>,
    config: GraphConfig,
) -> Analysis {
    ClassGraph::build(declarations, config)
}
