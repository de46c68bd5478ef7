// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Class graph error types.
//!
//! Validation problems are [`ClassGraphError`] values: they are collected,
//! never thrown, and convert into [`Diagnostic`]s for rendering. Query
//! failures on a frozen graph are [`LookupError`]s returned through `Result`.

use crate::source_analysis::{Diagnostic, Span};
use ecow::EcoString;
use miette::LabeledSpan;
use std::fmt::Display;
use thiserror::Error;

/// A problem found while building or validating the class graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ClassGraphError {
    /// What went wrong.
    pub kind: ClassGraphErrorKind,
    /// Location of the offending class declaration.
    pub span: Span,
}

// Written by hand so the code and help vary with `kind`.
impl miette::Diagnostic for ClassGraphError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.kind
            .hint()
            .map(|hint| Box::new(hint) as Box<dyn Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.span.is_empty() {
            return None;
        }
        let label = LabeledSpan::new_with_span(Some("here".to_string()), self.span);
        Some(Box::new(std::iter::once(label)))
    }
}

impl ClassGraphError {
    /// Creates a new class graph error.
    #[must_use]
    pub fn new(kind: ClassGraphErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Renders this error as a compiler diagnostic.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic =
            Diagnostic::error(self.kind.to_string(), self.span).with_code(self.kind.code());
        match self.kind.hint() {
            Some(hint) => diagnostic.with_hint(hint),
            None => diagnostic,
        }
    }
}

impl From<&ClassGraphError> for Diagnostic {
    fn from(error: &ClassGraphError) -> Self {
        error.to_diagnostic()
    }
}

/// The kind of class graph error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassGraphErrorKind {
    /// A class name was registered twice.
    #[error("class '{name}' has been redefined")]
    DuplicateClass { name: EcoString },

    /// A user class tried to redeclare a protected built-in.
    #[error("Cannot redefine base class '{name}'")]
    RestrictedClassRedefinition { name: EcoString },

    /// A class named a sealed built-in as its parent.
    #[error("Cannot inherit base class '{parent}'")]
    RestrictedInheritance { class: EcoString, parent: EcoString },

    /// A class named a parent that was never declared.
    #[error("Inherited class '{parent}' for '{class}' has not been declared")]
    UndeclaredParent { class: EcoString, parent: EcoString },

    /// Parent links form a loop. `path` lists each class in the cycle once,
    /// following parent links from the first entry.
    #[error("Classes have cyclic dependency: {}", render_cycle(.path))]
    CyclicInheritance { path: Vec<EcoString> },

    /// No class carries the designated entry-class name.
    #[error("'{name}' class is missing.")]
    MissingMainClass { name: EcoString },
}

impl ClassGraphErrorKind {
    /// Stable diagnostic code for this kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateClass { .. } => "coolc::class_graph::duplicate_class",
            Self::RestrictedClassRedefinition { .. } => {
                "coolc::class_graph::restricted_class_redefinition"
            }
            Self::RestrictedInheritance { .. } => "coolc::class_graph::restricted_inheritance",
            Self::UndeclaredParent { .. } => "coolc::class_graph::undeclared_parent",
            Self::CyclicInheritance { .. } => "coolc::class_graph::cyclic_inheritance",
            Self::MissingMainClass { .. } => "coolc::class_graph::missing_main_class",
        }
    }

    fn hint(&self) -> Option<String> {
        match self {
            Self::RestrictedInheritance { .. } => {
                Some("Int, String and Bool are sealed; inherit from Object or IO instead".into())
            }
            Self::MissingMainClass { name } => {
                Some(format!("declare a class named '{name}' as the program entry point"))
            }
            _ => None,
        }
    }
}

/// Formats a cycle as `A -> B -> A`.
fn render_cycle(path: &[EcoString]) -> String {
    let mut rendered = path.join(" -> ");
    if let Some(first) = path.first() {
        rendered.push_str(" -> ");
        rendered.push_str(first);
    }
    rendered
}

/// A failed query against a frozen class graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The name is not registered in the graph.
    #[error("class '{0}' is not defined")]
    UnknownClass(EcoString),

    /// The ancestor walks of the two classes never meet.
    #[error("classes '{left}' and '{right}' share no common ancestor")]
    NoCommonAncestor { left: EcoString, right: EcoString },

    /// Following parent links from the class does not reach the root.
    #[error("ancestor chain of '{class}' does not reach the root class")]
    BrokenChain { class: EcoString },
}
