// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Class declarations as produced by the parser.
//!
//! These records are the input to the class graph. The parser owns them; the
//! graph keeps its own copy of each declaration and never edits feature lists.
//! Every node carries a [`Span`] for error reporting.
//!
//! Declarations derive `serde` traits so that parser output can be handed
//! across process boundaries (the `coolc` CLI reads it as JSON).
//!
//! # Example
//!
//! ```
//! use coolc_core::ast::{ClassDeclaration, Feature};
//!
//! let point = ClassDeclaration::new("Point")
//!     .with_attribute("x", "Int")
//!     .with_attribute("y", "Int")
//!     .with_method("norm", &[], "Int");
//! let derived = ClassDeclaration::new("Point3").inheriting("Point");
//!
//! assert_eq!(point.attributes().count(), 2);
//! assert_eq!(derived.parent_name(), Some("Point"));
//! assert!(matches!(point.features[2], Feature::Method(_)));
//! ```

use crate::source_analysis::Span;
use ecow::EcoString;
use serde::{Deserialize, Serialize};

/// A name together with where it was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// The identifier text.
    pub name: EcoString,
    /// Source location.
    #[serde(default)]
    pub span: Span,
}

impl Identifier {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A named, typed parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formal {
    /// Parameter name.
    pub name: EcoString,
    /// Declared parameter type.
    pub type_name: EcoString,
    #[serde(default)]
    pub span: Span,
}

impl Formal {
    /// Creates a formal parameter without source location.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, type_name: impl Into<EcoString>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            span: Span::default(),
        }
    }
}

/// A method member of a class.
///
/// Method bodies are not needed by the hierarchy engine and are not modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    /// Method name.
    pub name: EcoString,
    /// Formal parameters, in declaration order.
    #[serde(default)]
    pub formals: Vec<Formal>,
    /// Declared return type (may be `SELF_TYPE`).
    pub return_type: EcoString,
    #[serde(default)]
    pub span: Span,
}

/// An attribute member of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDeclaration {
    /// Attribute name.
    pub name: EcoString,
    /// Declared attribute type.
    pub type_name: EcoString,
    #[serde(default)]
    pub span: Span,
}

/// A member declared within a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feature {
    /// `name(formals) : Type { ... }`
    Method(MethodDeclaration),
    /// `name : Type [<- init]`
    Attribute(AttributeDeclaration),
}

impl Feature {
    /// Returns the member name.
    #[must_use]
    pub fn name(&self) -> &EcoString {
        match self {
            Feature::Method(method) => &method.name,
            Feature::Attribute(attribute) => &attribute.name,
        }
    }
}

/// A parsed `class Name [inherits Parent] { features }` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    /// Class name.
    pub name: Identifier,
    /// Explicit parent, if an `inherits` clause was written.
    #[serde(default)]
    pub parent: Option<Identifier>,
    /// Members in declaration order.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Source location of the whole declaration.
    #[serde(default)]
    pub span: Span,
}

impl ClassDeclaration {
    /// Creates an empty declaration with no parent and no source location.
    #[must_use]
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self {
            name: Identifier::new(name, Span::default()),
            parent: None,
            features: Vec::new(),
            span: Span::default(),
        }
    }

    /// Sets the `inherits` clause.
    #[must_use]
    pub fn inheriting(mut self, parent: impl Into<EcoString>) -> Self {
        self.parent = Some(Identifier::new(parent, self.span));
        self
    }

    /// Sets the source location of the declaration.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self.name.span = span;
        if let Some(parent) = &mut self.parent {
            parent.span = span;
        }
        self
    }

    /// Appends an attribute feature.
    #[must_use]
    pub fn with_attribute(
        mut self,
        name: impl Into<EcoString>,
        type_name: impl Into<EcoString>,
    ) -> Self {
        self.features.push(Feature::Attribute(AttributeDeclaration {
            name: name.into(),
            type_name: type_name.into(),
            span: self.span,
        }));
        self
    }

    /// Appends a method feature. `formals` are `(name, type)` pairs.
    #[must_use]
    pub fn with_method(
        mut self,
        name: impl Into<EcoString>,
        formals: &[(&str, &str)],
        return_type: impl Into<EcoString>,
    ) -> Self {
        self.features.push(Feature::Method(MethodDeclaration {
            name: name.into(),
            formals: formals
                .iter()
                .map(|(formal, type_name)| Formal::new(*formal, *type_name))
                .collect(),
            return_type: return_type.into(),
            span: self.span,
        }));
        self
    }

    /// Returns the parent class name, if one was written.
    #[must_use]
    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_ref().map(|parent| parent.name.as_str())
    }

    /// Iterates over the attribute features in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDeclaration> {
        self.features.iter().filter_map(|feature| match feature {
            Feature::Attribute(attribute) => Some(attribute),
            Feature::Method(_) => None,
        })
    }

    /// Iterates over the method features in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDeclaration> {
        self.features.iter().filter_map(|feature| match feature {
            Feature::Method(method) => Some(method),
            Feature::Attribute(_) => None,
        })
    }
}
