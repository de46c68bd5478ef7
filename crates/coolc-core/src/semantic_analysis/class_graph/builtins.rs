// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Built-in class definitions for the class graph.
//!
//! **DDD Context:** Semantic Analysis
//!
//! The five basic classes are injected into every graph before any user
//! class, always in the order of [`BuiltinClass::ALL`], so `Object` is always
//! registration index 0. Their restrictions are properties of the enum rather
//! than ad hoc name comparisons. Every built-in name is reserved: user code
//! can never declare a class that maps to a [`BuiltinClass`].

use crate::ast::ClassDeclaration;

/// Name of the root class.
pub const ROOT_CLASS: &str = "Object";

/// One of the classes every program gets for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinClass {
    /// The root of the hierarchy.
    Object,
    /// Console input/output.
    Io,
    /// Immutable strings.
    String,
    /// Integers.
    Int,
    /// Booleans.
    Bool,
}

impl BuiltinClass {
    /// All built-ins, in registration order.
    pub const ALL: [BuiltinClass; 5] = [
        BuiltinClass::Object,
        BuiltinClass::Io,
        BuiltinClass::String,
        BuiltinClass::Int,
        BuiltinClass::Bool,
    ];

    /// Source-level class name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinClass::Object => ROOT_CLASS,
            BuiltinClass::Io => "IO",
            BuiltinClass::String => "String",
            BuiltinClass::Int => "Int",
            BuiltinClass::Bool => "Bool",
        }
    }

    /// Maps a class name back to the built-in it denotes.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    /// Whether the class cannot be inherited from. Sealed classes conform
    /// only to themselves and to the root.
    #[must_use]
    pub const fn is_sealed(self) -> bool {
        matches!(
            self,
            BuiltinClass::String | BuiltinClass::Int | BuiltinClass::Bool
        )
    }

    /// Whether the class may carry methods at all.
    #[must_use]
    pub const fn accepts_methods(self) -> bool {
        !matches!(self, BuiltinClass::Int | BuiltinClass::Bool)
    }

    /// Builds the declaration injected for this built-in.
    pub(super) fn declaration(self) -> ClassDeclaration {
        let class = ClassDeclaration::new(self.name());
        match self {
            BuiltinClass::Object => class
                .with_method("abort", &[], "Object")
                .with_method("type_name", &[], "String")
                .with_method("copy", &[], "Object"),
            BuiltinClass::Io => class
                .inheriting(ROOT_CLASS)
                .with_method("out_string", &[("x", "String")], "IO")
                .with_method("out_int", &[("x", "Int")], "IO")
                .with_method("in_string", &[], "String")
                .with_method("in_int", &[], "Int"),
            BuiltinClass::String => class
                .inheriting(ROOT_CLASS)
                .with_method("length", &[], "Int")
                .with_method("concat", &[("s", "String")], "String")
                .with_method("substr", &[("i", "Int"), ("l", "Int")], "String"),
            BuiltinClass::Int | BuiltinClass::Bool => class.inheriting(ROOT_CLASS),
        }
    }
}
