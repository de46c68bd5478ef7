// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Object layout and dispatch tables.
//!
//! **DDD Context:** Code Generation
//!
//! Both tables are derived from the ancestor order of a frozen
//! [`ClassGraph`]: walk from `Object` down to the class and fold in each
//! class's own features.
//!
//! - **Attributes** are concatenated, ancestors first, each class keeping its
//!   own declaration order. An attribute's offset is its position in that list.
//! - **Methods** get one slot per distinct name. A slot is created where the
//!   name first appears in the ancestor chain; descendants that redefine the
//!   method replace the implementation but keep the slot. A subclass's table
//!   therefore always starts with its parent's slots, in the same order.

use crate::ast::{Formal, MethodDeclaration};
use crate::semantic_analysis::class_graph::{ClassGraph, ClassId, Node};
use crate::semantic_analysis::error::LookupError;
use ecow::EcoString;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, instrument};

/// One attribute in an object layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSlot {
    /// Attribute name.
    pub name: EcoString,
    /// Declared type.
    pub type_name: EcoString,
    /// Class that declares the attribute.
    pub defined_in: EcoString,
    /// Position in the object, counted in attributes from the start.
    pub offset: usize,
}

/// One entry of a dispatch table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSlot {
    /// Method name.
    pub name: EcoString,
    /// Class providing the most-derived implementation.
    pub defined_in: EcoString,
    /// Formal parameters of that implementation.
    pub formals: Vec<Formal>,
    /// Declared return type of that implementation.
    pub return_type: EcoString,
    /// Slot index, stable across all descendants of the introducing class.
    pub slot: usize,
}

/// Per-class mapping from method name to its most-derived implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchTable {
    slots: Vec<MethodSlot>,
    by_name: HashMap<EcoString, usize>,
}

impl DispatchTable {
    /// Slots in order.
    #[must_use]
    pub fn slots(&self) -> &[MethodSlot] {
        &self.slots
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Looks up the implementation bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MethodSlot> {
        self.by_name.get(name).map(|&slot| &self.slots[slot])
    }

    /// Binds `method` from `class`, overriding an inherited slot of the same name.
    fn define(&mut self, class: &EcoString, method: &MethodDeclaration) {
        let slot = *self
            .by_name
            .entry(method.name.clone())
            .or_insert(self.slots.len());
        let entry = MethodSlot {
            name: method.name.clone(),
            defined_in: class.clone(),
            formals: method.formals.clone(),
            return_type: method.return_type.clone(),
            slot,
        };
        if slot == self.slots.len() {
            self.slots.push(entry);
        } else {
            self.slots[slot] = entry;
        }
    }
}

/// Attribute layout and dispatch table of one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLayout {
    class: EcoString,
    attributes: Vec<AttributeSlot>,
    dispatch: DispatchTable,
}

impl ClassLayout {
    /// Computes the layout of `name` by walking its ancestors from the root.
    ///
    /// Fails if the class is unknown or its ancestor chain is broken.
    pub fn compute(graph: &ClassGraph, name: &str) -> Result<Self, LookupError> {
        let id = graph
            .class_id(name)
            .ok_or_else(|| LookupError::UnknownClass(name.into()))?;
        let mut layout = Self::empty();
        for ancestor in graph.root_path_id(id)? {
            layout.extend_with(graph.node(ancestor));
        }
        Ok(layout)
    }

    fn empty() -> Self {
        Self {
            class: EcoString::new(),
            attributes: Vec::new(),
            dispatch: DispatchTable::default(),
        }
    }

    /// Appends the features declared by `node` and makes it the described class.
    fn extend_with(&mut self, node: &Node) {
        self.class = node.name().clone();

        let declaration = node.declaration();
        for attribute in declaration.attributes() {
            let offset = self.attributes.len();
            self.attributes.push(AttributeSlot {
                name: attribute.name.clone(),
                type_name: attribute.type_name.clone(),
                defined_in: self.class.clone(),
                offset,
            });
        }
        for method in declaration.methods() {
            self.dispatch.define(&self.class, method);
        }
    }

    /// Class this layout describes.
    #[must_use]
    pub fn class(&self) -> &EcoString {
        &self.class
    }

    /// Attributes, inherited ones first.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeSlot] {
        &self.attributes
    }

    /// Offset of the last attribute called `name` (the most-derived one).
    #[must_use]
    pub fn attribute_offset(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .rev()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.offset)
    }

    /// Dispatch table.
    #[must_use]
    pub fn dispatch(&self) -> &DispatchTable {
        &self.dispatch
    }
}

/// Layouts for every class reachable from the root.
#[derive(Debug, Clone, Default)]
pub struct LayoutTable {
    layouts: HashMap<ClassId, ClassLayout>,
    order: Vec<ClassId>,
}

impl LayoutTable {
    /// Builds layouts breadth-first from the root along child links, so each
    /// class extends its parent's finished layout.
    ///
    /// Classes that are not reachable from the root (cycles, unresolved
    /// parents) get no layout.
    #[instrument(skip_all, fields(classes = graph.len()))]
    #[must_use]
    pub fn build(graph: &ClassGraph) -> Self {
        let mut table = Self::default();
        let mut queue = VecDeque::from([ClassId::ROOT]);

        while let Some(id) = queue.pop_front() {
            let node = graph.node(id);
            let mut layout = node
                .parent()
                .and_then(|parent| table.layouts.get(&parent))
                .map_or_else(ClassLayout::empty, Clone::clone);
            layout.extend_with(node);
            table.layouts.insert(id, layout);
            table.order.push(id);
            queue.extend(node.children().iter().copied());
        }

        let skipped = graph.len() - table.order.len();
        if skipped > 0 {
            debug!(skipped, "classes without a rooted ancestor chain have no layout");
        }
        table
    }

    /// Layout by registration index.
    #[must_use]
    pub fn get_id(&self, id: ClassId) -> Option<&ClassLayout> {
        self.layouts.get(&id)
    }

    /// Layout by class name.
    #[must_use]
    pub fn get(&self, graph: &ClassGraph, name: &str) -> Option<&ClassLayout> {
        graph.class_id(name).and_then(|id| self.get_id(id))
    }

    /// Layouts in breadth-first order from the root.
    pub fn iter(&self) -> impl Iterator<Item = &ClassLayout> {
        self.order.iter().filter_map(|id| self.layouts.get(id))
    }

    /// Number of classes with a layout.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no layouts were built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
