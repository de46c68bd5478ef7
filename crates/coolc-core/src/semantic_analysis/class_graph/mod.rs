// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Inheritance graph for compile-time type reasoning.
//!
//! **DDD Context:** Semantic Analysis
//!
//! One engine serves every phase that needs the class hierarchy:
//! - **Type checking**: conformance ([`ClassGraph::conforms`]) and least
//!   common ancestors ([`ClassGraph::join`])
//! - **Codegen**: ancestor-ordered traversal ([`ClassGraph::root_path`]) and
//!   child navigation for attribute layout and dispatch tables
//!
//! The graph is staged. A [`ClassGraph<Building>`] accepts registrations;
//! [`ClassGraph::analyze`] links parents, detects cycles, checks for the entry
//! class and hands back a read-only [`ClassGraph<Frozen>`] inside an
//! [`Analysis`]. Validation never stops early: every problem becomes a
//! [`ClassGraphError`] and the frozen graph stays queryable.
//!
//! ```
//! use coolc_core::ast::ClassDeclaration;
//! use coolc_core::semantic_analysis::class_graph::ClassGraph;
//!
//! let mut graph = ClassGraph::new();
//! graph.add_class(ClassDeclaration::new("Main").inheriting("IO"));
//! let analysis = graph.analyze();
//! assert!(!analysis.has_errors());
//!
//! let graph = analysis.into_graph();
//! assert_eq!(graph.conforms("Main", "IO"), Ok(true));
//! assert_eq!(graph.join("Main", "String").unwrap(), "Object");
//! ```

use crate::ast::ClassDeclaration;
use crate::source_analysis::{Diagnostic, Span};
use ecow::EcoString;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use tracing::{debug, instrument, warn};

use super::error::{ClassGraphError, ClassGraphErrorKind, LookupError};

mod builtins;
mod cycles;

pub use builtins::{BuiltinClass, ROOT_CLASS};

/// Default name of the program entry class.
pub const DEFAULT_ENTRY_CLASS: &str = "Main";

/// Registration index of a class. Assigned once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    /// The root class is always registered first.
    pub const ROOT: ClassId = ClassId(0);

    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of the class in registration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One class in the graph.
///
/// Equality and hashing look only at the registration index, never at the
/// wrapped declaration.
#[derive(Debug, Clone)]
pub struct Node {
    id: ClassId,
    declaration: ClassDeclaration,
    builtin: Option<BuiltinClass>,
    parent: Option<ClassId>,
    children: Vec<ClassId>,
}

impl Node {
    fn new(id: ClassId, declaration: ClassDeclaration, builtin: Option<BuiltinClass>) -> Self {
        Self {
            id,
            declaration,
            builtin,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Registration index.
    #[must_use]
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Class name.
    #[must_use]
    pub fn name(&self) -> &EcoString {
        &self.declaration.name.name
    }

    /// The declaration this node wraps.
    #[must_use]
    pub fn declaration(&self) -> &ClassDeclaration {
        &self.declaration
    }

    /// Which built-in this is, if any.
    #[must_use]
    pub fn builtin(&self) -> Option<BuiltinClass> {
        self.builtin
    }

    /// Resolved parent. `None` for the root and for classes whose parent
    /// could not be resolved.
    #[must_use]
    pub fn parent(&self) -> Option<ClassId> {
        self.parent
    }

    /// Direct subclasses, in registration order.
    #[must_use]
    pub fn children(&self) -> &[ClassId] {
        &self.children
    }

    /// Whether this is the root class.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.id == ClassId::ROOT
    }

    /// Whether this class can never be inherited from.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.builtin.is_some_and(BuiltinClass::is_sealed)
    }

    /// Source location of the declaration.
    #[must_use]
    pub fn span(&self) -> Span {
        self.declaration.span
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Graph construction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// Name of the class that serves as program entry point.
    pub entry_class: EcoString,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            entry_class: DEFAULT_ENTRY_CLASS.into(),
        }
    }
}

/// Mode marker: the graph accepts registrations and has not been validated.
#[derive(Debug, Clone, Copy)]
pub struct Building;

/// Mode marker: the graph is linked, validated and read-only.
#[derive(Debug, Clone, Copy)]
pub struct Frozen;

/// The inheritance graph. See the [module documentation](self).
#[derive(Debug, Clone)]
pub struct ClassGraph<M = Frozen> {
    config: GraphConfig,
    nodes: Vec<Node>,
    index: HashMap<EcoString, ClassId>,
    has_entry_class: bool,
    /// Per node: whether following parent links reaches the root.
    /// Empty until the graph is frozen.
    rooted: Vec<bool>,
    errors: Vec<ClassGraphError>,
    mode: PhantomData<M>,
}

/// Outcome of [`ClassGraph::analyze`].
#[derive(Debug, Clone)]
pub struct Analysis {
    graph: ClassGraph<Frozen>,
    errors: Vec<ClassGraphError>,
}

impl Analysis {
    /// Whether any error was recorded while building or validating.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Recorded errors, in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[ClassGraphError] {
        &self.errors
    }

    /// Recorded errors rendered as compiler diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(Diagnostic::from).collect()
    }

    /// The frozen graph.
    #[must_use]
    pub fn graph(&self) -> &ClassGraph<Frozen> {
        &self.graph
    }

    /// Consumes the analysis, keeping the frozen graph.
    #[must_use]
    pub fn into_graph(self) -> ClassGraph<Frozen> {
        self.graph
    }

    /// Splits the analysis into graph and errors.
    #[must_use]
    pub fn into_parts(self) -> (ClassGraph<Frozen>, Vec<ClassGraphError>) {
        (self.graph, self.errors)
    }
}

impl ClassGraph<Building> {
    /// Creates a graph containing only the built-in classes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Creates a graph containing only the built-in classes, with custom settings.
    #[must_use]
    pub fn with_config(config: GraphConfig) -> Self {
        let mut graph = Self {
            config,
            nodes: Vec::new(),
            index: HashMap::new(),
            has_entry_class: false,
            rooted: Vec::new(),
            errors: Vec::new(),
            mode: PhantomData,
        };
        for builtin in BuiltinClass::ALL {
            graph.insert(builtin.declaration(), Some(builtin));
        }
        graph
    }

    /// Registers every declaration, validates, and freezes the graph.
    #[must_use]
    pub fn build(
        declarations: impl IntoIterator<Item = ClassDeclaration>,
        config: GraphConfig,
    ) -> Analysis {
        let mut graph = Self::with_config(config);
        graph.add_classes(declarations);
        graph.analyze()
    }

    /// Registers a user class at the next free index.
    ///
    /// Returns `None` and records an error if the name is reserved for a
    /// built-in or already taken.
    pub fn add_class(&mut self, declaration: ClassDeclaration) -> Option<ClassId> {
        let name = declaration.name.name.clone();
        let kind = if BuiltinClass::from_name(&name).is_some() {
            ClassGraphErrorKind::RestrictedClassRedefinition { name }
        } else if self.index.contains_key(&name) {
            ClassGraphErrorKind::DuplicateClass { name }
        } else {
            if name == self.config.entry_class {
                self.has_entry_class = true;
            }
            return Some(self.insert(declaration, None));
        };
        self.record(kind, declaration.span);
        None
    }

    /// Registers each declaration in order.
    pub fn add_classes(&mut self, declarations: impl IntoIterator<Item = ClassDeclaration>) {
        for declaration in declarations {
            self.add_class(declaration);
        }
    }

    /// Links parents, detects cycles and checks for the entry class, then
    /// freezes the graph. Never fails: every problem is recorded in the
    /// returned [`Analysis`].
    #[instrument(skip_all, fields(classes = self.nodes.len()))]
    pub fn analyze(mut self) -> Analysis {
        self.link_parents();
        self.report_cycles();
        if !self.has_entry_class {
            self.record(
                ClassGraphErrorKind::MissingMainClass {
                    name: self.config.entry_class.clone(),
                },
                Span::default(),
            );
        }
        debug!(errors = self.errors.len(), "class graph analysed");
        self.freeze()
    }

    fn insert(&mut self, declaration: ClassDeclaration, builtin: Option<BuiltinClass>) -> ClassId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "programs with over u32::MAX classes are not supported"
        )]
        let index = self.nodes.len() as u32;
        let id = ClassId::new(index);
        debug!(class = %declaration.name.name, index, "registering class");
        self.index.insert(declaration.name.name.clone(), id);
        self.nodes.push(Node::new(id, declaration, builtin));
        id
    }

    fn record(&mut self, kind: ClassGraphErrorKind, span: Span) {
        let error = ClassGraphError::new(kind, span);
        warn!(%error, "class graph error");
        self.errors.push(error);
    }

    /// Resolves every declared parent name, in registration order.
    fn link_parents(&mut self) {
        for position in 0..self.nodes.len() {
            let node = &self.nodes[position];
            let id = node.id;
            let span = node.span();
            let class = node.name().clone();
            let parent = match node.declaration.parent_name() {
                Some(parent) => EcoString::from(parent),
                None if node.is_root() => continue,
                None => ROOT_CLASS.into(),
            };

            if BuiltinClass::from_name(&parent).is_some_and(BuiltinClass::is_sealed) {
                self.record(
                    ClassGraphErrorKind::RestrictedInheritance { class, parent },
                    span,
                );
            } else if let Some(&parent_id) = self.index.get(&parent) {
                debug!(%class, %parent, "linking class to parent");
                self.nodes[position].parent = Some(parent_id);
                self.nodes[parent_id.index()].children.push(id);
            } else {
                self.record(ClassGraphErrorKind::UndeclaredParent { class, parent }, span);
            }
        }
    }

    fn report_cycles(&mut self) {
        for cycle in cycles::find_cycles(&self.nodes) {
            let Some(&first) = cycle.first() else {
                continue;
            };
            let path = cycle
                .iter()
                .map(|id| self.nodes[id.index()].name().clone())
                .collect();
            let span = self.nodes[first.index()].span();
            self.record(ClassGraphErrorKind::CyclicInheritance { path }, span);
        }
    }

    fn freeze(self) -> Analysis {
        let rooted = compute_rooted(&self.nodes);
        let graph = ClassGraph {
            config: self.config,
            nodes: self.nodes,
            index: self.index,
            has_entry_class: self.has_entry_class,
            rooted,
            errors: Vec::new(),
            mode: PhantomData,
        };
        Analysis {
            graph,
            errors: self.errors,
        }
    }
}

impl Default for ClassGraph<Building> {
    fn default() -> Self {
        Self::new()
    }
}

/// For each node, whether its parent chain ends at the root.
///
/// Each node is resolved once: a walk stops at the first node whose answer
/// is already known and back-fills the path it took.
fn compute_rooted(nodes: &[Node]) -> Vec<bool> {
    let mut state: Vec<Option<bool>> = vec![None; nodes.len()];
    let mut on_path = vec![false; nodes.len()];
    let mut path = Vec::new();
    if let Some(root) = state.get_mut(ClassId::ROOT.index()) {
        *root = Some(true);
    }

    for node in nodes {
        let mut current = Some(node.id);
        let answer = loop {
            let Some(id) = current else {
                break false;
            };
            let index = id.index();
            if let Some(known) = state[index] {
                break known;
            }
            if on_path[index] {
                break false;
            }
            on_path[index] = true;
            path.push(index);
            current = nodes[index].parent;
        };
        for index in path.drain(..) {
            on_path[index] = false;
            state[index] = Some(answer);
        }
    }

    state.into_iter().map(|known| known.unwrap_or(false)).collect()
}

impl<M> ClassGraph<M> {
    /// Settings the graph was built with.
    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Whether a class with this name is registered.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registration index of the named class.
    #[must_use]
    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.index.get(name).copied()
    }

    /// Whether a class with the configured entry-class name was registered.
    #[must_use]
    pub fn has_entry_class(&self) -> bool {
        self.has_entry_class
    }

    /// The node registered under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this graph.
    #[must_use]
    pub fn node(&self, id: ClassId) -> &Node {
        &self.nodes[id.index()]
    }

    /// All nodes in registration order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[ClassId::ROOT.index()]
    }

    /// Number of registered classes, built-ins included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the built-ins are registered on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn lookup(&self, name: &str) -> Result<ClassId, LookupError> {
        self.class_id(name)
            .ok_or_else(|| LookupError::UnknownClass(name.into()))
    }
}

impl ClassGraph<Frozen> {
    /// Looks up a node by name.
    pub fn get(&self, name: &str) -> Result<&Node, LookupError> {
        self.lookup(name).map(|id| self.node(id))
    }

    /// Iterates over the ancestors of `id`, nearest first, excluding `id`.
    ///
    /// The walk is bounded by the number of classes, so it terminates even
    /// when `id` sits on a cycle; in that case classes repeat.
    pub fn ancestors(&self, id: ClassId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.node(id).parent,
            remaining: self.nodes.len(),
        }
    }

    /// Whether following parent links from `id` reaches the root.
    #[must_use]
    pub fn is_rooted(&self, id: ClassId) -> bool {
        self.rooted[id.index()]
    }

    /// Whether `sub` conforms to `sup`.
    ///
    /// Every class conforms to itself and to the root, even when its own
    /// ancestor chain is broken. Sealed classes conform to nothing else.
    /// Otherwise `sub` conforms iff `sup` lies on `sub`'s path to the root.
    pub fn conforms(&self, sub: &str, sup: &str) -> Result<bool, LookupError> {
        let sub = self.lookup(sub)?;
        let sup = self.lookup(sup)?;
        Ok(self.conforms_id(sub, sup))
    }

    /// [`conforms`](Self::conforms) by registration index.
    #[must_use]
    pub fn conforms_id(&self, sub: ClassId, sup: ClassId) -> bool {
        if sub == sup || sup == ClassId::ROOT {
            return true;
        }
        if self.node(sub).is_sealed() || self.node(sup).is_sealed() {
            return false;
        }
        self.ancestors(sub).any(|ancestor| ancestor == sup)
    }

    /// Least common ancestor of two classes, by name.
    pub fn join(&self, left: &str, right: &str) -> Result<EcoString, LookupError> {
        let left = self.lookup(left)?;
        let right = self.lookup(right)?;
        self.join_id(left, right)
            .map(|id| self.node(id).name().clone())
    }

    /// Least common ancestor of two classes, by registration index.
    ///
    /// Distinct sealed classes only meet at the root. Fails with
    /// [`LookupError::NoCommonAncestor`] when a broken chain keeps the two
    /// walks apart.
    pub fn join_id(&self, left: ClassId, right: ClassId) -> Result<ClassId, LookupError> {
        if left == right {
            return Ok(left);
        }
        if self.node(left).is_sealed() || self.node(right).is_sealed() {
            return Ok(ClassId::ROOT);
        }

        let mut visited = vec![false; self.nodes.len()];
        for id in std::iter::once(left).chain(self.ancestors(left)) {
            visited[id.index()] = true;
        }
        std::iter::once(right)
            .chain(self.ancestors(right))
            .find(|id| visited[id.index()])
            .ok_or_else(|| LookupError::NoCommonAncestor {
                left: self.node(left).name().clone(),
                right: self.node(right).name().clone(),
            })
    }

    /// Superclass names, nearest first, excluding the class itself.
    ///
    /// Stops before the first repeated class when the chain is cyclic.
    pub fn superclass_chain(&self, name: &str) -> Result<Vec<EcoString>, LookupError> {
        let id = self.lookup(name)?;
        let mut seen = vec![false; self.nodes.len()];
        seen[id.index()] = true;
        let mut chain = Vec::new();
        for ancestor in self.ancestors(id) {
            if std::mem::replace(&mut seen[ancestor.index()], true) {
                break;
            }
            chain.push(self.node(ancestor).name().clone());
        }
        Ok(chain)
    }

    /// Path from the root down to `id`, both ends included.
    ///
    /// This is the order in which attributes and methods are inherited.
    pub fn root_path_id(&self, id: ClassId) -> Result<Vec<ClassId>, LookupError> {
        if !self.is_rooted(id) {
            return Err(LookupError::BrokenChain {
                class: self.node(id).name().clone(),
            });
        }
        let mut path: Vec<ClassId> = std::iter::once(id).chain(self.ancestors(id)).collect();
        path.reverse();
        Ok(path)
    }

    /// Names from the root down to `name`, both ends included.
    pub fn root_path(&self, name: &str) -> Result<Vec<EcoString>, LookupError> {
        let id = self.lookup(name)?;
        Ok(self
            .root_path_id(id)?
            .into_iter()
            .map(|id| self.node(id).name().clone())
            .collect())
    }

    /// Name of the resolved parent. `None` for the root and for classes
    /// whose declared parent could not be resolved.
    pub fn parent_name(&self, name: &str) -> Result<Option<&EcoString>, LookupError> {
        let node = self.get(name)?;
        Ok(node.parent.map(|parent| self.node(parent).name()))
    }

    /// Names of the direct subclasses, in registration order.
    pub fn children_of(&self, name: &str) -> Result<Vec<&EcoString>, LookupError> {
        let node = self.get(name)?;
        Ok(node
            .children
            .iter()
            .map(|&child| self.node(child).name())
            .collect())
    }

    /// Whether the class may be inherited from.
    pub fn is_sealed(&self, name: &str) -> Result<bool, LookupError> {
        self.get(name).map(Node::is_sealed)
    }

    /// Whether methods may be declared on the class.
    pub fn accepts_methods(&self, name: &str) -> Result<bool, LookupError> {
        self.get(name)
            .map(|node| node.builtin.is_none_or(BuiltinClass::accepts_methods))
    }
}

/// Iterator returned by [`ClassGraph::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    graph: &'a ClassGraph<Frozen>,
    next: Option<ClassId>,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = ClassId;

    fn next(&mut self) -> Option<ClassId> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next?;
        self.next = self.graph.node(current).parent;
        Some(current)
    }
}

#[cfg(test)]
mod tests;
