// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `coolc hierarchy`: print the inheritance tree.
//!
//! The tree is printed from `Object`, children in registration order. Classes
//! whose ancestor chain never reaches `Object` (cycles, undeclared parents)
//! are listed separately.

use super::Session;
use coolc_core::semantic_analysis::ClassGraph;
use coolc_core::semantic_analysis::class_graph::{ClassId, ROOT_CLASS};
use miette::Result;
use std::fmt::Write;

/// Print the hierarchy of the session's program.
pub fn run_hierarchy(session: &Session) -> Result<()> {
    print!("{}", render_hierarchy(session.graph()));
    Ok(())
}

/// Renders the tree rooted at `Object`, two spaces of indent per level.
pub fn render_hierarchy(graph: &ClassGraph) -> String {
    let mut out = String::new();
    let mut stack = vec![(ClassId::ROOT, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let node = graph.node(id);
        let marker = if node.is_sealed() { " (sealed)" } else { "" };
        let _ = writeln!(out, "{:indent$}{}{marker}", "", node.name(), indent = depth * 2);
        stack.extend(node.children().iter().rev().map(|&child| (child, depth + 1)));
    }

    let unrooted: Vec<_> = graph
        .nodes()
        .iter()
        .filter(|node| !graph.is_rooted(node.id()))
        .collect();
    if !unrooted.is_empty() {
        let _ = writeln!(out, "\nnot reachable from {ROOT_CLASS}:");
        for node in unrooted {
            let parent = node.declaration().parent_name().unwrap_or(ROOT_CLASS);
            let _ = writeln!(out, "  {} (inherits {parent})", node.name());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use coolc_core::ast::ClassDeclaration;
    use coolc_core::semantic_analysis::GraphConfig;

    fn graph(classes: Vec<ClassDeclaration>) -> ClassGraph {
        ClassGraph::build(classes, GraphConfig::default()).into_graph()
    }

    #[test]
    fn test_builtins_only() {
        let rendered = render_hierarchy(&graph(vec![]));
        assert_eq!(
            rendered,
            "Object\n  IO\n  String (sealed)\n  Int (sealed)\n  Bool (sealed)\n"
        );
    }

    #[test]
    fn test_nested_user_classes() {
        let rendered = render_hierarchy(&graph(vec![
            ClassDeclaration::new("Main").inheriting("IO"),
            ClassDeclaration::new("Shape"),
            ClassDeclaration::new("Square").inheriting("Shape"),
        ]));
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[1], "  IO");
        assert_eq!(lines[2], "    Main");
        assert_eq!(lines[6], "  Shape");
        assert_eq!(lines[7], "    Square");
    }

    #[test]
    fn test_unrooted_classes_listed_separately() {
        let rendered = render_hierarchy(&graph(vec![
            ClassDeclaration::new("A").inheriting("B"),
            ClassDeclaration::new("B").inheriting("A"),
            ClassDeclaration::new("Orphan").inheriting("Missing"),
        ]));
        assert!(rendered.contains("not reachable from Object:"));
        assert!(rendered.contains("  A (inherits B)"));
        assert!(rendered.contains("  B (inherits A)"));
        assert!(rendered.contains("  Orphan (inherits Missing)"));
    }
}
