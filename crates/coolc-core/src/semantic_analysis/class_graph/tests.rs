// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::ast::ClassDeclaration;

fn span(start: u32) -> Span {
    Span::new(start, start + 1)
}

fn class(name: &str) -> ClassDeclaration {
    ClassDeclaration::new(name)
}

fn analyze(classes: Vec<ClassDeclaration>) -> Analysis {
    ClassGraph::build(classes, GraphConfig::default())
}

fn kinds(analysis: &Analysis) -> Vec<&ClassGraphErrorKind> {
    analysis.errors().iter().map(|e| &e.kind).collect()
}

/// `A <- B <- C` plus the entry class.
fn abc() -> ClassGraph {
    let analysis = analyze(vec![
        class("Main"),
        class("A"),
        class("B").inheriting("A"),
        class("C").inheriting("B"),
    ]);
    assert!(!analysis.has_errors(), "{:?}", analysis.errors());
    analysis.into_graph()
}

// --- Registration ---

#[test]
fn builtins_registered_in_fixed_order() {
    let graph = ClassGraph::new();
    let names: Vec<&str> = graph.nodes().iter().map(|n| n.name().as_str()).collect();
    assert_eq!(names, ["Object", "IO", "String", "Int", "Bool"]);
    assert!(graph.root().is_root());
}

#[test]
fn user_classes_get_next_index_in_declaration_order() {
    let mut graph = ClassGraph::new();
    let a = graph.add_class(class("A")).unwrap();
    let b = graph.add_class(class("B")).unwrap();
    assert_eq!(a.index(), 5);
    assert_eq!(b.index(), 6);
    assert_eq!(graph.class_id("B"), Some(b));
}

#[test]
fn duplicate_user_class_rejected() {
    let analysis = analyze(vec![
        class("Main"),
        class("A").at(span(1)),
        class("A").at(span(9)),
    ]);
    assert_eq!(
        kinds(&analysis),
        [&ClassGraphErrorKind::DuplicateClass { name: "A".into() }]
    );
    assert_eq!(analysis.errors()[0].span, span(9));
    // The first declaration wins.
    assert_eq!(analysis.graph().get("A").unwrap().span(), span(1));
}

#[test]
fn redefining_any_builtin_is_restricted() {
    for name in ["Object", "IO", "String", "Int", "Bool"] {
        let analysis = analyze(vec![
            class("Main"),
            class(name).with_method("extra", &[], "Int"),
        ]);
        assert_eq!(
            kinds(&analysis),
            [&ClassGraphErrorKind::RestrictedClassRedefinition { name: name.into() }],
            "redefining {name}"
        );
        let builtin = analysis.graph().get(name).unwrap();
        assert!(builtin.builtin().is_some());
        assert!(
            builtin.declaration().methods().all(|m| m.name != "extra"),
            "{name} gained a method"
        );
    }
}

#[test]
fn entry_class_flag_set_on_registration() {
    let mut graph = ClassGraph::new();
    assert!(!graph.has_entry_class());
    graph.add_class(class("Main"));
    assert!(graph.has_entry_class());
}

#[test]
fn custom_entry_class_name() {
    let config = GraphConfig {
        entry_class: "Program".into(),
    };
    let analysis = ClassGraph::build(vec![class("Program")], config.clone());
    assert!(!analysis.has_errors());

    let analysis = ClassGraph::build(vec![class("Main")], config);
    assert_eq!(
        kinds(&analysis),
        [&ClassGraphErrorKind::MissingMainClass {
            name: "Program".into()
        }]
    );
}

// --- Parent linking ---

#[test]
fn implicit_parent_is_object() {
    let graph = abc();
    assert_eq!(graph.parent_name("A").unwrap().unwrap(), "Object");
    assert_eq!(graph.parent_name("Object").unwrap(), None);
}

#[test]
fn children_recorded_in_registration_order() {
    let analysis = analyze(vec![
        class("Main"),
        class("A"),
        class("X").inheriting("A"),
        class("Y").inheriting("A"),
    ]);
    let graph = analysis.into_graph();
    let children: Vec<&str> = graph
        .children_of("A")
        .unwrap()
        .into_iter()
        .map(EcoString::as_str)
        .collect();
    assert_eq!(children, ["X", "Y"]);

    let root_children: Vec<&str> = graph
        .children_of("Object")
        .unwrap()
        .into_iter()
        .map(EcoString::as_str)
        .collect();
    assert_eq!(root_children, ["IO", "String", "Int", "Bool", "Main", "A"]);
}

#[test]
fn inheriting_sealed_builtin_rejected() {
    for sealed in ["Int", "String", "Bool"] {
        let analysis = analyze(vec![
            class("Main"),
            class("Bad").inheriting(sealed).at(span(3)),
        ]);
        assert_eq!(
            kinds(&analysis),
            [&ClassGraphErrorKind::RestrictedInheritance {
                class: "Bad".into(),
                parent: sealed.into(),
            }]
        );
        assert_eq!(analysis.errors()[0].span, span(3));
        let graph = analysis.into_graph();
        assert!(graph.get("Bad").unwrap().parent().is_none());
        assert!(graph.children_of(sealed).unwrap().is_empty());
    }
}

#[test]
fn inheriting_io_is_allowed() {
    let analysis = analyze(vec![class("Main").inheriting("IO")]);
    assert!(!analysis.has_errors());
    let graph = analysis.into_graph();
    assert_eq!(graph.conforms("Main", "IO"), Ok(true));
    assert_eq!(graph.conforms("Main", "Object"), Ok(true));
    assert_eq!(graph.conforms("IO", "Main"), Ok(false));
}

#[test]
fn undeclared_parent_reported() {
    let analysis = analyze(vec![class("Main"), class("Dog").inheriting("Animal")]);
    assert_eq!(
        kinds(&analysis),
        [&ClassGraphErrorKind::UndeclaredParent {
            class: "Dog".into(),
            parent: "Animal".into(),
        }]
    );
    let graph = analysis.into_graph();
    let dog = graph.class_id("Dog").unwrap();
    assert!(graph.node(dog).parent().is_none());
    assert!(!graph.is_rooted(dog));
}

#[test]
fn parent_declared_after_child_resolves() {
    let analysis = analyze(vec![class("Main"), class("B").inheriting("A"), class("A")]);
    assert!(!analysis.has_errors());
    assert_eq!(analysis.graph().conforms("B", "A"), Ok(true));
}

// --- Cycles ---

#[test]
fn mutual_parents_yield_one_cycle_error() {
    let analysis = analyze(vec![
        class("Main"),
        class("A").inheriting("B").at(span(10)),
        class("B").inheriting("A").at(span(20)),
    ]);
    let cycles: Vec<&ClassGraphError> = analysis
        .errors()
        .iter()
        .filter(|e| matches!(e.kind, ClassGraphErrorKind::CyclicInheritance { .. }))
        .collect();
    assert_eq!(cycles.len(), 1);
    let ClassGraphErrorKind::CyclicInheritance { path } = &cycles[0].kind else {
        unreachable!();
    };
    assert_eq!(path, &[EcoString::from("A"), EcoString::from("B")]);
    assert_eq!(
        cycles[0].to_string(),
        "Classes have cyclic dependency: A -> B -> A"
    );
    // Attributed to the class the cycle is listed from.
    assert_eq!(cycles[0].span, span(10));
}

#[test]
fn cycle_entered_from_a_leading_class_is_attributed_to_entry_member() {
    let analysis = analyze(vec![
        class("Main"),
        class("Leaf").inheriting("B").at(span(5)),
        class("A").inheriting("B").at(span(10)),
        class("B").inheriting("A").at(span(20)),
    ]);
    let [error] = analysis.errors() else {
        panic!("expected one error, got {:?}", analysis.errors());
    };
    assert_eq!(
        error.to_string(),
        "Classes have cyclic dependency: B -> A -> B"
    );
    assert_eq!(error.span, span(20));
}

#[test]
fn self_inheritance_is_a_cycle() {
    let analysis = analyze(vec![class("Main"), class("Loop").inheriting("Loop")]);
    assert_eq!(
        kinds(&analysis),
        [&ClassGraphErrorKind::CyclicInheritance {
            path: vec!["Loop".into()]
        }]
    );
}

#[test]
fn all_diagnostics_surface_together() {
    let analysis = analyze(vec![
        class("A").inheriting("B"),
        class("B").inheriting("A"),
        class("C").inheriting("Int"),
        class("D").inheriting("Missing"),
        class("IO"),
        class("C"),
    ]);
    let codes: Vec<&str> = analysis.errors().iter().map(|e| e.kind.code()).collect();
    assert_eq!(
        codes,
        [
            "coolc::class_graph::restricted_class_redefinition",
            "coolc::class_graph::duplicate_class",
            "coolc::class_graph::restricted_inheritance",
            "coolc::class_graph::undeclared_parent",
            "coolc::class_graph::cyclic_inheritance",
            "coolc::class_graph::missing_main_class",
        ]
    );
    assert_eq!(analysis.diagnostics().len(), 6);
    assert!(analysis.diagnostics().iter().all(Diagnostic::is_error));
}

#[test]
fn graph_stays_queryable_after_cycles() {
    let analysis = analyze(vec![
        class("Main"),
        class("A").inheriting("B"),
        class("B").inheriting("A"),
        class("Leaf").inheriting("A"),
    ]);
    assert!(analysis.has_errors());
    let graph = analysis.into_graph();

    let a = graph.class_id("A").unwrap();
    let leaf = graph.class_id("Leaf").unwrap();
    assert!(!graph.is_rooted(a));
    assert!(!graph.is_rooted(leaf));
    assert!(graph.is_rooted(graph.class_id("Main").unwrap()));

    assert_eq!(graph.conforms("Leaf", "A"), Ok(true));
    assert_eq!(graph.conforms("A", "Main"), Ok(false));
    assert_eq!(graph.conforms("A", "Object"), Ok(true));
    assert_eq!(graph.join("Leaf", "B").unwrap(), "B");
    assert!(matches!(
        graph.join("A", "Main"),
        Err(LookupError::NoCommonAncestor { .. })
    ));
    assert_eq!(
        graph.superclass_chain("Leaf").unwrap(),
        [EcoString::from("A"), EcoString::from("B")]
    );
    assert_eq!(
        graph.root_path("Leaf"),
        Err(LookupError::BrokenChain {
            class: "Leaf".into()
        })
    );
}

#[test]
fn missing_main_reported_even_when_well_formed() {
    let analysis = analyze(vec![class("A"), class("B").inheriting("A")]);
    assert_eq!(
        kinds(&analysis),
        [&ClassGraphErrorKind::MissingMainClass { name: "Main".into() }]
    );
    assert_eq!(analysis.errors()[0].span, Span::default());
    // Construction still completed.
    assert_eq!(analysis.graph().conforms("B", "A"), Ok(true));
}

// --- Conformance ---

#[test]
fn conformance_is_reflexive_for_every_class() {
    let graph = abc();
    for node in graph.nodes() {
        assert!(graph.conforms_id(node.id(), node.id()), "{}", node.name());
    }
}

#[test]
fn conformance_is_transitive() {
    let graph = abc();
    assert_eq!(graph.conforms("C", "A"), Ok(true));
    assert_eq!(graph.conforms("C", "B"), Ok(true));
    assert_eq!(graph.conforms("A", "C"), Ok(false));
}

#[test]
fn everything_conforms_to_object() {
    let graph = abc();
    for name in ["Int", "String", "Bool", "IO", "C"] {
        assert_eq!(graph.conforms(name, "Object"), Ok(true), "{name}");
    }
    assert_eq!(graph.conforms("Object", "A"), Ok(false));
}

#[test]
fn sealed_types_conform_only_to_themselves() {
    let graph = abc();
    assert_eq!(graph.conforms("Int", "Int"), Ok(true));
    assert_eq!(graph.conforms("Int", "Bool"), Ok(false));
    assert_eq!(graph.conforms("String", "A"), Ok(false));
    assert_eq!(graph.conforms("A", "String"), Ok(false));
}

#[test]
fn unknown_names_are_lookup_errors() {
    let graph = abc();
    assert_eq!(
        graph.conforms("Nope", "A"),
        Err(LookupError::UnknownClass("Nope".into()))
    );
    assert_eq!(
        graph.join("A", "Nope"),
        Err(LookupError::UnknownClass("Nope".into()))
    );
    assert!(graph.superclass_chain("Nope").is_err());
    assert!(!graph.has_class("Nope"));
}

// --- Join ---

#[test]
fn join_of_class_with_itself() {
    let graph = abc();
    for node in graph.nodes() {
        assert_eq!(&graph.join(node.name(), node.name()).unwrap(), node.name());
    }
}

#[test]
fn join_of_sealed_types() {
    let graph = abc();
    assert_eq!(graph.join("Int", "String").unwrap(), "Object");
    assert_eq!(graph.join("Int", "Int").unwrap(), "Int");
    assert_eq!(graph.join("Bool", "A").unwrap(), "Object");
}

#[test]
fn join_finds_nearest_common_ancestor() {
    let analysis = analyze(vec![
        class("Main"),
        class("A"),
        class("B").inheriting("A"),
        class("C").inheriting("B"),
        class("D").inheriting("A"),
    ]);
    let graph = analysis.into_graph();
    assert_eq!(graph.join("B", "C").unwrap(), "B");
    assert_eq!(graph.join("C", "B").unwrap(), "B");
    assert_eq!(graph.join("C", "D").unwrap(), "A");
    assert_eq!(graph.join("D", "Main").unwrap(), "Object");
    assert_eq!(graph.join("IO", "C").unwrap(), "Object");
}

// --- Traversal ---

#[test]
fn root_path_runs_from_object_to_class() {
    let graph = abc();
    assert_eq!(graph.root_path("C").unwrap(), ["Object", "A", "B", "C"]);
    assert_eq!(graph.root_path("Object").unwrap(), ["Object"]);
    assert_eq!(graph.superclass_chain("C").unwrap(), ["B", "A", "Object"]);
}

#[test]
fn ancestor_walk_strictly_decreases_depth() {
    let graph = abc();
    let c = graph.class_id("C").unwrap();
    let ancestors: Vec<ClassId> = graph.ancestors(c).collect();
    assert_eq!(ancestors.len(), 3);
    assert_eq!(ancestors.last(), Some(&ClassId::ROOT));
}

#[test]
fn accepts_methods_follows_builtin_properties() {
    let graph = abc();
    assert_eq!(graph.accepts_methods("Int"), Ok(false));
    assert_eq!(graph.accepts_methods("Bool"), Ok(false));
    assert_eq!(graph.accepts_methods("String"), Ok(true));
    assert_eq!(graph.accepts_methods("A"), Ok(true));
    assert_eq!(graph.is_sealed("String"), Ok(true));
    assert_eq!(graph.is_sealed("IO"), Ok(false));
}

// --- Node identity ---

#[test]
fn nodes_compare_by_index_only() {
    let a = Node::new(ClassId::new(7), class("Same"), None);
    let b = Node::new(ClassId::new(8), class("Same"), None);
    let c = Node::new(ClassId::new(7), class("Different"), None);
    assert_ne!(a, b);
    assert_eq!(a, c);
}

#[test]
fn frozen_graph_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClassGraph<Frozen>>();

    let graph = abc();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| graph.join("C", "B").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "B");
        }
    });
}

#[test]
fn separate_graphs_do_not_share_state() {
    let first = abc();
    let second = analyze(vec![class("Main")]).into_graph();
    assert!(first.has_class("C"));
    assert!(!second.has_class("C"));
    assert!(
        second.children_of("Object").unwrap().len() < first.children_of("Object").unwrap().len()
    );
}
