// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `coolc layout`: print object layouts and dispatch tables.

use super::Session;
use coolc_core::codegen::layout::{ClassLayout, LayoutTable};
use miette::{IntoDiagnostic, Result};
use std::fmt::Write;

/// Print the layout of one class, or of every class reachable from `Object`.
pub fn run_layout(session: &Session, class: Option<&str>) -> Result<()> {
    let graph = session.graph();
    match class {
        Some(name) => {
            let layout = ClassLayout::compute(graph, name).into_diagnostic()?;
            print!("{}", render_layout(&layout));
        }
        None => {
            let table = LayoutTable::build(graph);
            let rendered: Vec<_> = table.iter().map(render_layout).collect();
            print!("{}", rendered.join("\n"));
        }
    }
    Ok(())
}

/// Renders attribute offsets and dispatch slots of one class.
pub fn render_layout(layout: &ClassLayout) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "class {}", layout.class());

    let _ = writeln!(out, "  attributes:");
    if layout.attributes().is_empty() {
        let _ = writeln!(out, "    (none)");
    }
    for attribute in layout.attributes() {
        let _ = writeln!(
            out,
            "    [{}] {} : {} ({})",
            attribute.offset, attribute.name, attribute.type_name, attribute.defined_in
        );
    }

    let _ = writeln!(out, "  methods:");
    if layout.dispatch().is_empty() {
        let _ = writeln!(out, "    (none)");
    }
    for method in layout.dispatch().slots() {
        let formals: Vec<_> = method
            .formals
            .iter()
            .map(|formal| format!("{} : {}", formal.name, formal.type_name))
            .collect();
        let _ = writeln!(
            out,
            "    [{}] {}({}) : {} ({})",
            method.slot,
            method.name,
            formals.join(", "),
            method.return_type,
            method.defined_in
        );
    }
    out
}
