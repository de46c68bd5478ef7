// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Program file loading.
//!
//! A program file is the parser's output serialised as JSON:
//!
//! ```json
//! {
//!   "source": "shapes.cl",
//!   "classes": [
//!     { "name": { "name": "Main" }, "parent": { "name": "IO" } }
//!   ]
//! }
//! ```
//!
//! `source` is optional. When present it is resolved relative to the program
//! file and its text is used to show source context in diagnostics.

use camino::{Utf8Path, Utf8PathBuf};
use coolc_core::ast::ClassDeclaration;
use miette::{Context, IntoDiagnostic, Result};
use serde::Deserialize;
use std::fs;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct ProgramFile {
    #[serde(default)]
    source: Option<Utf8PathBuf>,
    classes: Vec<ClassDeclaration>,
}

/// Source text the class declarations were parsed from.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: Utf8PathBuf,
    pub text: String,
}

/// A loaded program.
#[derive(Debug, Clone)]
pub struct Program {
    /// Path of the program file itself.
    pub path: Utf8PathBuf,
    /// Class declarations, in source order.
    pub classes: Vec<ClassDeclaration>,
    /// Source text, if it was named and could be read.
    pub source: Option<SourceFile>,
}

impl Program {
    /// Directory holding the program file; where `coolc.toml` is looked up.
    pub fn project_root(&self) -> &Utf8Path {
        match self.path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        }
    }

    /// Name and text used when rendering diagnostics.
    pub fn diagnostic_source(&self) -> (&str, &str) {
        match &self.source {
            Some(source) => (source.path.as_str(), source.text.as_str()),
            None => (self.path.as_str(), ""),
        }
    }
}

/// Reads and parses a program file.
///
/// A missing or unreadable source file is not an error: diagnostics are then
/// shown without source context.
pub fn load_program(path: &Utf8Path) -> Result<Program> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read program file '{path}'"))?;

    let file: ProgramFile = serde_json::from_str(&content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to parse program file '{path}'"))?;

    let mut program = Program {
        path: path.to_owned(),
        classes: file.classes,
        source: None,
    };

    if let Some(source) = file.source {
        let source_path = program.project_root().join(source);
        match fs::read_to_string(&source_path) {
            Ok(text) => {
                program.source = Some(SourceFile {
                    path: source_path,
                    text,
                });
            }
            Err(error) => {
                warn!(
                    path = %source_path,
                    %error,
                    "source file unavailable, diagnostics will lack context"
                );
            }
        }
    }

    debug!(
        path = %program.path,
        classes = program.classes.len(),
        "program loaded"
    );
    Ok(program)
}
