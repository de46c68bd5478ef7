// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `coolc check`: validate a program's class hierarchy.
//!
//! Every problem the engine records is reported, not just the first. The
//! command exits non-zero if any error was found.

use super::Session;
use crate::diagnostic::CompileDiagnostic;
use coolc_core::semantic_analysis::BuiltinClass;
use coolc_core::source_analysis::{Diagnostic, Severity};
use miette::Result;

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output via miette (default).
    #[default]
    Text,
    /// Machine-readable JSON (one object per line).
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown format '{other}': expected 'text' or 'json'"
            )),
        }
    }
}

/// Report every diagnostic of the session and fail if any is an error.
pub fn run_check(session: &Session, format: OutputFormat) -> Result<()> {
    let diagnostics = session.analysis.diagnostics();
    let (source_path, source) = session.program.diagnostic_source();

    for diag in &diagnostics {
        match format {
            OutputFormat::Text => {
                let compile_diag =
                    CompileDiagnostic::from_core_diagnostic(diag, source_path, source);
                eprintln!("{:?}", miette::Report::new(compile_diag));
            }
            OutputFormat::Json => println!("{}", to_json(diag, source_path)),
        }
    }

    let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
    if error_count > 0 {
        let plural = if error_count == 1 { "" } else { "s" };
        miette::bail!("{error_count} error{plural} found in '{}'", session.title());
    }

    if format == OutputFormat::Text {
        let classes = session.graph().len() - BuiltinClass::ALL.len();
        println!("{}: {classes} classes checked, no errors", session.title());
    }
    Ok(())
}

fn to_json(diag: &Diagnostic, source_path: &str) -> serde_json::Value {
    let severity = match diag.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    serde_json::json!({
        "file": source_path,
        "severity": severity,
        "code": diag.code,
        "message": diag.message.as_str(),
        "span_start": diag.span.start(),
        "span_end": diag.span.end(),
        "hint": diag.hint.as_deref(),
    })
}
