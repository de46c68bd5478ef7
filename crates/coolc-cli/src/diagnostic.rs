// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error diagnostics rendered with miette.
//!
//! Converts coolc-core diagnostics into miette-formatted errors with:
//! - Source code context when the program's source file is available
//! - Arrows pointing to the offending class declaration
//! - Fix-it hints where the engine provides one
//! - The engine's stable diagnostic code

use coolc_core::source_analysis::{Diagnostic as CoreDiagnostic, Severity};
use miette::{Diagnostic, LabeledSpan, SourceCode, SourceSpan};
use std::fmt::Display;

/// Code shown for diagnostics the engine did not tag with one.
const FALLBACK_CODE: &str = "coolc::check";

/// A class-hierarchy diagnostic with rich formatting.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CompileDiagnostic {
    /// Error or warning
    pub severity: Severity,
    /// Stable code of the underlying engine diagnostic
    pub code: Option<&'static str>,
    /// Human-readable error message
    pub message: String,
    /// Source code for context (empty when the source file is unknown)
    pub src: miette::NamedSource<String>,
    /// Location of the error. `None` for program-wide problems and when no
    /// source text is available.
    pub span: Option<SourceSpan>,
    /// Label for the error span
    pub label: String,
    /// How to fix the problem
    pub hint: Option<String>,
}

impl Diagnostic for CompileDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code.unwrap_or(FALLBACK_CODE)))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.hint
            .as_deref()
            .map(|hint| Box::new(hint) as Box<dyn Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label = LabeledSpan::new_with_span(Some(self.label.clone()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

impl CompileDiagnostic {
    /// Create a new diagnostic from a coolc-core diagnostic.
    pub fn from_core_diagnostic(
        diagnostic: &CoreDiagnostic,
        source_path: &str,
        source: &str,
    ) -> Self {
        let label = match diagnostic.severity {
            Severity::Error => "error here",
            Severity::Warning => "warning here",
        };
        let end = diagnostic.span.end() as usize;
        let span = (!diagnostic.span.is_empty() && end <= source.len())
            .then(|| SourceSpan::from(diagnostic.span));

        Self {
            severity: diagnostic.severity,
            code: diagnostic.code,
            message: diagnostic.message.to_string(),
            src: miette::NamedSource::new(source_path, source.to_string()),
            span,
            label: label.to_string(),
            hint: diagnostic.hint.as_ref().map(ToString::to_string),
        }
    }
}
