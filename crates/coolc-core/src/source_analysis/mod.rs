// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source locations and diagnostics shared by every compiler pass.
//!
//! **DDD Context:** Source Analysis
//!
//! Tokenization and parsing live outside this crate; what remains here is
//! the vocabulary the parser and the later passes agree on: [`Span`] for
//! positions and [`Diagnostic`] for non-fatal error reports.

mod diagnostic;
mod span;

pub use diagnostic::{Diagnostic, Severity};
pub use span::Span;
