// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `coolc conforms` and `coolc join`: type-reasoning queries.
//!
//! Queries run against the frozen graph even when analysis reported errors,
//! so a partially broken program can still be explored. Unknown class names
//! and broken ancestor chains are reported as errors.

use super::Session;
use miette::{IntoDiagnostic, Result};
use tracing::warn;

/// Print whether `sub` conforms to `sup`.
pub fn run_conforms(session: &Session, sub: &str, sup: &str) -> Result<()> {
    warn_if_invalid(session);
    let conforms = session.graph().conforms(sub, sup).into_diagnostic()?;
    println!("{conforms}");
    Ok(())
}

/// Print the least common ancestor of `left` and `right`.
pub fn run_join(session: &Session, left: &str, right: &str) -> Result<()> {
    warn_if_invalid(session);
    let join = session.graph().join(left, right).into_diagnostic()?;
    println!("{join}");
    Ok(())
}

fn warn_if_invalid(session: &Session) {
    if session.analysis.has_errors() {
        warn!(
            errors = session.analysis.errors().len(),
            "program has hierarchy errors; run `coolc check` for details"
        );
    }
}
