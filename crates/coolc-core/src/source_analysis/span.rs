// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source location tracking.
//!
//! Class declarations handed over by the parser carry a `Span` so that every
//! hierarchy diagnostic can point back at the offending class.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A span of source code, represented as a byte offset range.
///
/// `Span::default()` (an empty span at offset zero) is used for diagnostics
/// that concern the whole program rather than a single declaration.
///
/// # Examples
///
/// ```
/// use coolc_core::source_analysis::Span;
///
/// let span = Span::new(4, 12);
/// assert_eq!(span.start(), 4);
/// assert_eq!(span.len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    /// Creates a new span from start and end byte offsets.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns the start byte offset.
    #[must_use]
    pub const fn start(self) -> u32 {
        self.start
    }

    /// Returns the end byte offset (exclusive).
    #[must_use]
    pub const fn end(self) -> u32 {
        self.end
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Converts to a `Range<usize>` for indexing into source text.
    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<Range<u32>> for Span {
    fn from(range: Range<u32>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start as usize, span.len() as usize).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_span_is_empty() {
        let span = Span::default();
        assert!(span.is_empty());
        assert_eq!(span.as_range(), 0..0);
    }

    #[test]
    fn inverted_span_has_zero_length() {
        let span = Span::new(10, 4);
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn span_into_miette_source_span() {
        let source: miette::SourceSpan = Span::new(3, 9).into();
        assert_eq!(source.offset(), 3);
        assert_eq!(source.len(), 6);
    }

    #[test]
    fn span_deserializes_from_json() {
        let span: Span = serde_json::from_str(r#"{"start": 2, "end": 7}"#).unwrap();
        assert_eq!(span, Span::from(2..7));
    }
}
