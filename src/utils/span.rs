//! Source location tracking

use serde::Serialize;

/// A span represents a range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Start character offset
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
    /// Line the span starts on (1-based)
    pub line: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, line: usize) -> Self {
        Self { start, end, line }
    }

    /// Empty span at the start of line 1
    pub fn dummy() -> Self {
        Self { start: 0, end: 0, line: 1 }
    }

    /// Merge two spans, keeping the line of the earlier one
    pub fn merge(&self, other: &Span) -> Span {
        let line = if self.start <= other.start { self.line } else { other.line };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line,
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::dummy()
    }
}
