//! Indentation tracking for the Pyline lexer
//!
//! Turns the width that follows each newline into INDENT/DEDENT decisions.

use serde::Serialize;

/// How far a single dedent event unwinds the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DedentPolicy {
    /// Pop exactly one level per event, whatever the new width
    Single,
    /// Pop every level wider than the new width, one DEDENT each
    #[default]
    Unwind,
}

/// Outcome of one indentation event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentChange {
    /// A new block was opened
    Indent,
    /// `count` blocks were closed; `aligned` is false when the new width
    /// does not land on an open level
    Dedent { count: usize, aligned: bool },
    /// Same width as the innermost block
    Same,
}

/// Widths of the currently open blocks, innermost last
///
/// The bottom entry is always 0 and is never popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentStack {
    levels: Vec<usize>,
}

impl IndentStack {
    pub fn new() -> Self {
        Self { levels: vec![0] }
    }

    /// Drop every open block
    pub fn reset(&mut self) {
        self.levels.clear();
        self.levels.push(0);
    }

    /// Width of the innermost open block
    pub fn top(&self) -> usize {
        self.levels.last().copied().unwrap_or(0)
    }

    /// Number of blocks currently open
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    /// Apply the width of a new line
    pub fn apply(&mut self, width: usize, policy: DedentPolicy) -> IndentChange {
        let top = self.top();
        if width > top {
            self.levels.push(width);
            log::trace!("indent push {} -> {:?}", width, self.levels);
            return IndentChange::Indent;
        }
        if width == top {
            return IndentChange::Same;
        }

        let mut count = 0;
        match policy {
            DedentPolicy::Single => {
                self.pop();
                count = 1;
            }
            DedentPolicy::Unwind => {
                while self.depth() > 0 && width < self.top() {
                    self.pop();
                    count += 1;
                }
            }
        }
        log::trace!("indent pop x{} for width {} -> {:?}", count, width, self.levels);

        IndentChange::Dedent {
            count,
            aligned: width == self.top(),
        }
    }

    fn pop(&mut self) {
        if self.depth() > 0 {
            self.levels.pop();
        }
    }
}

impl Default for IndentStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_and_same() {
        let mut stack = IndentStack::new();
        assert_eq!(stack.apply(4, DedentPolicy::Unwind), IndentChange::Indent);
        assert_eq!(stack.apply(4, DedentPolicy::Unwind), IndentChange::Same);
        assert_eq!(stack.levels(), &[0, 4]);
    }

    #[test]
    fn test_single_pops_one_level() {
        let mut stack = IndentStack::new();
        stack.apply(2, DedentPolicy::Single);
        stack.apply(6, DedentPolicy::Single);
        assert_eq!(
            stack.apply(0, DedentPolicy::Single),
            IndentChange::Dedent { count: 1, aligned: false }
        );
        assert_eq!(stack.levels(), &[0, 2]);
    }

    #[test]
    fn test_unwind_pops_to_matching_level() {
        let mut stack = IndentStack::new();
        stack.apply(2, DedentPolicy::Unwind);
        stack.apply(6, DedentPolicy::Unwind);
        assert_eq!(
            stack.apply(0, DedentPolicy::Unwind),
            IndentChange::Dedent { count: 2, aligned: true }
        );
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_unwind_reports_misaligned_width() {
        let mut stack = IndentStack::new();
        stack.apply(4, DedentPolicy::Unwind);
        assert_eq!(
            stack.apply(2, DedentPolicy::Unwind),
            IndentChange::Dedent { count: 1, aligned: false }
        );
        assert_eq!(stack.top(), 0);
    }

    #[test]
    fn test_base_level_survives_reset() {
        let mut stack = IndentStack::new();
        stack.apply(8, DedentPolicy::Unwind);
        stack.reset();
        assert_eq!(stack.levels(), &[0]);
        assert_eq!(stack.top(), 0);
    }
}
