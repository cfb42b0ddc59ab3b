//! Error handling for Pyline

use crate::utils::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Lexer or parser error
///
/// Lexical errors are collected by the lexer and never stop a run. Syntax
/// errors are returned by the parser and abort the parse.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ==================== Lexical Errors ====================

    #[error("Illegal character '{ch}' at line {line}")]
    IllegalCharacter { ch: char, line: usize, span: Span },

    #[error("Invalid number literal '{text}' at line {line}")]
    InvalidNumber { text: String, line: usize, span: Span },

    #[error("Inconsistent dedent at line {line}: width {width} does not match open block width {expected}")]
    InconsistentDedent {
        width: usize,
        expected: usize,
        line: usize,
        span: Span,
    },

    // ==================== Syntax Errors ====================

    #[error("Syntax error at '{found}' on line {line}: expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        line: usize,
        span: Span,
    },

    #[error("Syntax error at end of input: expected {expected}")]
    UnexpectedEof { expected: String, line: usize },
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::IllegalCharacter { span, .. }
            | Self::InvalidNumber { span, .. }
            | Self::InconsistentDedent { span, .. }
            | Self::UnexpectedToken { span, .. } => Some(*span),
            Self::UnexpectedEof { .. } => None,
        }
    }

    /// Line the error was reported on
    pub fn line(&self) -> usize {
        match self {
            Self::IllegalCharacter { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::InconsistentDedent { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEof { line, .. } => *line,
        }
    }

    /// Lexical errors are recoverable, syntax errors are not
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            Self::IllegalCharacter { .. } | Self::InvalidNumber { .. } | Self::InconsistentDedent { .. }
        )
    }
}
