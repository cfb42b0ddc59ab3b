//! Structured Feedback Module
//!
//! Machine-readable output of one run:
//! - token records
//! - lexical diagnostics and the syntax error, if any
//! - the parsed tree

use serde::Serialize;

use crate::frontend::ast::Program;
use crate::frontend::token::Token;
use crate::frontend::Analysis;
use crate::utils::Error;

// ==================== Diagnostics ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Reported and skipped
    Warning,
    /// Stopped the parse
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub line: usize,
    /// Character offsets in the source, when known
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl From<&Error> for Diagnostic {
    fn from(error: &Error) -> Self {
        let span = error.span();
        Self {
            severity: if error.is_lexical() { Severity::Warning } else { Severity::Error },
            message: error.to_string(),
            line: error.line(),
            start: span.map(|s| s.start),
            end: span.map(|s| s.end),
        }
    }
}

// ==================== Tokens ====================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRecord {
    pub kind: &'static str,
    pub value: String,
    pub line: usize,
}

impl From<&Token> for TokenRecord {
    fn from(token: &Token) -> Self {
        Self {
            kind: token.kind.name(),
            value: token.kind.to_string(),
            line: token.line(),
        }
    }
}

// ==================== Report ====================

/// Complete outcome of one run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub accepted: bool,
    pub tokens: Vec<TokenRecord>,
    pub diagnostics: Vec<Diagnostic>,
    pub syntax_error: Option<Diagnostic>,
    pub program: Option<Program>,
}

impl Report {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let (program, syntax_error) = match &analysis.result {
            Ok(program) => (Some(program.clone()), None),
            Err(error) => (None, Some(Diagnostic::from(error))),
        };

        Self {
            accepted: analysis.accepted(),
            tokens: analysis.tokens.iter().map(TokenRecord::from).collect(),
            diagnostics: analysis.lex_errors.iter().map(Diagnostic::from).collect(),
            syntax_error,
            program,
        }
    }

    /// Output as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Output as compact JSON (for programmatic use)
    pub fn to_json_compact(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::analyze;
    use crate::frontend::lexer::LexerConfig;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn report(source: &str) -> Value {
        let analysis = analyze(source, LexerConfig::default());
        serde_json::from_str(&Report::from_analysis(&analysis).to_json_compact()).unwrap()
    }

    #[test]
    fn test_accepted_report() {
        let json = report("x = 5");
        assert_eq!(json["accepted"], Value::Bool(true));
        assert_eq!(json["tokens"][0]["kind"], "ID");
        assert_eq!(json["tokens"][2]["value"], "5");
        assert_eq!(json["program"]["stmts"][0]["Assignment"]["target"]["name"], "x");
        assert_eq!(json["syntax_error"], Value::Null);
    }

    #[test]
    fn test_rejected_report() {
        let json = report("x = @ (");
        assert_eq!(json["accepted"], Value::Bool(false));
        assert_eq!(json["program"], Value::Null);
        assert_eq!(json["diagnostics"][0]["severity"], "Warning");
        assert_eq!(json["diagnostics"][0]["message"], "Illegal character '@' at line 1");
        assert_eq!(json["syntax_error"]["severity"], "Error");
        assert_eq!(json["syntax_error"]["line"], 1);
    }
}
