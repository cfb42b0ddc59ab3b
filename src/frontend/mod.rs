//! Frontend module - Lexer, Parser, AST

pub mod ast;
pub mod indent;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

use crate::utils::{Error, Result};
use ast::Program;
use lexer::{Lexer, LexerConfig};
use parser::Parser;
use token::Token;

/// Everything one run over a source string produces
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Full token sequence, for display
    pub tokens: Vec<Token>,
    /// Lexical errors; reported, but they do not reject the input
    pub lex_errors: Vec<Error>,
    /// The program, or the first syntax error
    pub result: Result<Program>,
}

impl Analysis {
    /// Acceptance depends only on whether the parse completed
    pub fn accepted(&self) -> bool {
        self.result.is_ok()
    }

    pub fn program(&self) -> Option<&Program> {
        self.result.as_ref().ok()
    }
}

/// Tokenize and parse one source string
pub fn analyze(source: &str, config: LexerConfig) -> Analysis {
    let mut lexer = Lexer::with_config(source, config);
    let tokens = lexer.tokenize();
    let lex_errors = lexer.take_errors();

    let mut parser = Parser::from_tokens(tokens);
    let result = parser.parse_program();

    Analysis {
        tokens: parser.tokens().to_vec(),
        lex_errors,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lexical_errors_do_not_reject() {
        let analysis = analyze("x = 1 $", LexerConfig::default());
        assert!(analysis.accepted());
        assert_eq!(analysis.lex_errors.len(), 1);
        assert_eq!(analysis.tokens.len(), 3);
    }

    #[test]
    fn test_syntax_error_rejects_without_tree() {
        let analysis = analyze("if (1", LexerConfig::default());
        assert!(!analysis.accepted());
        assert!(analysis.program().is_none());
        assert_eq!(analysis.tokens.len(), 3);
    }
}
