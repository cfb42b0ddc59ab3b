//! Token definitions for Pyline

use std::fmt;

use crate::frontend::ast::Literal;
use crate::utils::Span;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Line the token starts on
    pub fn line(&self) -> usize {
        self.span.line
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} line {}", self.kind.name(), self.kind, self.span.line)
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ============ Literals and Identifiers ============
    /// Integer literal
    Number(i64),
    /// Floating-point literal
    Float(f64),
    /// String literal, quotes stripped
    Str(String),
    /// Identifier
    Ident(String),

    // ============ Keywords ============
    /// while
    While,
    /// if
    If,
    /// else
    Else,
    /// for
    For,
    /// in
    In,
    /// range
    Range,

    // ============ Operators ============
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// =
    Eq,
    /// ==
    EqEq,
    /// !=
    Ne,
    /// <
    Lt,
    /// >
    Gt,
    /// <=
    Le,
    /// >=
    Ge,

    // ============ Delimiters ============
    /// (
    LParen,
    /// )
    RParen,
    /// {
    LBrace,
    /// }
    RBrace,
    /// [
    LBracket,
    /// ]
    RBracket,
    /// ,
    Comma,
    /// :
    Colon,

    // ============ Layout ============
    /// Indentation increased
    Indent,
    /// Indentation decreased
    Dedent,
}

/// Precedence of `=` and the comparison operators
pub const PREC_COMPARE: u8 = 1;
/// Precedence of `+` and `-`
pub const PREC_ADD: u8 = 2;
/// Precedence of `*` and `/`
pub const PREC_MUL: u8 = 3;

impl TokenKind {
    /// Try to convert an identifier to a keyword
    ///
    /// `range` is its own token rule rather than a reserved word, but an
    /// exact-length match resolves to the same answer.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "while" => Some(TokenKind::While),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "for" => Some(TokenKind::For),
            "in" => Some(TokenKind::In),
            "range" => Some(TokenKind::Range),
            _ => None,
        }
    }

    /// Kind name as shown in token dumps
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "NUMBER",
            TokenKind::Float(_) => "FLOAT",
            TokenKind::Str(_) => "STRING",
            TokenKind::Ident(_) => "ID",
            TokenKind::While => "WHILE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::For => "FOR",
            TokenKind::In => "IN",
            TokenKind::Range => "RANGE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MUL",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Eq => "EQUALS",
            TokenKind::EqEq => "DEQUALS",
            TokenKind::Ne => "NEQUALS",
            TokenKind::Lt => "LESSTHAN",
            TokenKind::Gt => "GREATERTHAN",
            TokenKind::Le => "LESSTHANEQ",
            TokenKind::Ge => "GREATERTHANEQ",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "SQBR",
            TokenKind::RBracket => "SQBL",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
        }
    }

    /// Literal payload for NUMBER, FLOAT and STRING tokens
    pub fn literal(&self) -> Option<Literal> {
        match self {
            TokenKind::Number(n) => Some(Literal::Number(*n)),
            TokenKind::Float(x) => Some(Literal::Float(*x)),
            TokenKind::Str(s) => Some(Literal::String(s.clone())),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, TokenKind::Number(_) | TokenKind::Float(_) | TokenKind::Str(_))
    }

    /// Get the precedence of a binary operator (for precedence climbing)
    /// Returns None if not a binary operator
    pub fn binary_precedence(&self) -> Option<u8> {
        match self {
            TokenKind::Eq
            | TokenKind::EqEq
            | TokenKind::Ne
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::Le
            | TokenKind::Ge => Some(PREC_COMPARE),

            TokenKind::Plus | TokenKind::Minus => Some(PREC_ADD),

            TokenKind::Star | TokenKind::Slash => Some(PREC_MUL),

            _ => None,
        }
    }
}

/// Renders the token's value: the payload for literals and identifiers,
/// the source text for everything else
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Number(n) => return write!(f, "{}", n),
            TokenKind::Float(x) => return write!(f, "{:?}", x),
            TokenKind::Str(s) => return write!(f, "\"{}\"", s),
            TokenKind::Ident(name) => return f.write_str(name),
            TokenKind::While => "while",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::Range => "range",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Ne => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Le => "<=",
            TokenKind::Ge => ">=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keywords() {
        assert_eq!(TokenKind::keyword_from_str("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::keyword_from_str("range"), Some(TokenKind::Range));
        assert_eq!(TokenKind::keyword_from_str("While"), None);
        assert_eq!(TokenKind::keyword_from_str("ranges"), None);
    }

    #[test]
    fn test_display() {
        let token = Token::new(TokenKind::Float(5.0), Span::new(4, 7, 2));
        assert_eq!(token.to_string(), "FLOAT 5.0 line 2");
        assert_eq!(TokenKind::LBracket.name(), "SQBR");
        assert_eq!(TokenKind::Str("hi".into()).to_string(), "\"hi\"");
    }

    #[test]
    fn test_precedence_rows() {
        assert!(TokenKind::Star.binary_precedence() > TokenKind::Plus.binary_precedence());
        assert!(TokenKind::Plus.binary_precedence() > TokenKind::Lt.binary_precedence());
        assert_eq!(TokenKind::Eq.binary_precedence(), TokenKind::EqEq.binary_precedence());
        assert_eq!(TokenKind::Comma.binary_precedence(), None);
    }
}
