//! Lexer for Pyline
//!
//! Converts source text into a stream of tokens. Every newline together with
//! the spaces and tabs after it is one indentation event, which may produce
//! INDENT or DEDENT tokens. Illegal characters are reported and skipped.

use serde::Serialize;

use crate::frontend::indent::{DedentPolicy, IndentChange, IndentStack};
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Span};

/// Lexer options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LexerConfig {
    /// How many levels one dedent event may close
    pub dedent: DedentPolicy,
    /// Ignore indentation events on lines that are empty or only a comment
    pub skip_blank_lines: bool,
}

/// The lexer state
pub struct Lexer {
    /// Source code as chars
    source: Vec<char>,
    /// Current position in source
    pos: usize,
    /// Start position of current token
    start: usize,
    /// Current line (1-based)
    line: usize,
    indents: IndentStack,
    config: LexerConfig,
    /// Lexical errors from the last `tokenize` call
    errors: Vec<Error>,
}

impl Lexer {
    /// Create a new lexer with the default configuration
    pub fn new(source: &str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    pub fn with_config(source: &str, config: LexerConfig) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            start: 0,
            line: 1,
            indents: IndentStack::new(),
            config,
            errors: Vec::new(),
        }
    }

    /// Lexical errors reported by the last `tokenize` call
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Consume the next char if it is `expected`
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Create a span from start to current position
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos, self.line)
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.pos].iter().collect()
    }

    fn report(&mut self, error: Error) {
        log::warn!("{}", error);
        self.errors.push(error);
    }

    fn reset(&mut self) {
        self.pos = 0;
        self.start = 0;
        self.line = 1;
        self.indents.reset();
        self.errors.clear();
    }

    /// Tokenize the entire source
    ///
    /// Each call starts over from the beginning with a fresh indentation
    /// stack, so repeated calls return the same tokens.
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.reset();
        let mut tokens = Vec::new();

        while let Some(c) = self.peek() {
            self.start = self.pos;
            match c {
                '\n' => self.read_indentation(&mut tokens),
                ' ' | '\t' => {
                    self.advance();
                }
                '#' => self.skip_comment(),
                c if c.is_ascii_alphabetic() || c == '_' => {
                    let token = self.read_identifier();
                    tokens.push(token);
                }
                c if c.is_ascii_digit() => tokens.extend(self.read_number()),
                '"' => tokens.extend(self.read_string()),
                _ => tokens.extend(self.read_symbol()),
            }
        }

        log::debug!(
            "tokenized {} chars into {} tokens ({} lexical errors, {} blocks open)",
            self.source.len(),
            tokens.len(),
            self.errors.len(),
            self.indents.depth()
        );
        tokens
    }

    /// Handle a newline and the indentation that follows it
    fn read_indentation(&mut self, tokens: &mut Vec<Token>) {
        self.advance(); // '\n'
        let mut width = 0;
        while let Some(' ' | '\t') = self.peek() {
            self.advance();
            width += 1;
        }
        // Layout tokens belong to the line the newline ends
        let span = self.make_span();
        self.line += 1;

        if self.config.skip_blank_lines && matches!(self.peek(), Some('\n') | Some('#')) {
            return;
        }

        match self.indents.apply(width, self.config.dedent) {
            IndentChange::Indent => tokens.push(Token::new(TokenKind::Indent, span)),
            IndentChange::Same => {}
            IndentChange::Dedent { count, aligned } => {
                tokens.extend((0..count).map(|_| Token::new(TokenKind::Dedent, span)));
                if !aligned && self.config.dedent == DedentPolicy::Unwind {
                    let expected = self.indents.top();
                    self.report(Error::InconsistentDedent {
                        width,
                        expected,
                        line: span.line,
                        span,
                    });
                }
            }
        }
    }

    /// Skip a `#` comment up to (not including) the newline
    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = self.lexeme();
        let kind = TokenKind::keyword_from_str(&text).unwrap_or_else(|| TokenKind::Ident(text));
        self.make_token(kind)
    }

    fn consume_digits(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read a number literal (integer or float)
    fn read_number(&mut self) -> Option<Token> {
        self.consume_digits();

        // A float needs digits on both sides of the point
        let is_float = self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit());
        if is_float {
            self.advance(); // consume '.'
            self.consume_digits();
        }

        let text = self.lexeme();
        let kind = if is_float {
            text.parse::<f64>().ok().map(TokenKind::Float)
        } else {
            text.parse::<i64>().ok().map(TokenKind::Number)
        };

        match kind {
            Some(kind) => Some(self.make_token(kind)),
            None => {
                let span = self.make_span();
                self.report(Error::InvalidNumber { text, line: self.line, span });
                None
            }
        }
    }

    /// Read a string literal up to the next quote on the same line
    fn read_string(&mut self) -> Option<Token> {
        let body = self.pos + 1;
        let close = self.source[body..]
            .iter()
            .position(|&c| c == '"' || c == '\n')
            .map(|offset| body + offset)
            .filter(|&end| self.source[end] == '"');

        match close {
            Some(end) => {
                let value: String = self.source[body..end].iter().collect();
                self.pos = end + 1;
                Some(self.make_token(TokenKind::Str(value)))
            }
            None => {
                // No closing quote: the quote itself is illegal
                self.advance();
                self.illegal('"');
                None
            }
        }
    }

    /// Read an operator or delimiter
    fn read_symbol(&mut self) -> Option<Token> {
        let c = self.advance()?;

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => {
                if self.match_char('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            '!' if self.match_char('=') => TokenKind::Ne,
            '<' => {
                if self.match_char('=') {
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            _ => {
                self.illegal(c);
                return None;
            }
        };

        Some(self.make_token(kind))
    }

    fn illegal(&mut self, ch: char) {
        let span = self.make_span();
        self.report(Error::IllegalCharacter { ch, line: self.line, span });
    }
}
