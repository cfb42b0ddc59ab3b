//! Parser for Pyline
//!
//! Recursive descent for statements, precedence climbing for expressions.
//! The first token that cannot continue the grammar aborts the parse.

use crate::frontend::ast::*;
use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind, PREC_COMPARE, PREC_MUL};
use crate::utils::{Error, Result, Span};

/// Deepest nesting of blocks and sub-expressions accepted
pub const MAX_NESTING: usize = 128;

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Current nesting of blocks and sub-expressions
    depth: usize,
}

impl Parser {
    /// Create a new parser from a lexer
    pub fn new(mut lexer: Lexer) -> Self {
        Self::from_tokens(lexer.tokenize())
    }

    /// Create a parser from pre-tokenized input
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0, depth: 0 }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<&TokenKind> {
        self.current().map(|t| &t.kind)
    }

    fn peek_kind(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.current().cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind()
            .is_some_and(|k| std::mem::discriminant(k) == std::mem::discriminant(kind))
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token> {
        if self.check(&expected) {
            self.advance()
                .ok_or_else(|| self.unexpected(&format!("'{}'", expected)))
        } else {
            Err(self.unexpected(&format!("'{}'", expected)))
        }
    }

    fn at_binary_operator(&self) -> bool {
        self.current_kind()
            .is_some_and(|k| k.binary_precedence().is_some())
    }

    /// Span of the last consumed token
    fn previous_span(&self) -> Span {
        self.tokens[..self.pos]
            .last()
            .map(|t| t.span)
            .unwrap_or_default()
    }

    /// Run `f` one nesting level deeper, failing past `MAX_NESTING`
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.unexpected(&format!("at most {} levels of nesting", MAX_NESTING)));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Syntax error at the current token, or at end of input
    fn unexpected(&self, expected: &str) -> Error {
        match self.current() {
            Some(token) => Error::UnexpectedToken {
                found: token.kind.to_string(),
                expected: expected.to_string(),
                line: token.span.line,
                span: token.span,
            },
            None => Error::UnexpectedEof {
                expected: expected.to_string(),
                line: self.tokens.last().map_or(1, |t| t.span.line),
            },
        }
    }

    // ==================== Statements ====================

    /// Parse a complete program
    pub fn parse_program(&mut self) -> Result<Program> {
        self.pos = 0;
        self.depth = 0;
        let result = self.parse_statements().and_then(|program| {
            if self.is_at_end() {
                Ok(program)
            } else {
                Err(self.unexpected("statement"))
            }
        });

        match &result {
            Ok(program) => log::debug!("parsed {} top-level statements", program.stmts.len()),
            Err(e) => log::debug!("parse rejected: {}", e),
        }
        result
    }

    /// One or more statements, up to a DEDENT or end of input
    fn parse_statements(&mut self) -> Result<Program> {
        let mut stmts = vec![self.parse_stmt()?];
        while !self.is_at_end() && !self.check(&TokenKind::Dedent) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Program { stmts })
    }

    /// INDENT statements DEDENT
    fn parse_block(&mut self) -> Result<Program> {
        self.expect(TokenKind::Indent)?;
        let body = self.nested(Self::parse_statements)?;
        self.expect(TokenKind::Dedent)?;
        Ok(body)
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        match self.current_kind() {
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::While) => self.parse_while(),
            Some(TokenKind::For) => self.parse_for(),
            Some(TokenKind::Ident(_)) if self.peek_kind(1) == Some(&TokenKind::Eq) => {
                match self.parse_declaration()? {
                    Some(stmt) => Ok(stmt),
                    None => Ok(Stmt::Expression(self.parse_expr()?)),
                }
            }
            Some(_) => Ok(Stmt::Expression(self.parse_expr()?)),
            None => Err(self.unexpected("statement")),
        }
    }

    fn parse_ident(&mut self) -> Result<Ident> {
        match self.current() {
            Some(Token { kind: TokenKind::Ident(name), span }) => {
                let ident = Ident { name: name.clone(), span: *span };
                self.pos += 1;
                Ok(ident)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn parse_literal(&mut self) -> Result<Literal> {
        match self.current_kind().and_then(TokenKind::literal) {
            Some(value) => {
                self.pos += 1;
                Ok(value)
            }
            None => Err(self.unexpected("literal")),
        }
    }

    /// `if (cond): block` with an optional `else: block`
    fn parse_if(&mut self) -> Result<Stmt> {
        let start = self.expect(TokenKind::If)?.span;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Colon)?;
        let then_block = self.parse_block()?;

        if self.consume(&TokenKind::Else) {
            self.expect(TokenKind::Colon)?;
            let else_block = self.parse_block()?;
            return Ok(Stmt::IfElse {
                cond,
                then_block,
                else_block,
                span: start.merge(&self.previous_span()),
            });
        }

        Ok(Stmt::If {
            cond,
            then_block,
            span: start.merge(&self.previous_span()),
        })
    }

    /// `while (cond): block` or `while cond: block`
    fn parse_while(&mut self) -> Result<Stmt> {
        let start = self.expect(TokenKind::While)?.span;

        let (cond, parenthesized) = match self.parse_paren_condition()? {
            Some(cond) => (cond, true),
            None => (self.parse_expr()?, false),
        };
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block()?;

        Ok(Stmt::While {
            cond,
            body,
            parenthesized,
            span: start.merge(&self.previous_span()),
        })
    }

    /// `( expr )` directly followed by `:`; rewinds and returns None otherwise
    fn parse_paren_condition(&mut self) -> Result<Option<Expr>> {
        if !self.check(&TokenKind::LParen) {
            return Ok(None);
        }
        let checkpoint = self.pos;
        self.advance();
        let cond = self.parse_expr()?;
        if self.consume(&TokenKind::RParen) && self.check(&TokenKind::Colon) {
            return Ok(Some(cond));
        }
        self.pos = checkpoint;
        Ok(None)
    }

    /// The three `for` forms: over an identifier, a string, or `range(expr)`
    fn parse_for(&mut self) -> Result<Stmt> {
        let start = self.expect(TokenKind::For)?.span;
        let var = self.parse_ident()?;
        self.expect(TokenKind::In)?;

        match self.current_kind() {
            Some(TokenKind::Ident(_)) => {
                let source = self.parse_ident()?;
                self.expect(TokenKind::Colon)?;
                let body = self.parse_block()?;
                Ok(Stmt::For {
                    var,
                    source,
                    body,
                    span: start.merge(&self.previous_span()),
                })
            }
            Some(TokenKind::Str(text)) => {
                let text = text.clone();
                self.advance();
                self.expect(TokenKind::Colon)?;
                let body = self.parse_block()?;
                Ok(Stmt::ForIn {
                    var,
                    text,
                    body,
                    span: start.merge(&self.previous_span()),
                })
            }
            Some(TokenKind::Range) => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let bound = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                self.expect(TokenKind::Colon)?;
                let body = self.parse_block()?;
                Ok(Stmt::ForRange {
                    var,
                    bound,
                    body,
                    span: start.merge(&self.previous_span()),
                })
            }
            _ => Err(self.unexpected("identifier, string or 'range'")),
        }
    }

    /// Statement-level `ID = ...` forms
    ///
    /// Returns None with the cursor rewound when the statement should be
    /// read as an expression instead.
    fn parse_declaration(&mut self) -> Result<Option<Stmt>> {
        let checkpoint = self.pos;
        let target = self.parse_ident()?;
        self.expect(TokenKind::Eq)?;

        let decl = match self.current_kind() {
            Some(TokenKind::LBracket) => Some(self.parse_collection(target, CollectionKind::List)?),
            Some(TokenKind::LBrace) => Some(self.parse_collection(target, CollectionKind::Dict)?),
            Some(TokenKind::LParen) => {
                let first_is_literal = self.peek_kind(1).is_some_and(TokenKind::is_literal);
                match self.peek_kind(2) {
                    Some(TokenKind::Comma) if first_is_literal => {
                        Some(self.parse_collection(target, CollectionKind::Tuple)?)
                    }
                    // `x = (1)` is a one-element tuple unless an operator follows
                    Some(TokenKind::RParen) if first_is_literal => {
                        let stmt = self.parse_collection(target, CollectionKind::Tuple)?;
                        (!self.at_binary_operator()).then_some(stmt)
                    }
                    _ => None,
                }
            }
            Some(kind) if kind.is_literal() => {
                let value = self.parse_literal()?;
                let span = target.span.merge(&self.previous_span());
                (!self.at_binary_operator()).then_some(Stmt::Assignment { target, value, span })
            }
            _ => None,
        };

        if decl.is_none() {
            self.pos = checkpoint;
        }
        Ok(decl)
    }

    fn parse_collection(&mut self, target: Ident, kind: CollectionKind) -> Result<Stmt> {
        let (open, close) = match kind {
            CollectionKind::Tuple => (TokenKind::LParen, TokenKind::RParen),
            CollectionKind::List => (TokenKind::LBracket, TokenKind::RBracket),
            CollectionKind::Dict => (TokenKind::LBrace, TokenKind::RBrace),
        };
        self.expect(open)?;
        let elements = self.parse_elements()?;
        let end = self.expect(close)?;

        Ok(Stmt::TupleDecl {
            span: target.span.merge(&end.span),
            target,
            kind,
            elements,
        })
    }

    /// literal ("," literal)*
    fn parse_elements(&mut self) -> Result<Element> {
        let mut values = vec![self.parse_literal()?];
        while self.consume(&TokenKind::Comma) {
            values.push(self.parse_literal()?);
        }
        Element::from_values(values).ok_or_else(|| self.unexpected("literal"))
    }

    // ==================== Expression Parsing ====================

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_expr_bp(PREC_COMPARE)
    }

    /// Parse expression with binding power (precedence climbing)
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr> {
        self.nested(|p| {
            let left = p.parse_primary()?;
            p.parse_expr_bp_from(left, min_bp)
        })
    }

    /// Continue climbing with `left` already parsed
    fn parse_expr_bp_from(&mut self, mut left: Expr, min_bp: u8) -> Result<Expr> {
        loop {
            let Some(kind) = self.current_kind() else {
                break;
            };
            let (Some(bp), Some(op)) = (kind.binary_precedence(), Self::token_to_binop(kind)) else {
                break;
            };
            if bp < min_bp {
                break;
            }
            self.advance();

            if op == BinOp::Assign {
                left = self.parse_assign_value(left, bp)?;
                continue;
            }

            let next_bp = if op.is_right_assoc() { bp } else { bp + 1 };
            let right = self.parse_expr_bp(next_bp)?;
            let span = left.span().merge(&right.span());
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    /// Right-hand side of an in-expression `=`
    ///
    /// Exactly `augend + addend` with no operator after it is the dedicated
    /// `AssignSum` form. Otherwise the terms already read seed an ordinary
    /// right-grouping climb, so no token is parsed twice.
    fn parse_assign_value(&mut self, target: Expr, bp: u8) -> Result<Expr> {
        let augend = self.parse_expr_bp(PREC_MUL)?;

        let seed = if self.consume(&TokenKind::Plus) {
            let addend = self.parse_expr_bp(PREC_MUL)?;
            if !self.at_binary_operator() {
                let span = target.span().merge(&addend.span());
                return Ok(Expr::AssignSum {
                    target: Box::new(target),
                    augend: Box::new(augend),
                    addend: Box::new(addend),
                    span,
                });
            }
            let span = augend.span().merge(&addend.span());
            Expr::Binary {
                op: BinOp::Add,
                left: Box::new(augend),
                right: Box::new(addend),
                span,
            }
        } else {
            augend
        };

        let value = self.nested(|p| p.parse_expr_bp_from(seed, bp))?;
        let span = target.span().merge(&value.span());
        Ok(Expr::Binary {
            op: BinOp::Assign,
            left: Box::new(target),
            right: Box::new(value),
            span,
        })
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let Some(token) = self.current().cloned() else {
            return Err(self.unexpected("expression"));
        };

        match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Expr::Ident(Ident { name, span: token.span }))
            }
            TokenKind::Number(_) | TokenKind::Float(_) | TokenKind::Str(_) => {
                let value = self.parse_literal()?;
                Ok(Expr::Literal { value, span: token.span })
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn token_to_binop(kind: &TokenKind) -> Option<BinOp> {
        let op = match kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Eq => BinOp::Assign,
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::Ne => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Le => BinOp::Le,
            TokenKind::Ge => BinOp::Ge,
            _ => return None,
        };
        Some(op)
    }
}
