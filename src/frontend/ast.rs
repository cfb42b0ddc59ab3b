//! Abstract Syntax Tree definitions for Pyline

use serde::Serialize;

use crate::utils::Span;

/// A sequence of statements: the whole input, or the body of a block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

/// Identifier with its location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Number(i64),
    Float(f64),
    String(String),
}

/// Bracket style a literal declaration was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollectionKind {
    /// `( ... )`
    Tuple,
    /// `[ ... ]`
    List,
    /// `{ ... }`
    Dict,
}

impl CollectionKind {
    pub fn name(&self) -> &'static str {
        match self {
            CollectionKind::Tuple => "tuple",
            CollectionKind::List => "list",
            CollectionKind::Dict => "dict",
        }
    }
}

/// Contents of a literal declaration: `1, 2, 3` is `Pair(1, Pair(2, Single(3)))`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Element {
    Single(Literal),
    Pair(Literal, Box<Element>),
}

impl Element {
    /// Build the right-nested chain for a non-empty list of values
    pub fn from_values(values: Vec<Literal>) -> Option<Element> {
        let mut values = values.into_iter().rev();
        let last = Element::Single(values.next()?);
        Some(values.fold(last, |rest, value| Element::Pair(value, Box::new(rest))))
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// Bare expression
    Expression(Expr),
    /// `x = 5`, `x = 5.0`, `x = "hi"`
    Assignment {
        target: Ident,
        value: Literal,
        span: Span,
    },
    /// `x = (1, 2)`, `x = [1, 2]`, `x = {1, 2}`
    TupleDecl {
        target: Ident,
        kind: CollectionKind,
        elements: Element,
        span: Span,
    },
    If {
        cond: Expr,
        then_block: Program,
        span: Span,
    },
    IfElse {
        cond: Expr,
        then_block: Program,
        else_block: Program,
        span: Span,
    },
    While {
        cond: Expr,
        body: Program,
        /// Written as `while (cond):` rather than `while cond:`
        parenthesized: bool,
        span: Span,
    },
    /// `for x in xs:`
    For {
        var: Ident,
        source: Ident,
        body: Program,
        span: Span,
    },
    /// `for i in range(n):`
    ForRange {
        var: Ident,
        bound: Expr,
        body: Program,
        span: Span,
    },
    /// `for c in "text":`
    ForIn {
        var: Ident,
        text: String,
        body: Program,
        span: Span,
    },
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Literal {
        value: Literal,
        span: Span,
    },
    Ident(Ident),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    /// The dedicated `target = augend + addend` form
    AssignSum {
        target: Box<Expr>,
        augend: Box<Expr>,
        addend: Box<Expr>,
        span: Span,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    /// `=` inside an expression
    Assign,
    /// `==`
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl BinOp {
    /// Operator name as used in tree dumps
    pub fn name(&self) -> &'static str {
        match self {
            BinOp::Add => "PLUS",
            BinOp::Sub => "MINUS",
            BinOp::Mul => "MUL",
            BinOp::Div => "DIVIDE",
            BinOp::Assign => "EQUALS",
            BinOp::Eq => "DEQUALS",
            BinOp::Ne => "NEQUALS",
            BinOp::Lt => "LESSTHAN",
            BinOp::Gt => "GREATERTHAN",
            BinOp::Le => "LESSTHANEQ",
            BinOp::Ge => "GREATERTHANEQ",
        }
    }

    /// `=` and the comparisons group to the right
    pub fn is_right_assoc(&self) -> bool {
        !matches!(self, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div)
    }
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal { span, .. } => *span,
            Expr::Ident(ident) => ident.span,
            Expr::Binary { span, .. } => *span,
            Expr::AssignSum { span, .. } => *span,
        }
    }
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Expression(expr) => expr.span(),
            Stmt::Assignment { span, .. }
            | Stmt::TupleDecl { span, .. }
            | Stmt::If { span, .. }
            | Stmt::IfElse { span, .. }
            | Stmt::While { span, .. }
            | Stmt::For { span, .. }
            | Stmt::ForRange { span, .. }
            | Stmt::ForIn { span, .. } => *span,
        }
    }
}
