//! AST Printer - render Pyline trees as text
//!
//! `Display` gives the one-line operator-call form, e.g. `PLUS(1, MUL(2, 3))`.
//! `print_program` gives an indented outline for the driver.

use std::fmt;

use crate::frontend::ast::*;

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Single(value) => write!(f, "{}", value),
            Element::Pair(value, rest) => write!(f, "({}, {})", value, rest),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { value, .. } => write!(f, "{}", value),
            Expr::Ident(ident) => f.write_str(&ident.name),
            Expr::Binary { op, left, right, .. } => write!(f, "{}({}, {})", op.name(), left, right),
            Expr::AssignSum { target, augend, addend, .. } => {
                write!(f, "ASSIGN_SUM({}, {}, {})", target, augend, addend)
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, stmt) in self.stmts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", stmt)?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expression(expr) => write!(f, "Expression({})", expr),
            Stmt::Assignment { target, value, .. } => write!(f, "Assignment({}, {})", target.name, value),
            Stmt::TupleDecl { target, kind, elements, .. } => {
                write!(f, "TupleDecl({}, {}, {})", target.name, kind.name(), elements)
            }
            Stmt::If { cond, then_block, .. } => write!(f, "If({}, {})", cond, then_block),
            Stmt::IfElse { cond, then_block, else_block, .. } => {
                write!(f, "IfElse({}, {}, {})", cond, then_block, else_block)
            }
            Stmt::While { cond, body, .. } => write!(f, "While({}, {})", cond, body),
            Stmt::For { var, source, body, .. } => write!(f, "For({}, {}, {})", var.name, source.name, body),
            Stmt::ForRange { var, bound, body, .. } => write!(f, "ForRange({}, {}, {})", var.name, bound, body),
            Stmt::ForIn { var, text, body, .. } => write!(f, "ForIn({}, \"{}\", {})", var.name, text, body),
        }
    }
}

/// Pretty printer for whole programs
pub struct ProgramPrinter {
    output: String,
    indent: usize,
}

impl ProgramPrinter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Print a program as an indented outline
    pub fn print_program(&mut self, program: &Program) -> String {
        self.output.clear();
        self.indent = 0;
        self.line("Program");
        self.print_body(program);
        std::mem::take(&mut self.output)
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn print_body(&mut self, body: &Program) {
        self.indent += 1;
        for stmt in &body.stmts {
            self.print_stmt(stmt);
        }
        self.indent -= 1;
    }

    fn print_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(_) | Stmt::Assignment { .. } | Stmt::TupleDecl { .. } => {
                self.line(&stmt.to_string());
            }
            Stmt::If { cond, then_block, .. } => {
                self.line(&format!("If {}", cond));
                self.print_body(then_block);
            }
            Stmt::IfElse { cond, then_block, else_block, .. } => {
                self.line(&format!("If {}", cond));
                self.print_body(then_block);
                self.line("Else");
                self.print_body(else_block);
            }
            Stmt::While { cond, body, .. } => {
                self.line(&format!("While {}", cond));
                self.print_body(body);
            }
            Stmt::For { var, source, body, .. } => {
                self.line(&format!("For {} in {}", var.name, source.name));
                self.print_body(body);
            }
            Stmt::ForRange { var, bound, body, .. } => {
                self.line(&format!("For {} in range({})", var.name, bound));
                self.print_body(body);
            }
            Stmt::ForIn { var, text, body, .. } => {
                self.line(&format!("For {} in \"{}\"", var.name, text));
                self.print_body(body);
            }
        }
    }
}

impl Default for ProgramPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to print a program
pub fn print_program(program: &Program) -> String {
    ProgramPrinter::new().print_program(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;
    use crate::frontend::parser::Parser;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Program {
        Parser::new(Lexer::new(source)).parse_program().unwrap()
    }

    #[test]
    fn test_one_line_form() {
        let program = parse("x = 5.0\ny = [\"a\", 2]\nif (x == 1):\n  z\nelse:\n  w\n");
        assert_eq!(
            program.to_string(),
            "[Assignment(x, 5.0), TupleDecl(y, list, (\"a\", 2)), IfElse(DEQUALS(x, 1), [Expression(z)], [Expression(w)])]"
        );
    }

    #[test]
    fn test_outline() {
        let program = parse("for i in range(3):\n    while (i):\n        i = 0\nfor c in \"ab\":\n    c\n");
        assert_eq!(
            print_program(&program),
            "Program\n  For i in range(3)\n    While i\n      Assignment(i, 0)\n  For c in \"ab\"\n    Expression(c)\n"
        );
    }
}
