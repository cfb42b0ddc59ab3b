//! End-to-end checks through the public `analyze` entry point

use pretty_assertions::assert_eq;

use pyline::frontend::ast::{Expr, Literal, Stmt};
use pyline::frontend::indent::DedentPolicy;
use pyline::frontend::lexer::{Lexer, LexerConfig};
use pyline::frontend::token::TokenKind;
use pyline::utils::Error;
use pyline::{analyze, Analysis};

fn run(source: &str) -> Analysis {
    analyze(source, LexerConfig::default())
}

fn tree(source: &str) -> String {
    match &run(source).result {
        Ok(program) => program.to_string(),
        Err(e) => panic!("{:?} rejected: {}", source, e),
    }
}

fn kinds(source: &str) -> Vec<TokenKind> {
    run(source).tokens.into_iter().map(|t| t.kind).collect()
}

#[test]
fn single_number_is_an_expression_statement() {
    for source in ["0", "7", "42", "123456"] {
        let analysis = run(source);
        let program = analysis.program().expect("accepted");
        assert_eq!(program.stmts.len(), 1);
        match &program.stmts[0] {
            Stmt::Expression(Expr::Literal { value: Literal::Number(n), .. }) => {
                assert_eq!(n.to_string(), source);
            }
            other => panic!("unexpected statement {:?}", other),
        }
    }
}

#[test]
fn literal_assignments() {
    assert_eq!(tree("x = 5"), "[Assignment(x, 5)]");
    assert_eq!(tree("x = 5.0"), "[Assignment(x, 5.0)]");
    assert_eq!(tree("x = \"hi\""), "[Assignment(x, \"hi\")]");
}

#[test]
fn bracket_style_does_not_change_elements() {
    let shapes: Vec<String> = ["x = (1,2,3)", "x = [1,2,3]", "x = {1,2,3}"]
        .iter()
        .map(|source| match &run(source).program().expect("accepted").stmts[0] {
            Stmt::TupleDecl { target, elements, .. } => {
                assert_eq!(target.name, "x");
                elements.to_string()
            }
            other => panic!("unexpected statement {:?}", other),
        })
        .collect();
    assert_eq!(shapes, vec!["(1, (2, 3))"; 3]);
}

#[test]
fn precedence_and_grouping() {
    assert_eq!(tree("1 + 2 * 3"), "[Expression(PLUS(1, MUL(2, 3)))]");
    assert_eq!(tree("(1 + 2) * 3"), "[Expression(MUL(PLUS(1, 2), 3))]");
    assert_eq!(tree("8 - 4 - 2"), "[Expression(MINUS(MINUS(8, 4), 2))]");
}

#[test]
fn block_is_wrapped_in_one_indent_and_dedent() {
    let tokens = kinds("while (x):\n    y\n    z\nw");
    let indents = tokens.iter().filter(|k| **k == TokenKind::Indent).count();
    let dedents = tokens.iter().filter(|k| **k == TokenKind::Dedent).count();
    assert_eq!((indents, dedents), (1, 1));

    assert_eq!(tree("while (x):\n    y\n    z\nw"), "[While(x, [Expression(y), Expression(z)]), Expression(w)]");
}

#[test]
fn same_width_lines_have_no_layout_tokens() {
    assert_eq!(
        kinds("a\nb\nc"),
        vec![
            TokenKind::Ident("a".to_string()),
            TokenKind::Ident("b".to_string()),
            TokenKind::Ident("c".to_string()),
        ]
    );
}

#[test]
fn incomplete_input_is_rejected() {
    for source in ["if (1", "if (x):\n    y", "x = (1, 2", "for i in"] {
        let analysis = run(source);
        assert!(!analysis.accepted(), "{:?} should be rejected", source);
        assert!(analysis.program().is_none());
    }

    match run("if (1").result {
        Err(Error::UnexpectedEof { line, .. }) => assert_eq!(line, 1),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn comments_produce_no_tokens() {
    assert_eq!(kinds("3 # comment\n4"), vec![TokenKind::Number(3), TokenKind::Number(4)]);
}

#[test]
fn repeated_runs_are_identical() {
    let source = "for i in range(3):\n    if (i == 1):\n        x = [1, 2]\n    else:\n        y = i + 1\nz\n";

    let first = run(source);
    let second = run(source);
    assert_eq!(first.tokens, second.tokens);
    assert_eq!(first.result, second.result);

    let mut lexer = Lexer::new(source);
    assert_eq!(lexer.tokenize(), lexer.tokenize());
}

#[test]
fn lexical_errors_do_not_change_the_verdict() {
    let analysis = run("x = 1\n@\ny = 2");
    assert!(analysis.accepted());
    assert_eq!(analysis.lex_errors.len(), 1);
    assert_eq!(analysis.lex_errors[0].to_string(), "Illegal character '@' at line 2");
    assert_eq!(tree("x = 1\n@\ny = 2"), "[Assignment(x, 1), Assignment(y, 2)]");
}

#[test]
fn dedent_policy_controls_multi_level_closes() {
    let source = "if (a):\n  if (b):\n    c\nd";

    let unwind = analyze(source, LexerConfig::default());
    assert!(unwind.accepted());

    let single = analyze(
        source,
        LexerConfig {
            dedent: DedentPolicy::Single,
            ..LexerConfig::default()
        },
    );
    assert!(!single.accepted());
}

#[test]
fn blank_lines_can_be_ignored() {
    let source = "if (a):\n    b\n\n    c\n";
    let config = LexerConfig {
        skip_blank_lines: true,
        ..LexerConfig::default()
    };
    let analysis = analyze(source, config);
    assert_eq!(
        analysis.program().map(|p| p.to_string()),
        Some("[If(a, [Expression(b), Expression(c)])]".to_string())
    );
}
