//! Pyline command-line driver
//!
//! Reads one piece of source text, prints its tokens and parse tree, and
//! reports whether the input was accepted.

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use pyline::feedback::{Diagnostic, Report, TokenRecord};
use pyline::frontend::indent::DedentPolicy;
use pyline::frontend::lexer::{Lexer, LexerConfig};
use pyline::frontend::printer::print_program;
use pyline::frontend::{analyze, Analysis};

/// Pyline lexer and parser
#[derive(Parser, Debug)]
#[command(name = "pyline")]
#[command(version)]
#[command(about = "Lexer and parser for a small Python-like syntax")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print tokens, the parse tree and the verdict (default)
    Parse(SourceArgs),
    /// Print tokens and lexical errors only
    Lex(SourceArgs),
    /// Print only the verdict
    Check(SourceArgs),
    /// Print version information
    Version,
}

#[derive(Args, Debug, Clone)]
struct SourceArgs {
    /// Input source file ("-" reads stdin); prompts for one line if omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Source text given directly
    #[arg(short, long, value_name = "TEXT", conflicts_with = "file")]
    code: Option<String>,

    /// Interpret \n, \t and \\ escapes in the source text
    #[arg(long)]
    escapes: bool,

    /// How many blocks one dedent may close
    #[arg(long, value_enum, default_value_t = DedentArg::Unwind)]
    dedent: DedentArg,

    /// Ignore indentation on empty and comment-only lines
    #[arg(long)]
    skip_blank_lines: bool,

    /// Emit a JSON report instead of text
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum DedentArg {
    /// One level per dedent
    Single,
    /// Every level down to the new width
    Unwind,
}

impl From<DedentArg> for DedentPolicy {
    fn from(arg: DedentArg) -> Self {
        match arg {
            DedentArg::Single => DedentPolicy::Single,
            DedentArg::Unwind => DedentPolicy::Unwind,
        }
    }
}

impl SourceArgs {
    fn config(&self) -> LexerConfig {
        LexerConfig {
            dedent: self.dedent.into(),
            skip_blank_lines: self.skip_blank_lines,
        }
    }

    fn read_source(&self) -> Result<String> {
        let text = match (&self.code, &self.file) {
            (Some(code), _) => code.clone(),
            (None, Some(path)) if path.as_os_str() == "-" => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read source from stdin")?;
                text
            }
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            (None, None) => prompt_line()?,
        };

        Ok(if self.escapes { unescape(&text) } else { text })
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Some(Commands::Parse(args)) => run_parse(&args),
        Some(Commands::Lex(args)) => run_lex(&args),
        Some(Commands::Check(args)) => run_check(&args),
        Some(Commands::Version) => {
            println!("pyline {}", env!("CARGO_PKG_VERSION"));
            println!("License: Apache-2.0");
            Ok(true)
        }
        None => run_parse(&cli.source),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

/// Read one line from the terminal, like an interactive prompt
fn prompt_line() -> Result<String> {
    print!("Enter code: ");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read source from stdin")?;
    Ok(line.trim_end_matches(&['\n', '\r'][..]).to_string())
}

/// Expand `\n`, `\t` and `\\`; other backslashes are kept as written
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn report_lex_errors(analysis: &Analysis) {
    for error in &analysis.lex_errors {
        eprintln!("{}", error);
    }
}

fn run_parse(args: &SourceArgs) -> Result<bool> {
    let source = args.read_source()?;
    let analysis = analyze(&source, args.config());

    if args.json {
        println!("{}", Report::from_analysis(&analysis).to_json());
        return Ok(analysis.accepted());
    }

    report_lex_errors(&analysis);
    for token in &analysis.tokens {
        println!("{}", token);
    }
    println!();

    match &analysis.result {
        Ok(program) => {
            print!("{}", print_program(program));
            println!();
            println!("Accepted!");
        }
        Err(e) => {
            eprintln!("{}", e);
            println!("Rejected!");
        }
    }
    Ok(analysis.accepted())
}

fn run_lex(args: &SourceArgs) -> Result<bool> {
    let source = args.read_source()?;
    let mut lexer = Lexer::with_config(&source, args.config());
    let tokens = lexer.tokenize();

    if args.json {
        let records: Vec<_> = tokens.iter().map(TokenRecord::from).collect();
        let diagnostics: Vec<_> = lexer.errors().iter().map(Diagnostic::from).collect();
        let json = serde_json::json!({ "tokens": records, "diagnostics": diagnostics });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        for error in lexer.errors() {
            eprintln!("{}", error);
        }
        for token in &tokens {
            println!("{}", token);
        }
    }
    Ok(true)
}

fn run_check(args: &SourceArgs) -> Result<bool> {
    let source = args.read_source()?;
    let analysis = analyze(&source, args.config());

    if args.json {
        let json = serde_json::json!({
            "accepted": analysis.accepted(),
            "error": analysis.result.as_ref().err().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        report_lex_errors(&analysis);
        if let Err(e) = &analysis.result {
            eprintln!("{}", e);
        }
        println!("{}", if analysis.accepted() { "Accepted!" } else { "Rejected!" });
    }
    Ok(analysis.accepted())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"if (x):\n\ty"), "if (x):\n\ty");
        assert_eq!(unescape(r"a\\n"), "a\\n");
        assert_eq!(unescape(r"\q\"), "\\q\\");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["pyline", "check", "-c", "x = 1", "--dedent", "single"]).unwrap();
        match cli.command {
            Some(Commands::Check(args)) => {
                assert_eq!(args.code.as_deref(), Some("x = 1"));
                assert_eq!(args.config().dedent, DedentPolicy::Single);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
