//! Pyline
//!
//! Lexer and parser for a small indentation-sensitive, Python-like syntax.
//! `frontend::analyze` turns one source string into its tokens and either a
//! `Program` or the first syntax error.

pub mod feedback;
pub mod frontend;
pub mod utils;

pub use frontend::{analyze, Analysis};
