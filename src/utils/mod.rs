//! Shared utilities: source spans and the crate error type

mod error;
mod span;

pub use error::{Error, Result};
pub use span::Span;
