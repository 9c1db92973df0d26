//! Shared types for the Hermes interpreter.
//!
//! This crate defines the AST node types, source spans, and the error
//! kinds shared by the lexer, parser, and evaluator.

mod error;
mod span;
pub mod ast;

pub use error::{Diagnostic, ErrorKind, SyntaxError};
pub use span::Span;

/// Result type used by the lexer and parser.
pub type Result<T> = std::result::Result<T, SyntaxError>;
