//! Hermes parser: converts a token stream into an AST.

mod parse_decl;
mod parse_expr;
mod parse_stmt;
mod parser;

use hermes_types::ast::{Module, Program};
use hermes_types::Result;

pub use parser::Parser;

/// Lex and parse a program (a file or a REPL line).
pub fn parse_program(source: &str) -> Result<Program> {
    Parser::new(source)?.parse_program()
}

/// Lex and parse a module file, which must start with `!module["name"]`.
pub fn parse_module(source: &str) -> Result<Module> {
    Parser::new(source)?.parse_module()
}
