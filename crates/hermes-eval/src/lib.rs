//! Hermes tree-walking evaluator.
//!
//! Executes parsed programs directly from the AST against persistent state
//! (variables, functions, imported modules), so the same [`Evaluator`] can
//! serve a REPL line by line or run a whole file once.

pub mod builtins;
pub mod console;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod modules;
pub mod resolver;
pub mod value;

pub use console::Console;
pub use env::Environment;
pub use error::{EvalError, EvalResult};
pub use evaluator::{EvalOptions, Evaluator, DEFAULT_MAX_CALL_DEPTH};
pub use modules::{Callable, ModuleRegistry};
pub use resolver::{DirectoryResolver, ModuleResolver, NoModules, ResolveError, SourceResolver};
pub use value::Value;

/// Parse `source` and interpret it on `evaluator`.
///
/// Syntax errors surface as [`EvalError::Syntax`].
pub fn run_source(evaluator: &mut Evaluator, source: &str) -> EvalResult<()> {
    let program = hermes_parser::parse_program(source)?;
    evaluator.interpret(&program)
}
