//! Runtime error types for the Hermes evaluator.

use hermes_types::{Diagnostic, ErrorKind, SyntaxError};
use thiserror::Error;

/// Evaluation error. The first one raised aborts the current `interpret` call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Lex or parse failure, e.g. from a REPL line or a module file.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("function '{name}' expects {expected} argument(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    /// Wrong operand type: indexing a non-list, non-numeric index,
    /// a value that cannot be converted to a number, a bad assignment target.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("module '{0}' is not imported")]
    ModuleNotImported(String),

    #[error("failed to load module '{module}': {reason}")]
    ModuleLoadFailed { module: String, reason: String },

    #[error("'return' outside of a function")]
    ReturnOutsideFunction,

    #[error("maximum call depth of {depth} exceeded")]
    StackExhausted { depth: usize },

    /// Console read or write failure.
    #[error("i/o error: {0}")]
    Io(String),
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(err) => err.kind,
            Self::UndefinedVariable(_) => ErrorKind::UndefinedVariable,
            Self::UnknownFunction(_) => ErrorKind::UnknownFunction,
            Self::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::TypeMismatch(_) => ErrorKind::TypeMismatch,
            Self::UnknownOperator(_) => ErrorKind::UnknownOperator,
            Self::ModuleNotImported(_) => ErrorKind::ModuleNotImported,
            Self::ModuleLoadFailed { .. } => ErrorKind::ModuleLoadFailed,
            Self::ReturnOutsideFunction => ErrorKind::ReturnOutsideFunction,
            Self::StackExhausted { .. } => ErrorKind::StackExhausted,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Caller-facing report. Syntax errors keep their source location.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Syntax(err) => Diagnostic::from(err),
            other => Diagnostic::new(other.kind(), other.to_string()),
        }
    }
}

impl From<&EvalError> for Diagnostic {
    fn from(err: &EvalError) -> Self {
        err.to_diagnostic()
    }
}

impl From<std::io::Error> for EvalError {
    fn from(err: std::io::Error) -> Self {
        EvalError::Io(err.to_string())
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
