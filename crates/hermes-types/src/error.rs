use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Every error family the interpreter can report.
///
/// Lexing and parsing produce `Lex`/`Parse`; all other kinds are raised by
/// the evaluator. Callers match on the kind instead of on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Lex,
    Parse,
    UndefinedVariable,
    UnknownFunction,
    ArityMismatch,
    IndexOutOfRange,
    TypeMismatch,
    UnknownOperator,
    ModuleNotImported,
    ModuleLoadFailed,
    ReturnOutsideFunction,
    StackExhausted,
    Io,
}

impl ErrorKind {
    /// Returns `true` for errors raised before evaluation starts.
    pub fn is_syntax(self) -> bool {
        matches!(self, ErrorKind::Lex | ErrorKind::Parse)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Lex => "lex",
            ErrorKind::Parse => "parse",
            ErrorKind::UndefinedVariable => "undefined_variable",
            ErrorKind::UnknownFunction => "unknown_function",
            ErrorKind::ArityMismatch => "arity_mismatch",
            ErrorKind::IndexOutOfRange => "index_out_of_range",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::UnknownOperator => "unknown_operator",
            ErrorKind::ModuleNotImported => "module_not_imported",
            ErrorKind::ModuleLoadFailed => "module_load_failed",
            ErrorKind::ReturnOutsideFunction => "return_outside_function",
            ErrorKind::StackExhausted => "stack_exhausted",
            ErrorKind::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexical or parse error. Both stages stop at the first one.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{span}: {message}")]
pub struct SyntaxError {
    /// Either [`ErrorKind::Lex`] or [`ErrorKind::Parse`].
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn lex(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ErrorKind::Lex,
            message: message.into(),
            span,
        }
    }

    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ErrorKind::Parse,
            message: message.into(),
            span,
        }
    }
}

/// Caller-facing error report, serialized by the CLI for `--error-format json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    /// Source position, when the error has one (runtime errors do not).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, span: Span) -> Self {
        self.line = Some(span.start_line);
        self.column = Some(span.start_col);
        self
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(err: &SyntaxError) -> Self {
        Diagnostic::new(err.kind, err.message.clone()).at(err.span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(col)) => {
                write!(f, "error[{}] {line}:{col}: {}", self.kind, self.message)
            }
            _ => write!(f, "error[{}]: {}", self.kind, self.message),
        }
    }
}
