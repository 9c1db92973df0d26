//! Core parser infrastructure: token cursor, error reporting, helpers.

use hermes_lexer::{Lexer, Token, TokenKind};
use hermes_types::ast::{Module, Program};
use hermes_types::{Result, Span, SyntaxError};

/// The Hermes parser.
///
/// Pulls tokens from the lexer one at a time through a single
/// "current token" cursor. Parsing stops at the first error.
pub struct Parser {
    lexer: Lexer,
    /// The token under the cursor.
    current: Token,
    /// Span of the most recently consumed token.
    previous_span: Span,
}

impl Parser {
    /// Create a parser over `source`, reading the first token.
    pub fn new(source: &str) -> Result<Self> {
        Self::from_lexer(Lexer::new(source))
    }

    pub fn from_lexer(mut lexer: Lexer) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            previous_span: Span::default(),
        })
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.current.kind
    }

    pub(crate) fn current_span(&self) -> Span {
        self.current.span
    }

    pub(crate) fn previous_span(&self) -> Span {
        self.previous_span
    }

    pub(crate) fn at_end(&self) -> bool {
        self.current.is_eof()
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        let token = std::mem::replace(&mut self.current, next);
        self.previous_span = token.span;
        Ok(token)
    }

    /// Check if the current token has the given kind (payload ignored).
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.current.kind.same_kind(kind)
    }

    /// If the current token matches, advance and return `true`.
    pub(crate) fn eat_if(&mut self, kind: &TokenKind) -> Result<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume a token of the expected kind or fail with expected-vs-actual.
    pub(crate) fn eat(&mut self, expected: &TokenKind) -> Result<Token> {
        if self.check(expected) {
            self.advance()
        } else {
            Err(self.error_at_current(format!(
                "expected '{}', got '{}'",
                expected,
                self.peek_kind()
            )))
        }
    }

    /// Expect an identifier without dots. `what` names the expected thing in errors.
    pub(crate) fn expect_name(&mut self, what: &str) -> Result<(String, Span)> {
        match self.peek_kind().clone() {
            TokenKind::Identifier(name) if !name.contains('.') => {
                let span = self.advance()?.span;
                Ok((name, span))
            }
            TokenKind::Identifier(name) => Err(self.error_at_current(format!(
                "{what} cannot contain '.', got '{name}'"
            ))),
            other => Err(self.error_at_current(format!("expected {what}, got '{other}'"))),
        }
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    pub(crate) fn error_at_current(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::parse(message, self.current_span())
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the whole token stream as a program.
    pub fn parse_program(mut self) -> Result<Program> {
        let program = self.parse_body()?;
        if !self.at_end() {
            return Err(self.error_at_current(format!(
                "unexpected '{}' at top level",
                self.peek_kind()
            )));
        }
        Ok(program)
    }

    /// Parse a module file: a `!module["name"]` header followed by a program body.
    pub fn parse_module(mut self) -> Result<Module> {
        let TokenKind::ModuleHeader(name) = self.peek_kind().clone() else {
            return Err(
                self.error_at_current("a module file must start with !module[\"name\"]")
            );
        };
        let span = self.advance()?.span;
        let body = self.parse_program()?;
        Ok(Module { name, body, span })
    }
}
