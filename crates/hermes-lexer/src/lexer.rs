//! Core Hermes lexer: converts source text to tokens, one per call.
//!
//! Features:
//! - Whole-word keywords (`if`, `else`, `for`, `func`, `return`, `var`)
//! - `@import` directive and `!module["name"]` module header
//! - Dotted identifiers (`io.print`) lexed as a single token
//! - Two-character operators via one-character lookahead
//! - Single-line comments stripped (`//`)
//! - Fail-fast: the first malformed lexeme is returned as an error

use hermes_types::{Result, Span, SyntaxError};

use crate::token::{Token, TokenKind};

/// The Hermes lexer.
///
/// Holds nothing but the immutable source and a cursor; call
/// [`Lexer::next_token`] until it yields [`TokenKind::Eof`].
pub struct Lexer {
    /// Source text, decoded once so identifiers and strings may hold any character.
    chars: Vec<char>,
    /// Current index into `chars`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    col: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Lex the remaining input into a token stream ending with `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    /// Scan and return the next token. Returns `Eof` forever once input is exhausted.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_trivia();

        let start_line = self.line;
        let start_col = self.col;
        let Some(ch) = self.advance() else {
            return Ok(Token::new(TokenKind::Eof, self.current_span()));
        };

        let kind = match ch {
            '"' => self.scan_string(start_line, start_col)?,
            c if c.is_ascii_digit() || c == '.' => self.scan_number(c),
            c if c.is_alphabetic() || c == '_' => self.scan_identifier(c),
            '@' => self.scan_directive(start_line, start_col)?,

            '!' => {
                if self.eat('=') {
                    TokenKind::BangEq
                } else if self.looking_at("module") {
                    self.scan_module_header(start_line, start_col)?
                } else {
                    return Err(SyntaxError::lex(
                        "unexpected character '!'",
                        self.span_from(start_line, start_col),
                    ));
                }
            }

            '=' => {
                if self.eat('=') {
                    TokenKind::EqEq
                } else if self.eat('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Assign
                }
            }
            '>' => {
                if self.eat('=') {
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }
            '<' => {
                if self.eat('=') {
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                }
            }
            '+' => {
                if self.eat('+') {
                    TokenKind::PlusPlus
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.eat('-') {
                    TokenKind::MinusMinus
                } else {
                    TokenKind::Minus
                }
            }

            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,

            other => {
                return Err(SyntaxError::lex(
                    format!("unexpected character '{other}'"),
                    self.span_from(start_line, start_col),
                ));
            }
        };

        Ok(Token::new(kind, self.span_from(start_line, start_col)))
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Consume `expected` if it is the next character.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Check whether the upcoming characters spell `word`, without consuming them.
    fn looking_at(&self, word: &str) -> bool {
        word.chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.pos + i) == Some(&c))
    }

    fn read_while(&mut self, mut pred: impl FnMut(char) -> bool) -> String {
        let mut buf = String::new();
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            buf.push(ch);
            self.advance();
        }
        buf
    }

    fn current_span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn span_from(&self, start_line: u32, start_col: u32) -> Span {
        Span::new(
            start_line,
            start_col,
            self.line,
            self.col.saturating_sub(1).max(1),
        )
    }

    // ─────────────────────────────────────────────────────────────
    // Whitespace & comments
    // ─────────────────────────────────────────────────────────────

    fn skip_whitespace(&mut self) {
        self.read_while(char::is_whitespace);
    }

    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            if self.looking_at("//") {
                self.read_while(|c| c != '\n');
            } else {
                return;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Literals & names
    // ─────────────────────────────────────────────────────────────

    /// Digits and dots, in any order. Validation is the evaluator's job.
    fn scan_number(&mut self, first: char) -> TokenKind {
        let mut text = String::from(first);
        text.push_str(&self.read_while(|c| c.is_ascii_digit() || c == '.'));
        TokenKind::Number(text)
    }

    fn scan_identifier(&mut self, first: char) -> TokenKind {
        let mut text = String::from(first);
        text.push_str(&self.read_while(|c| c.is_alphanumeric() || c == '_' || c == '.'));
        TokenKind::from_keyword(&text).unwrap_or(TokenKind::Identifier(text))
    }

    fn scan_string(&mut self, start_line: u32, start_col: u32) -> Result<TokenKind> {
        let text = self.read_while(|c| c != '"');
        if !self.eat('"') {
            return Err(SyntaxError::lex(
                "unterminated string literal",
                self.span_from(start_line, start_col),
            ));
        }
        Ok(TokenKind::Str(text))
    }

    // ─────────────────────────────────────────────────────────────
    // Directives
    // ─────────────────────────────────────────────────────────────

    /// `@import`, the only directive.
    fn scan_directive(&mut self, start_line: u32, start_col: u32) -> Result<TokenKind> {
        let word = self.read_while(char::is_alphabetic);
        if word == "import" {
            Ok(TokenKind::Import)
        } else {
            Err(SyntaxError::lex(
                format!("unknown directive '@{word}'"),
                self.span_from(start_line, start_col),
            ))
        }
    }

    /// `!module["name"]`, scanned after the `!`. Whitespace may separate the parts.
    fn scan_module_header(&mut self, start_line: u32, start_col: u32) -> Result<TokenKind> {
        for _ in "module".chars() {
            self.advance();
        }

        self.expect_header_char('[', "expected '[' after !module", start_line, start_col)?;
        self.expect_header_char('"', "expected '\"' before the module name", start_line, start_col)?;
        let name = self.read_while(|c| c != '"');
        if !self.eat('"') {
            return Err(SyntaxError::lex(
                "missing closing '\"' after the module name",
                self.span_from(start_line, start_col),
            ));
        }
        self.expect_header_char(']', "expected ']' after the module name", start_line, start_col)?;

        Ok(TokenKind::ModuleHeader(name))
    }

    fn expect_header_char(
        &mut self,
        expected: char,
        message: &str,
        start_line: u32,
        start_col: u32,
    ) -> Result<()> {
        self.skip_whitespace();
        if self.eat(expected) {
            Ok(())
        } else {
            Err(SyntaxError::lex(message, self.span_from(start_line, start_col)))
        }
    }
}
