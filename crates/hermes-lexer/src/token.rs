//! Token types for the Hermes lexer.
//!
//! [`TokenKind`] covers every lexeme of the language; literal and name
//! kinds carry their text. [`Token`] pairs a kind with a source [`Span`].

use hermes_types::Span;
use std::fmt;

/// Words the lexer turns into keyword tokens instead of identifiers.
pub const KEYWORDS: &[&str] = &["if", "else", "for", "func", "return", "var"];

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The literal payload of the token, if its kind carries one.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Number(text)
            | TokenKind::Str(text)
            | TokenKind::Identifier(text)
            | TokenKind::ModuleHeader(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals & names ─────────────────────────────────────

    /// Run of digits and dots, kept verbatim: `42`, `3.14`, `.5`
    Number(String),
    /// `"text"`, without the quotes. No escape processing.
    Str(String),
    /// `name`, `_tmp`, or a dotted `module.function`
    Identifier(String),
    /// `!module["name"]`, carrying the module name
    ModuleHeader(String),

    // ── Keywords ─────────────────────────────────────────────

    /// `@import`
    Import,
    If,
    Else,
    For,
    Func,
    Return,
    Var,

    // ── Operators ────────────────────────────────────────────

    /// `=`
    Assign,
    /// `=>`
    Arrow,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    Greater,
    Less,
    GreaterEq,
    LessEq,
    EqEq,
    BangEq,

    // ── Punctuation ──────────────────────────────────────────

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,

    Eof,
}

impl TokenKind {
    /// Look up a keyword by its exact (case-sensitive) spelling.
    pub fn from_keyword(word: &str) -> Option<TokenKind> {
        Some(match word {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "func" => TokenKind::Func,
            "return" => TokenKind::Return,
            "var" => TokenKind::Var,
            _ => return None,
        })
    }

    /// Returns `true` for kinds that are the same token regardless of payload.
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Number(n) => return write!(f, "{n}"),
            TokenKind::Str(s) => return write!(f, "\"{s}\""),
            TokenKind::Identifier(name) => return write!(f, "{name}"),
            TokenKind::ModuleHeader(name) => return write!(f, "!module[\"{name}\"]"),
            TokenKind::Import => "@import",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::Func => "func",
            TokenKind::Return => "return",
            TokenKind::Var => "var",
            TokenKind::Assign => "=",
            TokenKind::Arrow => "=>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::GreaterEq => ">=",
            TokenKind::LessEq => "<=",
            TokenKind::EqEq => "==",
            TokenKind::BangEq => "!=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Eof => "end of input",
        };
        f.write_str(s)
    }
}
