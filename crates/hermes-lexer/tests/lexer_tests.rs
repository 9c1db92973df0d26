//! Lexer tests: keywords, directives, module headers, operators,
//! literals, comments, spans, and lexical errors.

use hermes_lexer::{Lexer, TokenKind};
use hermes_types::{ErrorKind, Span};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Lex source text and return the token kinds (excluding the final Eof).
fn kinds(source: &str) -> Vec<TokenKind> {
    let tokens = Lexer::new(source).tokenize().expect("lexing failed");
    tokens
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.kind)
        .collect()
}

/// Lex and return the first error message.
fn first_error(source: &str) -> String {
    let err = Lexer::new(source)
        .tokenize()
        .expect_err("expected a lexical error");
    assert_eq!(err.kind, ErrorKind::Lex);
    err.message
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_string())
}

fn num(text: &str) -> TokenKind {
    TokenKind::Number(text.to_string())
}

// ─────────────────────────────────────────────────────────────────────
// Keywords & identifiers
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("if else for func return var"),
        vec![
            TokenKind::If,
            TokenKind::Else,
            TokenKind::For,
            TokenKind::Func,
            TokenKind::Return,
            TokenKind::Var,
        ]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(
        kinds("iffy variable format returned elsewhere"),
        vec![
            ident("iffy"),
            ident("variable"),
            ident("format"),
            ident("returned"),
            ident("elsewhere"),
        ]
    );
}

#[test]
fn test_identifiers() {
    assert_eq!(
        kinds("x _tmp count2 io.print"),
        vec![ident("x"), ident("_tmp"), ident("count2"), ident("io.print")]
    );
}

#[test]
fn test_unicode_identifier() {
    assert_eq!(kinds("переменная"), vec![ident("переменная")]);
}

// ─────────────────────────────────────────────────────────────────────
// Directives & module header
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_import_directive() {
    assert_eq!(
        kinds("@import math"),
        vec![TokenKind::Import, ident("math")]
    );
}

#[test]
fn test_unknown_directive() {
    assert_eq!(first_error("@export math"), "unknown directive '@export'");
}

#[test]
fn test_module_header() {
    assert_eq!(
        kinds(r#"!module["geometry"] func area(r) => r * r"#)[0],
        TokenKind::ModuleHeader("geometry".into())
    );
}

#[test]
fn test_module_header_with_spacing() {
    assert_eq!(
        kinds("!module [ \"util\" ]"),
        vec![TokenKind::ModuleHeader("util".into())]
    );
}

#[test]
fn test_module_header_errors() {
    assert_eq!(first_error("!module \"x\"]"), "expected '[' after !module");
    assert_eq!(first_error("!module[x]"), "expected '\"' before the module name");
    assert_eq!(
        first_error("!module[\"x"),
        "missing closing '\"' after the module name"
    );
    assert_eq!(first_error("!module[\"x\""), "expected ']' after the module name");
}

#[test]
fn test_bare_bang_is_error() {
    assert_eq!(first_error("!x"), "unexpected character '!'");
}

// ─────────────────────────────────────────────────────────────────────
// Operators & punctuation
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_two_char_operators() {
    assert_eq!(
        kinds(">= <= == != ++ -- =>"),
        vec![
            TokenKind::GreaterEq,
            TokenKind::LessEq,
            TokenKind::EqEq,
            TokenKind::BangEq,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::Arrow,
        ]
    );
}

#[test]
fn test_one_char_fallbacks() {
    assert_eq!(
        kinds("> < = + - * / %"),
        vec![
            TokenKind::Greater,
            TokenKind::Less,
            TokenKind::Assign,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
        ]
    );
}

#[test]
fn test_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] , ;"),
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Comma,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_postfix_increment_without_spaces() {
    assert_eq!(
        kinds("i++;"),
        vec![ident("i"), TokenKind::PlusPlus, TokenKind::Semicolon]
    );
}

#[test]
fn test_unexpected_character() {
    assert_eq!(first_error("var x = 1 $ 2"), "unexpected character '$'");
}

// ─────────────────────────────────────────────────────────────────────
// Literals
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_numbers_kept_verbatim() {
    assert_eq!(
        kinds("42 3.14 .5 1.2.3"),
        vec![num("42"), num("3.14"), num(".5"), num("1.2.3")]
    );
}

#[test]
fn test_strings_have_no_escapes() {
    assert_eq!(
        kinds(r#""hello world" "a\n""#),
        vec![
            TokenKind::Str("hello world".into()),
            TokenKind::Str("a\\n".into()),
        ]
    );
}

#[test]
fn test_unterminated_string() {
    assert_eq!(first_error("\"never closed"), "unterminated string literal");
}

// ─────────────────────────────────────────────────────────────────────
// Comments, whitespace, spans
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_line_comments_skipped() {
    assert_eq!(
        kinds("var x = 1 // set x\n// whole line\nx"),
        vec![TokenKind::Var, ident("x"), TokenKind::Assign, num("1"), ident("x")]
    );
}

#[test]
fn test_next_token_repeats_eof() {
    let mut lexer = Lexer::new("  ");
    assert!(lexer.next_token().unwrap().is_eof());
    assert!(lexer.next_token().unwrap().is_eof());
}

#[test]
fn test_spans_track_lines_and_columns() {
    let tokens = Lexer::new("var x\n  = 10").tokenize().unwrap();
    assert_eq!(tokens[0].span, Span::new(1, 1, 1, 3));
    assert_eq!(tokens[1].span, Span::new(1, 5, 1, 5));
    assert_eq!(tokens[2].span, Span::new(2, 3, 2, 3));
    assert_eq!(tokens[3].span, Span::new(2, 5, 2, 6));
}

#[test]
fn test_error_span_points_at_character() {
    let err = Lexer::new("x\n  #").tokenize().unwrap_err();
    assert_eq!(err.span.start_line, 2);
    assert_eq!(err.span.start_col, 3);
}

#[test]
fn test_full_statement() {
    assert_eq!(
        kinds("for (var i = 0; i < 5; i++) { sum = sum + i; }"),
        vec![
            TokenKind::For,
            TokenKind::LParen,
            TokenKind::Var,
            ident("i"),
            TokenKind::Assign,
            num("0"),
            TokenKind::Semicolon,
            ident("i"),
            TokenKind::Less,
            num("5"),
            TokenKind::Semicolon,
            ident("i"),
            TokenKind::PlusPlus,
            TokenKind::RParen,
            TokenKind::LBrace,
            ident("sum"),
            TokenKind::Assign,
            ident("sum"),
            TokenKind::Plus,
            ident("i"),
            TokenKind::Semicolon,
            TokenKind::RBrace,
        ]
    );
}
