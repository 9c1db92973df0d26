//! Expression parsing with precedence climbing.
//!
//! Precedence (lowest to highest):
//! 1. Assignment `=` (right-associative)
//! 2. Comparison `== != < > <= >=` (one level, left-associative)
//! 3. Additive `+ -`
//! 4. Multiplicative `* / %`
//! 5. Primary: literals, variables, calls, array access, `++`/`--`, unary `-`, `( )`

use crate::parser::Parser;
use hermes_lexer::TokenKind;
use hermes_types::ast::*;
use hermes_types::{Result, Span, SyntaxError};

impl Parser {
    /// Parse a full expression (entry point).
    pub(crate) fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_assignment()
    }

    // ── Precedence Levels ─────────────────────────────────────────────────────

    /// The left side is not checked here; the evaluator rejects bad targets.
    fn parse_assignment(&mut self) -> Result<Expr> {
        let target = self.parse_comparison()?;
        if self.eat_if(&TokenKind::Assign)? {
            let value = self.parse_assignment()?;
            let span = target.span.merge(value.span);
            return Ok(Expr::new(
                ExprKind::Assign {
                    target: Box::new(target),
                    value: Box::new(value),
                },
                span,
            ));
        }
        Ok(target)
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let mut left = self.parse_additive()?;
        while let Some(op) = comparison_op(self.peek_kind()) {
            self.advance()?;
            let right = self.parse_additive()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut left = self.parse_primary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_primary()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    // ── Primary ───────────────────────────────────────────────────────────────

    fn parse_primary(&mut self) -> Result<Expr> {
        let start = self.current_span();
        match self.peek_kind().clone() {
            TokenKind::Number(text) => {
                self.advance()?;
                Ok(Expr::new(ExprKind::Literal(Literal::Number(text)), start))
            }
            TokenKind::Str(text) => {
                self.advance()?;
                Ok(Expr::new(ExprKind::Literal(Literal::String(text)), start))
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus => self.parse_prefix_step(),
            TokenKind::Minus => {
                self.advance()?;
                let operand = self.parse_primary()?;
                let span = start.merge(operand.span);
                Ok(Expr::new(ExprKind::Negate(Box::new(operand)), span))
            }
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.parse_expression()?;
                self.eat(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::Identifier(name) => {
                self.advance()?;
                self.parse_identifier_tail(name, start)
            }
            TokenKind::Assign => {
                Err(self.error_at_current("unexpected assignment operator '=' in expression"))
            }
            other => Err(self.error_at_current(format!("unexpected token '{other}'"))),
        }
    }

    /// `++x` / `--x`: the operand must be a plain variable.
    fn parse_prefix_step(&mut self) -> Result<Expr> {
        let token = self.advance()?;
        let increment = matches!(token.kind, TokenKind::PlusPlus);
        let operand = self.parse_primary()?;
        let span = token.span.merge(operand.span);
        let ExprKind::Variable(name) = operand.kind else {
            return Err(SyntaxError::parse(
                "invalid target for increment/decrement",
                operand.span,
            ));
        };
        Ok(step(name, increment, true, span))
    }

    /// `[e1, e2, ...]`
    fn parse_array_literal(&mut self) -> Result<Expr> {
        let start = self.eat(&TokenKind::LBracket)?.span;
        let mut elements = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            loop {
                elements.push(self.parse_expression()?);
                if !self.eat_if(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        let end = self.eat(&TokenKind::RBracket)?.span;
        Ok(Expr::new(ExprKind::ArrayLiteral(elements), start.merge(end)))
    }

    /// What may follow an identifier: a call, a postfix step, array access,
    /// or nothing (a variable reference).
    fn parse_identifier_tail(&mut self, name: String, start: Span) -> Result<Expr> {
        if self.check(&TokenKind::LParen) {
            let target = split_call_target(&name, start)?;
            let args = self.parse_call_args()?;
            let span = start.merge(self.previous_span());
            return Ok(Expr::new(ExprKind::Call { target, args }, span));
        }

        if name.contains('.') {
            return Err(SyntaxError::parse(
                format!("dotted name '{name}' can only be used as a call target"),
                start,
            ));
        }

        match self.peek_kind() {
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let token = self.advance()?;
                let increment = matches!(token.kind, TokenKind::PlusPlus);
                Ok(step(name, increment, false, start.merge(token.span)))
            }
            TokenKind::LBracket => {
                let mut expr = Expr::new(ExprKind::Variable(name), start);
                while self.eat_if(&TokenKind::LBracket)? {
                    let index = self.parse_expression()?;
                    let end = self.eat(&TokenKind::RBracket)?.span;
                    let span = start.merge(end);
                    expr = Expr::new(
                        ExprKind::ArrayAccess {
                            array: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                Ok(expr)
            }
            _ => Ok(Expr::new(ExprKind::Variable(name), start)),
        }
    }

    /// `( arg, arg, ... )`
    fn parse_call_args(&mut self) -> Result<Vec<Expr>> {
        self.eat(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.eat_if(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.eat(&TokenKind::RParen)?;
        Ok(args)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn comparison_op(kind: &TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::EqEq => Some(BinOp::Eq),
        TokenKind::BangEq => Some(BinOp::NotEq),
        TokenKind::Less => Some(BinOp::Less),
        TokenKind::Greater => Some(BinOp::Greater),
        TokenKind::LessEq => Some(BinOp::LessEq),
        TokenKind::GreaterEq => Some(BinOp::GreaterEq),
        _ => None,
    }
}

fn binary(left: Expr, op: BinOp, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        span,
    )
}

fn step(name: String, increment: bool, prefix: bool, span: Span) -> Expr {
    let kind = if increment {
        ExprKind::Increment { name, prefix }
    } else {
        ExprKind::Decrement { name, prefix }
    };
    Expr::new(kind, span)
}

/// `name` → local call, `module.function` → qualified call. Anything else is rejected.
fn split_call_target(name: &str, span: Span) -> Result<CallTarget> {
    let mut parts = name.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), None, _) => Ok(CallTarget::Local(local.to_string())),
        (Some(module), Some(function), None) if !module.is_empty() && !function.is_empty() => {
            Ok(CallTarget::Qualified {
                module: module.to_string(),
                function: function.to_string(),
            })
        }
        _ => Err(SyntaxError::parse(
            format!("invalid function name '{name}': expected 'name' or 'module.function'"),
            span,
        )),
    }
}
