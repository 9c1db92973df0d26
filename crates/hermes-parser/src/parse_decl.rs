//! Declaration parsing: functions and module wrappers.

use std::rc::Rc;

use crate::parser::Parser;
use hermes_lexer::TokenKind;
use hermes_types::ast::*;
use hermes_types::Result;

impl Parser {
    /// `func name(p1, p2) { body }` or `func name(p1, p2) => expr`
    ///
    /// The arrow form becomes a body holding a single `return expr`.
    pub(crate) fn parse_function(&mut self) -> Result<Rc<FunctionDecl>> {
        let start = self.eat(&TokenKind::Func)?.span;
        let (name, _) = self.expect_name("function name")?;

        self.eat(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                params.push(self.expect_name("parameter name")?.0);
                if !self.eat_if(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.eat(&TokenKind::RParen)?;

        let body = if self.eat_if(&TokenKind::Arrow)? {
            let value = self.parse_expression()?;
            let span = value.span;
            vec![Stmt::Return(ReturnStmt {
                value: Some(value),
                span,
            })]
        } else {
            self.parse_block()?.stmts
        };

        Ok(Rc::new(FunctionDecl {
            name,
            params,
            body,
            span: start.merge(self.previous_span()),
        }))
    }

    /// A module header met at statement position: the rest of the
    /// enclosing body becomes the module's program.
    pub(crate) fn parse_nested_module(&mut self) -> Result<Module> {
        let header = self.advance()?;
        let TokenKind::ModuleHeader(name) = header.kind else {
            return Err(self.error_at_current("expected module header"));
        };
        let body = self.parse_body()?;
        Ok(Module {
            name,
            body,
            span: header.span,
        })
    }
}
