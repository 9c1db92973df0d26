//! Statement parsing.

use crate::parser::Parser;
use hermes_lexer::TokenKind;
use hermes_types::ast::*;
use hermes_types::Result;

impl Parser {
    /// Parse statements until end of input or a closing `}`.
    /// A trailing `;` after any statement is optional.
    pub(crate) fn parse_body(&mut self) -> Result<Program> {
        let mut stmts = Vec::new();
        while !self.at_end() && !self.check(&TokenKind::RBrace) {
            stmts.push(self.parse_statement()?);
            self.eat_if(&TokenKind::Semicolon)?;
        }
        Ok(Program::new(stmts))
    }

    /// Parse a braced block: `{ stmts... }`
    pub(crate) fn parse_block(&mut self) -> Result<Program> {
        self.eat(&TokenKind::LBrace)?;
        let body = self.parse_body()?;
        self.eat(&TokenKind::RBrace)?;
        Ok(body)
    }

    /// Parse a single statement, dispatching on the current token.
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt> {
        match self.peek_kind() {
            TokenKind::If => self.parse_if().map(Stmt::If),
            TokenKind::Import => self.parse_import().map(Stmt::Import),
            TokenKind::Var => self.parse_var_statement().map(Stmt::MultiAssign),
            TokenKind::Func => self.parse_function().map(Stmt::Function),
            TokenKind::Return => self.parse_return().map(Stmt::Return),
            TokenKind::For => self.parse_for().map(Stmt::For),
            TokenKind::ModuleHeader(_) => self.parse_nested_module().map(Stmt::Module),
            _ => self.parse_expression().map(Stmt::Expr),
        }
    }

    /// `if cond { ... } [else if cond { ... }]* [else { ... }]`
    fn parse_if(&mut self) -> Result<IfStmt> {
        let start = self.eat(&TokenKind::If)?.span;
        let condition = self.parse_expression()?;
        let body = self.parse_block()?;

        let mut else_ifs = Vec::new();
        let mut else_body = None;
        while self.check(&TokenKind::Else) {
            let else_span = self.advance()?.span;
            if self.eat_if(&TokenKind::If)? {
                let condition = self.parse_expression()?;
                let body = self.parse_block()?;
                let span = else_span.merge(self.previous_span());
                else_ifs.push(ElseIf {
                    condition,
                    body,
                    span,
                });
            } else {
                else_body = Some(self.parse_block()?);
                break;
            }
        }

        Ok(IfStmt {
            condition,
            body,
            else_ifs,
            else_body,
            span: start.merge(self.previous_span()),
        })
    }

    /// `@import name`
    fn parse_import(&mut self) -> Result<ImportStmt> {
        let start = self.eat(&TokenKind::Import)?.span;
        let (module, end) = self.expect_name("module name")?;
        Ok(ImportStmt {
            module,
            span: start.merge(end),
        })
    }

    /// `var a, b, ... = e1, e2, ...`; counts must match.
    fn parse_var_statement(&mut self) -> Result<MultiAssign> {
        let start = self.eat(&TokenKind::Var)?.span;

        let mut names = Vec::new();
        loop {
            names.push(self.expect_name("variable name")?.0);
            if !self.eat_if(&TokenKind::Comma)? {
                break;
            }
        }

        self.eat(&TokenKind::Assign)?;

        let mut values = Vec::new();
        loop {
            values.push(self.parse_expression()?);
            if !self.eat_if(&TokenKind::Comma)? {
                break;
            }
        }

        let span = start.merge(self.previous_span());
        if names.len() != values.len() {
            return Err(hermes_types::SyntaxError::parse(
                format!(
                    "number of variables ({}) and values ({}) must match",
                    names.len(),
                    values.len()
                ),
                span,
            ));
        }

        Ok(MultiAssign {
            names,
            values,
            span,
        })
    }

    /// `var name = expr`, used as a `for` initializer.
    fn parse_var_decl(&mut self) -> Result<VarDecl> {
        let start = self.eat(&TokenKind::Var)?.span;
        let (name, _) = self.expect_name("variable name")?;
        self.eat(&TokenKind::Assign)?;
        let value = self.parse_expression()?;
        Ok(VarDecl {
            name,
            value,
            span: start.merge(self.previous_span()),
        })
    }

    /// `return [expr]`
    fn parse_return(&mut self) -> Result<ReturnStmt> {
        let start = self.eat(&TokenKind::Return)?.span;
        let value = if self.at_end()
            || self.check(&TokenKind::Semicolon)
            || self.check(&TokenKind::RBrace)
        {
            None
        } else {
            Some(self.parse_expression()?)
        };
        Ok(ReturnStmt {
            value,
            span: start.merge(self.previous_span()),
        })
    }

    /// `for ([init]; [cond]; [incr]) { body }`
    fn parse_for(&mut self) -> Result<ForStmt> {
        let start = self.eat(&TokenKind::For)?.span;
        self.eat(&TokenKind::LParen)?;

        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else if self.check(&TokenKind::Var) {
            Some(Box::new(Stmt::VarDecl(self.parse_var_decl()?)))
        } else {
            Some(Box::new(Stmt::Expr(self.parse_expression()?)))
        };
        self.eat(&TokenKind::Semicolon)?;

        let condition = if self.check(&TokenKind::Semicolon) {
            // No condition: loop until something else ends it.
            Expr::new(
                ExprKind::Literal(Literal::Number("1".to_string())),
                self.current_span(),
            )
        } else {
            self.parse_expression()?
        };
        self.eat(&TokenKind::Semicolon)?;

        let increment = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.eat(&TokenKind::RParen)?;

        let body = self.parse_block()?;
        Ok(ForStmt {
            init,
            condition,
            increment,
            body,
            span: start.merge(self.previous_span()),
        })
    }
}
