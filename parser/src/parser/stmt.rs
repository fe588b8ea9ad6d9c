use crate::parser::context::Parser;
use crate::tokenizer::TokenKind;
use std::collections::HashSet;
use turtle_ast::{Assign, Block, If, ProcDef, Program, Stmt, While};
use turtle_errors::Result;

impl Parser {
    /// `program := (definition | statement)* EOF`
    pub(crate) fn parse_program(&mut self) -> Result<Program> {
        let mut definitions = Vec::new();
        let mut statements = Vec::new();
        let mut seen_names = HashSet::new();

        while !self.check(&TokenKind::Eof) {
            if self.check(&TokenKind::Fun) {
                let def = self.parse_definition()?;
                if !seen_names.insert(def.name.clone()) {
                    return Err(self.error_at(format!("redefinition of procedure '{}'", def.name), def.span));
                }
                definitions.push(def);
            } else {
                statements.push(self.parse_statement()?);
            }
        }
        self.expect(TokenKind::Eof)?;

        Ok(Program { definitions, statements })
    }

    /// `definition := "fun" IDENT "(" [IDENT ("," IDENT)*] ")" block`
    fn parse_definition(&mut self) -> Result<ProcDef> {
        let start = self.expect(TokenKind::Fun)?;
        let (name, _) = self.expect_ident()?;
        self.expect(TokenKind::OpenParen)?;

        let mut params = Vec::new();
        let mut seen = HashSet::new();
        if !self.check(&TokenKind::CloseParen) {
            let (p, span) = self.expect_ident()?;
            if !seen.insert(p.clone()) {
                return Err(self.error_at(format!("duplicate parameter name '{p}'"), span));
            }
            params.push(p);
            while self.eat(&TokenKind::Comma) {
                let (p, span) = self.expect_ident()?;
                if !seen.insert(p.clone()) {
                    return Err(self.error_at(format!("duplicate parameter name '{p}'"), span));
                }
                params.push(p);
            }
        }
        self.expect(TokenKind::CloseParen)?;
        let body = self.parse_block()?;

        Ok(ProcDef { name, params, body, span: start })
    }

    /// `statement := while | if | assignment_or_expr`
    fn parse_statement(&mut self) -> Result<Stmt> {
        if self.check(&TokenKind::While) {
            return self.parse_while();
        }
        if self.check(&TokenKind::If) {
            return self.parse_if();
        }
        self.parse_assignment_or_expr()
    }

    /// `while := "while" "(" expr ")" block`
    fn parse_while(&mut self) -> Result<Stmt> {
        let start = self.expect(TokenKind::While)?;
        self.require_open_paren("while")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::CloseParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::While(While { condition, body, span: start }))
    }

    /// `if := "if" "(" expr ")" block ["else" block]`
    fn parse_if(&mut self) -> Result<Stmt> {
        let start = self.expect(TokenKind::If)?;
        self.require_open_paren("if")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::CloseParen)?;
        let then_branch = self.parse_block()?;
        let else_branch = if self.eat(&TokenKind::Else) { self.parse_block()? } else { Block::default() };
        Ok(Stmt::If(If { condition, then_branch, else_branch, span: start }))
    }

    /// `assignment_or_expr := expr [ "=" expr ]` — the LHS may only become
    /// an assignment target when it parsed as a bare identifier.
    fn parse_assignment_or_expr(&mut self) -> Result<Stmt> {
        let start = self.token.span;
        let (expr, name) = self.parse_expr_as_assign_target()?;
        if self.check(&TokenKind::Assign) {
            let Some(name) = name else {
                return Err(self.error("left-hand side of an assignment must be a plain identifier"));
            };
            self.bump();
            let value = self.parse_expr()?;
            return Ok(Stmt::Assign(Assign { name, value, span: start }));
        }
        Ok(Stmt::Expr(expr))
    }

    /// `block := "{" statement* "}"`
    fn parse_block(&mut self) -> Result<Block> {
        self.expect(TokenKind::OpenBlock)?;
        let mut statements = Vec::new();
        while !self.check(&TokenKind::CloseBlock) {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::CloseBlock)?;
        Ok(Block { statements })
    }

    fn require_open_paren(&mut self, keyword: &str) -> Result<()> {
        if !self.check(&TokenKind::OpenParen) {
            return Err(self.error(format!("expected an opening paren after '{keyword}'")));
        }
        self.bump();
        Ok(())
    }

    fn error_at(&self, message: impl Into<String>, span: turtle_span::Span) -> turtle_errors::Error {
        turtle_errors::ParseError::new(message, span).into()
    }
}
