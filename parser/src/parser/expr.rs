use crate::parser::context::Parser;
use crate::tokenizer::TokenKind;
use turtle_ast::{
    AddExpr, Call, ConstExpr, Expr, FieldAccess, IdentExpr, Literal, LogicAndExpr, LogicOrExpr, MulExpr, Postfix,
    RelationExpr, UnaryExpr,
};
use turtle_errors::Result;

impl Parser {
    /// `expr := and_expr ("||" and_expr)*`
    pub(crate) fn parse_expr(&mut self) -> Result<Expr> {
        let start = self.token.span;
        let mut operands = vec![self.parse_and_expr()?];
        while self.eat(&TokenKind::Or) {
            operands.push(self.parse_and_expr()?);
        }
        Ok(collapse_or(operands, start))
    }

    /// `and_expr := relation ("&&" relation)*`
    fn parse_and_expr(&mut self) -> Result<Expr> {
        let start = self.token.span;
        let mut operands = vec![self.parse_relation()?];
        while self.eat(&TokenKind::And) {
            operands.push(self.parse_relation()?);
        }
        Ok(collapse_and(operands, start))
    }

    /// `relation := add_chain [ COMP_OP add_chain ]`
    fn parse_relation(&mut self) -> Result<Expr> {
        let start = self.token.span;
        let lhs = self.parse_add_chain()?;
        if let TokenKind::Compare(op) = self.token.kind.clone() {
            self.bump();
            let rhs = self.parse_add_chain()?;
            return Ok(Expr::Relation(RelationExpr { lhs: Box::new(lhs), rhs: Box::new(rhs), op, span: start }));
        }
        Ok(lhs)
    }

    /// `add_chain := mul_chain ((+|-) mul_chain)*`
    fn parse_add_chain(&mut self) -> Result<Expr> {
        let start = self.token.span;
        let first = self.parse_mul_chain()?;
        let mut rest = Vec::new();
        while let Some(op) = self.token.kind.as_add_op() {
            self.bump();
            rest.push((op, self.parse_mul_chain()?));
        }
        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Add(AddExpr { first: Box::new(first), rest, span: start }))
        }
    }

    /// `mul_chain := factor ((*|/) factor)*`
    fn parse_mul_chain(&mut self) -> Result<Expr> {
        let start = self.token.span;
        let first = self.parse_factor()?;
        let mut rest = Vec::new();
        while let Some(op) = self.token.kind.as_mul_op() {
            self.bump();
            rest.push((op, self.parse_factor()?));
        }
        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Mul(MulExpr { first: Box::new(first), rest, span: start }))
        }
    }

    /// `factor := [UNARY_OP|+|-] ( "(" expr ")" | value )`
    ///
    /// At most one leading unary token is consumed; a second one is simply
    /// not a valid start of `"(" expr ")"` or `value`, so `--x` is a parse
    /// error rather than double negation.
    fn parse_factor(&mut self) -> Result<Expr> {
        let start = self.token.span;
        if let Some(op) = self.token.kind.as_unary_op() {
            self.bump();
            let inner = self.parse_atom()?;
            return Ok(Expr::Unary(UnaryExpr { op, inner: Box::new(inner), span: start }));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        if self.eat(&TokenKind::OpenParen) {
            let inner = self.parse_expr()?;
            self.expect(TokenKind::CloseParen)?;
            return Ok(inner);
        }
        self.parse_value()
    }

    /// `value := CONST | IDENT postfix*`
    fn parse_value(&mut self) -> Result<Expr> {
        let start = self.token.span;
        match self.token.kind.clone() {
            TokenKind::Number(n) => {
                self.bump();
                Ok(Expr::Const(ConstExpr { value: Literal::Number(n), span: start }))
            }
            TokenKind::Str(s) => {
                self.bump();
                Ok(Expr::Const(ConstExpr { value: Literal::String(s), span: start }))
            }
            TokenKind::Ident(name) => {
                self.bump();
                let postfixes = self.parse_postfixes()?;
                Ok(Expr::Ident(IdentExpr { name, postfixes, span: start }))
            }
            other => Err(self.error(format!("expected an expression, found '{other}'"))),
        }
    }

    /// `postfix := "(" [expr ("," expr)*] ")" | "." IDENT`
    fn parse_postfixes(&mut self) -> Result<Vec<Postfix>> {
        let mut postfixes = Vec::new();
        loop {
            let start = self.token.span;
            if self.eat(&TokenKind::OpenParen) {
                let mut args = Vec::new();
                if !self.check(&TokenKind::CloseParen) {
                    args.push(self.parse_expr()?);
                    while self.eat(&TokenKind::Comma) {
                        args.push(self.parse_expr()?);
                    }
                }
                self.expect(TokenKind::CloseParen)?;
                postfixes.push(Postfix::Call(Call { args, span: start }));
            } else if self.eat(&TokenKind::Dot) {
                let (name, _) = self.expect_ident()?;
                postfixes.push(Postfix::Field(FieldAccess { name, span: start }));
            } else {
                break;
            }
        }
        Ok(postfixes)
    }

    /// Returns the parsed `Expr` and, when it is a bare identifier with no
    /// postfixes, its name — used by `stmt.rs` to decide between an
    /// assignment and a bare expression statement.
    pub(crate) fn parse_expr_as_assign_target(&mut self) -> Result<(Expr, Option<String>)> {
        let expr = self.parse_expr()?;
        let name = match &expr {
            Expr::Ident(IdentExpr { name, postfixes, .. }) if postfixes.is_empty() => Some(name.clone()),
            _ => None,
        };
        Ok((expr, name))
    }
}

fn collapse_or(mut operands: Vec<Expr>, span: turtle_span::Span) -> Expr {
    if operands.len() == 1 {
        operands.pop().unwrap()
    } else {
        Expr::LogicOr(LogicOrExpr { operands, span })
    }
}

fn collapse_and(mut operands: Vec<Expr>, span: turtle_span::Span) -> Expr {
    if operands.len() == 1 {
        operands.pop().unwrap()
    } else {
        Expr::LogicAnd(LogicAndExpr { operands, span })
    }
}
