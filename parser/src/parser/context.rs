use crate::tokenizer::{Lexer, Token, TokenKind};
use std::mem;
use turtle_errors::{ParseError, Result};
use turtle_span::Span;

/// Holds the full token stream for one source file plus a one-token
/// lookbehind, and drives the recursive-descent grammar in `expr.rs` /
/// `stmt.rs`.
pub struct Parser {
    /// Remaining un-bumped tokens, reversed so `pop` is the cheap end.
    tokens: Vec<Token>,
    pub(crate) token: Token,
    pub(crate) prev_token: Token,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token()?;
            let done = matches!(tok.kind, TokenKind::Eof);
            tokens.push(tok);
            if done {
                break;
            }
        }
        tokens.reverse();

        let first = tokens.pop().expect("tokenizer always yields at least Eof");
        Ok(Self { tokens, prev_token: first.clone(), token: first })
    }

    /// Advances by one token. Panics if called past `Eof` — that would be
    /// a parser bug, not a user-facing error.
    pub(crate) fn bump(&mut self) {
        if matches!(self.prev_token.kind, TokenKind::Eof) && matches!(self.token.kind, TokenKind::Eof) {
            panic!("attempted to bump the parser past EOF");
        }
        let next = self.tokens.pop().unwrap_or_else(|| Token::eof(self.token.span));
        self.prev_token = mem::replace(&mut self.token, next);
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        &self.token.kind == kind
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Span> {
        if self.check(&kind) {
            let span = self.token.span;
            self.bump();
            Ok(span)
        } else {
            Err(ParseError::new(format!("expected '{kind}', found '{}'", self.token.kind), self.token.span).into())
        }
    }

    pub(crate) fn expect_ident(&mut self) -> Result<(String, Span)> {
        match self.token.kind.clone() {
            TokenKind::Ident(name) => {
                let span = self.token.span;
                self.bump();
                Ok((name, span))
            }
            _ => Err(ParseError::new(format!("expected identifier, found '{}'", self.token.kind), self.token.span).into()),
        }
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> turtle_errors::Error {
        ParseError::new(message, self.token.span).into()
    }
}
