use crate::reader::SourceReader;
use crate::tokenizer::token::{Token, TokenKind};
use turtle_errors::{LexError, Result};
use turtle_span::Span;

/// Converts characters into tokens with one-token lookahead.
pub struct Lexer<'a> {
    reader: SourceReader<'a>,
    peeked: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { reader: SourceReader::new(source), peeked: None }
    }

    /// Returns the next token without consuming it.
    pub fn peek_token(&mut self) -> Result<&Token> {
        if self.peeked.is_none() {
            self.peeked = Some(self.scan_token()?);
        }
        Ok(self.peeked.as_ref().unwrap())
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        self.scan_token()
    }

    fn scan_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let start = self.reader.location();
        let Some(c) = self.reader.next_char() else {
            return Ok(Token::eof(start));
        };

        let kind = match c {
            '+' => TokenKind::Add,
            '-' => TokenKind::Sub,
            '*' => TokenKind::Mul,
            '/' => TokenKind::Div,
            '{' => TokenKind::OpenBlock,
            '}' => TokenKind::CloseBlock,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            '<' => self.one_or_two(turtle_ast::CompareOp::Lt, '=', turtle_ast::CompareOp::Le).into(),
            '>' => self.one_or_two(turtle_ast::CompareOp::Gt, '=', turtle_ast::CompareOp::Ge).into(),
            '=' => {
                if self.reader.peek_char() == Some('=') {
                    self.reader.next_char();
                    TokenKind::Compare(turtle_ast::CompareOp::Eq)
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.reader.peek_char() == Some('=') {
                    self.reader.next_char();
                    TokenKind::Compare(turtle_ast::CompareOp::Neq)
                } else {
                    TokenKind::Not
                }
            }
            '|' => {
                if self.reader.peek_char() == Some('|') {
                    self.reader.next_char();
                    TokenKind::Or
                } else {
                    return Err(LexError::UnexpectedChar { ch: '|', span: start }.into());
                }
            }
            '&' => {
                if self.reader.peek_char() == Some('&') {
                    self.reader.next_char();
                    TokenKind::And
                } else {
                    return Err(LexError::UnexpectedChar { ch: '&', span: start }.into());
                }
            }
            '"' => self.scan_string(start)?,
            c if c.is_alphabetic() => self.scan_identifier(c),
            c if c.is_ascii_digit() => self.scan_number(c, start)?,
            c => return Err(LexError::UnexpectedChar { ch: c, span: start }.into()),
        };

        Ok(Token::new(kind, start))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.reader.peek_char(), Some(c) if c.is_whitespace()) {
            self.reader.next_char();
        }
    }

    fn one_or_two(
        &mut self,
        single: turtle_ast::CompareOp,
        second: char,
        combined: turtle_ast::CompareOp,
    ) -> turtle_ast::CompareOp {
        if self.reader.peek_char() == Some(second) {
            self.reader.next_char();
            combined
        } else {
            single
        }
    }

    fn scan_string(&mut self, start: Span) -> Result<TokenKind> {
        let mut value = String::new();
        loop {
            match self.reader.next_char() {
                None => return Err(LexError::UnterminatedString { span: start }.into()),
                Some('"') => break,
                Some('\\') => match self.reader.next_char() {
                    None => return Err(LexError::UnterminatedString { span: start }.into()),
                    Some(escaped) => value.push(escaped),
                },
                Some(c) => value.push(c),
            }
        }
        Ok(TokenKind::Str(value))
    }

    fn scan_identifier(&mut self, first: char) -> TokenKind {
        let mut name = String::new();
        name.push(first);
        while matches!(self.reader.peek_char(), Some(c) if c.is_alphanumeric() || c == '_') {
            name.push(self.reader.next_char().unwrap());
        }
        match name.as_str() {
            "fun" => TokenKind::Fun,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            _ => TokenKind::Ident(name),
        }
    }

    fn scan_number(&mut self, first: char, start: Span) -> Result<TokenKind> {
        let mut text = String::new();
        text.push(first);

        if first == '0' && matches!(self.reader.peek_char(), Some(c) if c.is_ascii_digit()) {
            while matches!(self.reader.peek_char(), Some(c) if c.is_ascii_digit()) {
                text.push(self.reader.next_char().unwrap());
            }
            return Err(LexError::MalformedNumber { text, span: start }.into());
        }

        while matches!(self.reader.peek_char(), Some(c) if c.is_ascii_digit()) {
            text.push(self.reader.next_char().unwrap());
        }

        if self.reader.peek_char() == Some('.') {
            text.push(self.reader.next_char().unwrap());
            if !matches!(self.reader.peek_char(), Some(c) if c.is_ascii_digit()) {
                return Err(LexError::MalformedNumber { text, span: start }.into());
            }
            while matches!(self.reader.peek_char(), Some(c) if c.is_ascii_digit()) {
                text.push(self.reader.next_char().unwrap());
            }
        }

        if matches!(self.reader.peek_char(), Some(c) if c.is_alphabetic()) {
            let bad = self.reader.next_char().unwrap();
            return Err(LexError::UnexpectedChar { ch: bad, span: start });
        }

        Ok(TokenKind::Number(text.parse().expect("lexer only emits well-formed numeric text")))
    }
}

impl From<turtle_ast::CompareOp> for TokenKind {
    fn from(op: turtle_ast::CompareOp) -> Self {
        TokenKind::Compare(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            let done = matches!(tok.kind, TokenKind::Eof);
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn single_and_double_char_operators() {
        let got = kinds("<= >= == != < > = !");
        assert_eq!(
            got,
            vec![
                TokenKind::Compare(turtle_ast::CompareOp::Le),
                TokenKind::Compare(turtle_ast::CompareOp::Ge),
                TokenKind::Compare(turtle_ast::CompareOp::Eq),
                TokenKind::Compare(turtle_ast::CompareOp::Neq),
                TokenKind::Compare(turtle_ast::CompareOp::Lt),
                TokenKind::Compare(turtle_ast::CompareOp::Gt),
                TokenKind::Assign,
                TokenKind::Not,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn rejects_lone_pipe_and_amp() {
        let mut lexer = Lexer::new("|");
        assert!(matches!(lexer.next_token(), Err(turtle_errors::Error::Lex(LexError::UnexpectedChar { ch: '|', .. }))));
        let mut lexer = Lexer::new("&");
        assert!(matches!(lexer.next_token(), Err(turtle_errors::Error::Lex(LexError::UnexpectedChar { ch: '&', .. }))));
    }

    #[test]
    fn numbers() {
        assert_eq!(kinds("0")[0], TokenKind::Number(0.0));
        assert_eq!(kinds("6234")[0], TokenKind::Number(6234.0));
        assert_eq!(kinds("1.34375")[0], TokenKind::Number(1.34375));
        assert!(matches!(Lexer::new("032").next_token(), Err(turtle_errors::Error::Lex(LexError::MalformedNumber { .. }))));
        assert!(matches!(Lexer::new("1.").next_token(), Err(turtle_errors::Error::Lex(LexError::MalformedNumber { .. }))));
        assert!(matches!(Lexer::new("12abc").next_token(), Err(turtle_errors::Error::Lex(LexError::UnexpectedChar { .. }))));
    }

    #[test]
    fn strings_with_escapes() {
        let got = kinds(r#""a\"b""#);
        assert_eq!(got[0], TokenKind::Str("a\"b".to_string()));
    }

    #[test]
    fn unterminated_string_errors() {
        assert!(matches!(
            Lexer::new("\"abc").next_token(),
            Err(turtle_errors::Error::Lex(LexError::UnterminatedString { .. }))
        ));
    }

    #[test]
    fn identifiers_and_keywords() {
        let got = kinds("fun if else while foo_1");
        assert_eq!(
            got,
            vec![
                TokenKind::Fun,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::Ident("foo_1".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = Lexer::new("+ -");
        assert_eq!(lexer.peek_token().unwrap().kind, TokenKind::Add);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Add);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Sub);
    }

    #[test]
    fn eof_is_sticky() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }
}
