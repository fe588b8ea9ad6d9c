use std::fmt;
use turtle_ast::{AddOp, CompareOp, MulOp, UnaryOp};
use turtle_span::Span;

/// The kind of a token, carrying whatever lexeme data the kind needs.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Assign,
    Eof,

    Fun,
    If,
    Else,
    While,

    OpenBlock,
    CloseBlock,
    OpenParen,
    CloseParen,

    Add,
    Sub,
    Mul,
    Div,

    /// `!`, the only token-level unary operator (`+`/`-` are reused from
    /// [`Self::Add`]/[`Self::Sub`] by the parser).
    Not,

    Or,
    And,
    Compare(CompareOp),

    Number(f64),
    Str(String),
    Ident(String),

    Dot,
    Comma,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign => write!(f, "="),
            Self::Eof => write!(f, "<eof>"),
            Self::Fun => write!(f, "fun"),
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::While => write!(f, "while"),
            Self::OpenBlock => write!(f, "{{"),
            Self::CloseBlock => write!(f, "}}"),
            Self::OpenParen => write!(f, "("),
            Self::CloseParen => write!(f, ")"),
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
            Self::Not => write!(f, "!"),
            Self::Or => write!(f, "||"),
            Self::And => write!(f, "&&"),
            Self::Compare(op) => write!(f, "{op}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Ident(name) => write!(f, "{name}"),
            Self::Dot => write!(f, "."),
            Self::Comma => write!(f, ","),
        }
    }
}

impl TokenKind {
    pub fn as_add_op(&self) -> Option<AddOp> {
        match self {
            Self::Add => Some(AddOp::Add),
            Self::Sub => Some(AddOp::Sub),
            _ => None,
        }
    }

    pub fn as_mul_op(&self) -> Option<MulOp> {
        match self {
            Self::Mul => Some(MulOp::Mul),
            Self::Div => Some(MulOp::Div),
            _ => None,
        }
    }

    pub fn as_unary_op(&self) -> Option<UnaryOp> {
        match self {
            Self::Add => Some(UnaryOp::Plus),
            Self::Sub => Some(UnaryOp::Minus),
            Self::Not => Some(UnaryOp::Not),
            _ => None,
        }
    }
}

/// A token plus the location of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(span: Span) -> Self {
        Self { kind: TokenKind::Eof, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
