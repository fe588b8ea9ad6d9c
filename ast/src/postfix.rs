use crate::{Expr, Node, simple_node_impl};
use std::fmt;
use turtle_span::Span;

/// A `.field` access applied to the value to its left.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldAccess {
    pub name: String,
    pub span: Span,
}
simple_node_impl!(FieldAccess);

impl fmt::Display for FieldAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.name)
    }
}

/// A `(args)` call applied to the value to its left.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Call {
    pub args: Vec<Expr>,
    pub span: Span,
}
simple_node_impl!(Call);

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// One link of a postfix chain (`a.b.c()`), applied left-to-right to the
/// value produced by everything to its left.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Postfix {
    Field(FieldAccess),
    Call(Call),
}

impl Node for Postfix {
    fn span(&self) -> Span {
        match self {
            Self::Field(n) => n.span(),
            Self::Call(n) => n.span(),
        }
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(n) => n.fmt(f),
            Self::Call(n) => n.fmt(f),
        }
    }
}
