use crate::{AddOp, CompareOp, Literal, MulOp, Node, Postfix, UnaryOp, simple_node_impl};
use std::fmt;
use turtle_span::Span;

/// `a || b || c`, flattened. Only ever built with `operands.len() >= 2`;
/// a solitary operand is represented directly by that operand, with no
/// `LogicOr` wrapper (see `Node invariant 2` in the design notes).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicOrExpr {
    pub operands: Vec<Expr>,
    pub span: Span,
}
simple_node_impl!(LogicOrExpr);

/// `a && b && c`, flattened, with the same non-solitary invariant as
/// [`LogicOrExpr`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicAndExpr {
    pub operands: Vec<Expr>,
    pub span: Span,
}
simple_node_impl!(LogicAndExpr);

/// `lhs op rhs`. Only constructed when a comparison operator is actually
/// present — a bare arithmetic expression is never wrapped in a `Relation`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RelationExpr {
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub op: CompareOp,
    pub span: Span,
}
simple_node_impl!(RelationExpr);

/// `first (+|-) rest[0] (+|-) rest[1] ...`, left-folded at evaluation time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AddExpr {
    pub first: Box<Expr>,
    pub rest: Vec<(AddOp, Expr)>,
    pub span: Span,
}
simple_node_impl!(AddExpr);

/// `first (*|/) rest[0] (*|/) rest[1] ...`, left-folded at evaluation time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MulExpr {
    pub first: Box<Expr>,
    pub rest: Vec<(MulOp, Expr)>,
    pub span: Span,
}
simple_node_impl!(MulExpr);

/// A single leading `+ - !` applied to one factor.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub inner: Box<Expr>,
    pub span: Span,
}
simple_node_impl!(UnaryExpr);

/// A variable reference, optionally followed by a left-associative chain
/// of `.field` and `(args)` postfixes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IdentExpr {
    pub name: String,
    pub postfixes: Vec<Postfix>,
    pub span: Span,
}
simple_node_impl!(IdentExpr);

/// A literal number, string, or boolean.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConstExpr {
    pub value: Literal,
    pub span: Span,
}
simple_node_impl!(ConstExpr);

/// An expression, i.e. something that evaluates to a value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Expr {
    LogicOr(LogicOrExpr),
    LogicAnd(LogicAndExpr),
    Relation(RelationExpr),
    Add(AddExpr),
    Mul(MulExpr),
    Unary(UnaryExpr),
    Ident(IdentExpr),
    Const(ConstExpr),
}

impl Node for Expr {
    fn span(&self) -> Span {
        use Expr::*;
        match self {
            LogicOr(n) => n.span(),
            LogicAnd(n) => n.span(),
            Relation(n) => n.span(),
            Add(n) => n.span(),
            Mul(n) => n.span(),
            Unary(n) => n.span(),
            Ident(n) => n.span(),
            Const(n) => n.span(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogicOr(n) => {
                write!(f, "(")?;
                for (i, op) in n.operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " || ")?;
                    }
                    write!(f, "{op}")?;
                }
                write!(f, ")")
            }
            Self::LogicAnd(n) => {
                write!(f, "(")?;
                for (i, op) in n.operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " && ")?;
                    }
                    write!(f, "{op}")?;
                }
                write!(f, ")")
            }
            Self::Relation(n) => write!(f, "({} {} {})", n.lhs, n.op, n.rhs),
            Self::Add(n) => {
                write!(f, "{}", n.first)?;
                for (op, rhs) in &n.rest {
                    write!(f, " {op} {rhs}")?;
                }
                Ok(())
            }
            Self::Mul(n) => {
                write!(f, "{}", n.first)?;
                for (op, rhs) in &n.rest {
                    write!(f, " {op} {rhs}")?;
                }
                Ok(())
            }
            Self::Unary(n) => write!(f, "{}{}", n.op, n.inner),
            Self::Ident(n) => {
                write!(f, "{}", n.name)?;
                for postfix in &n.postfixes {
                    write!(f, "{postfix}")?;
                }
                Ok(())
            }
            Self::Const(n) => write!(f, "{}", n.value),
        }
    }
}
