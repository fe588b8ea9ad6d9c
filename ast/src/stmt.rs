use crate::{Expr, Node, simple_node_impl};
use std::fmt;
use turtle_span::Span;

/// `name = expr`. Assignment is a statement, never an expression — there
/// is no chained `a = b = c` and no embedding an assignment inside a
/// larger expression.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Assign {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}
simple_node_impl!(Assign);

/// `if cond { then } else { otherwise }`. `otherwise` is empty when no
/// `else` branch was written.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct If {
    pub condition: Expr,
    pub then_branch: Block,
    pub else_branch: Block,
    pub span: Span,
}
simple_node_impl!(If);

/// `while cond { body }`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct While {
    pub condition: Expr,
    pub body: Block,
    pub span: Span,
}
simple_node_impl!(While);

/// A brace-delimited sequence of statements, in source order.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

/// A statement, i.e. something executed for effect.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Stmt {
    Assign(Assign),
    If(If),
    While(While),
    Expr(Expr),
}

impl Node for Stmt {
    fn span(&self) -> Span {
        match self {
            Self::Assign(n) => n.span(),
            Self::If(n) => n.span(),
            Self::While(n) => n.span(),
            Self::Expr(n) => n.span(),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign(n) => write!(f, "{} = {}", n.name, n.value),
            Self::If(n) => {
                write!(f, "if {} {{ ... }}", n.condition)?;
                if !n.else_branch.statements.is_empty() {
                    write!(f, " else {{ ... }}")?;
                }
                Ok(())
            }
            Self::While(n) => write!(f, "while {} {{ ... }}", n.condition),
            Self::Expr(n) => write!(f, "{n}"),
        }
    }
}
