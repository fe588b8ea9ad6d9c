//! Abstract syntax tree types produced by `turtle-parser` and consumed by
//! `turtle-interpreter`.
//!
//! The tree is a plain, immutable value type: every node owns its
//! children and carries a [`Span`](turtle_span::Span) for diagnostics.
//! There is no arena, no node-id indirection, no mutation after parsing.

mod expr;
mod literal;
mod node;
mod operator;
mod postfix;
mod program;
mod stmt;

pub use expr::{
    AddExpr, ConstExpr, Expr, IdentExpr, LogicAndExpr, LogicOrExpr, MulExpr, RelationExpr,
    UnaryExpr,
};
pub use literal::Literal;
pub use node::Node;
pub use operator::{AddOp, CompareOp, MulOp, UnaryOp};
pub use postfix::{Call, FieldAccess, Postfix};
pub use program::{ProcDef, Program};
pub use stmt::{Assign, Block, If, Stmt, While};
