use crate::{Block, Node, simple_node_impl};
use turtle_span::Span;

/// A top-level procedure definition: `Def name(params) { body }`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProcDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
    pub span: Span,
}
simple_node_impl!(ProcDef);

/// A whole source file: its procedure definitions, in declaration order,
/// followed by the top-level statements that run when the program starts.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Program {
    pub definitions: Vec<ProcDef>,
    pub statements: Vec<crate::Stmt>,
}
