use turtle_span::Span;

/// A node in the AST. Every node carries the location of its first token,
/// used solely for diagnostics — the evaluator never mutates it.
///
/// This is a deliberately smaller cousin of a full-blown compiler's `Node`
/// trait: there is no `NodeID` bookkeeping here, since a single-pass
/// tree-walking evaluator has no later compiler passes that need to key
/// side tables off of node identity.
pub trait Node: std::fmt::Debug {
    fn span(&self) -> Span;
}

/// Implements [`Node`] for a struct with a `span: Span` field.
#[macro_export]
macro_rules! simple_node_impl {
    ($ty:ty) => {
        impl $crate::Node for $ty {
            fn span(&self) -> turtle_span::Span {
                self.span
            }
        }
    };
}
