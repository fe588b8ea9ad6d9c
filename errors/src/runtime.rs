use turtle_span::Span;

/// Errors raised while evaluating the AST.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    #[error("trying to access undefined variable: {name}")]
    UndefinedVariable { name: String, span: Span },

    #[error("redefinition of element '{name}'")]
    Redefinition { name: String, span: Span },

    #[error("numbers of arguments don't match: expected {expected}, found {found}")]
    ArityMismatch { expected: usize, found: usize, span: Span },

    #[error("division by zero")]
    DivisionByZero { span: Span },

    #[error("unsupported operation for types {lhs} and {rhs}")]
    TypeMismatch { lhs: String, rhs: String, span: Span },

    #[error("no field '{name}' on this object")]
    MissingField { name: String, span: Span },

    #[error("return outside procedure")]
    ReturnOutsideProcedure { span: Span },
}

impl RuntimeError {
    pub fn span(&self) -> Span {
        match self {
            Self::UndefinedVariable { span, .. }
            | Self::Redefinition { span, .. }
            | Self::ArityMismatch { span, .. }
            | Self::DivisionByZero { span }
            | Self::TypeMismatch { span, .. }
            | Self::MissingField { span, .. }
            | Self::ReturnOutsideProcedure { span } => *span,
        }
    }
}
