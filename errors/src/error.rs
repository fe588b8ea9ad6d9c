use crate::{LexError, ParseError, RuntimeError};
use turtle_span::Span;

/// The union of every error kind the interpreter can report, from lexing
/// through evaluation. User-facing surfaces (the CLI, the HTTP embedding)
/// only ever need to handle this one type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Lex(#[from] LexError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The source location the error should be reported at.
    pub fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span(),
            Self::Parse(e) => e.span(),
            Self::Runtime(e) => e.span(),
        }
    }
}
