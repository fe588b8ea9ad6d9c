use crate::value::Value;
use turtle_errors::{Error, RuntimeError};
use turtle_span::Span;

/// Every evaluation step can either fail, or — uniquely for `return` —
/// transfer control directly to the enclosing procedure invocation.
/// `return` is deliberately not modeled as an [`Error`] variant: it is
/// control flow, not a failure, and the public error type should never
/// need a case for "a catchable non-error happened".
#[derive(Debug, Clone)]
pub enum Flow {
    Error(Error),
    /// The span is the `return(...)` call site, kept only so that a
    /// `Return` that escapes every procedure frame can be reported as
    /// `RuntimeError::ReturnOutsideProcedure` at a useful location.
    Return(Value, Span),
}

pub type EvalResult<T> = Result<T, Flow>;

impl From<Error> for Flow {
    fn from(err: Error) -> Self {
        Flow::Error(err)
    }
}

impl From<RuntimeError> for Flow {
    fn from(err: RuntimeError) -> Self {
        Flow::Error(err.into())
    }
}
