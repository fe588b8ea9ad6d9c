//! The error taxonomy shared by every stage of the Turtle interpreter:
//! lexing, parsing, and evaluation each get their own error enum, unified
//! by [`Error`] so the CLI and HTTP front ends only deal with one type.

mod diagnostic;
mod error;
mod lex;
mod parse;
mod runtime;

pub use diagnostic::render;
pub use error::Error;
pub use lex::LexError;
pub use parse::ParseError;
pub use runtime::RuntimeError;

pub type Result<T> = std::result::Result<T, Error>;
