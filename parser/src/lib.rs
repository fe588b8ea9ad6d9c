//! Lexer and recursive-descent parser turning Turtle source text into a
//! [`turtle_ast::Program`].

mod reader;
mod parser;
mod tokenizer;

pub use parser::Parser;
pub use reader::SourceReader;
pub use tokenizer::{Lexer, Token, TokenKind};

use turtle_ast::Program;
use turtle_errors::Result;

/// Parses a whole source file into a [`Program`].
pub fn parse_program(source: &str) -> Result<Program> {
    Parser::new(source)?.parse_program()
}
