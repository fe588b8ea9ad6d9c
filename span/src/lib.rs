//! Source location handling for the Turtle scripting language.
//!
//! Every token and every AST node carries a [`Span`] identifying the first
//! character of the construct it covers. Locations are zero-based
//! `(line, column)` pairs; there is no byte-offset tracking because the
//! interpreter never needs to slice the original source by anything other
//! than whole lines (see the diagnostic snippet rendering in `turtle-errors`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(line, column)` position in a source file, zero-based.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    /// Creates a new span at the given zero-based line and column.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// A placeholder span for synthetic nodes (built-ins) that have no
    /// corresponding source text.
    pub const fn dummy() -> Self {
        Self { line: 0, column: 0 }
    }

    /// One-based line number, for human-facing diagnostics.
    pub fn display_line(&self) -> usize {
        self.line + 1
    }

    /// One-based column number, for human-facing diagnostics.
    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.display_line(), self.display_column())
    }
}
