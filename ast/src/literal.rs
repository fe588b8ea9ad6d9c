use std::fmt;

/// A literal value as it appears in source text — the subset of the
/// runtime `Value` domain the parser can ever produce directly. The
/// interpreter's runtime `Value` wraps this plus the two variants
/// (`Procedure`, `Object`) that only ever arise during evaluation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Literal {
    Number(f64),
    Bool(bool),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}
