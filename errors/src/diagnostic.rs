use crate::Error;
use colored::Colorize as _;
use std::fmt::Write as _;

/// Renders an [`Error`] the same way across every front end: one line naming
/// the error, one line naming its location, then a contextual source
/// snippet with a caret under the offending column.
///
/// Mirrors the original reference driver's `"Error: {msg}"` / `"At: {loc}"`
/// / source-region layout (see `logo_app.py::main` in the project history),
/// generalized here into a reusable, colorized formatter.
pub fn render(source: &str, error: &Error) -> String {
    let span = error.span();
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Error:".red().bold(), error);
    let _ = writeln!(out, "{} {}", "At:".red().bold(), span);
    out.push_str(&snippet(source, span.line, span.column));
    out
}

/// Up to 5 preceding lines plus the offending line, with a caret under the
/// offending column.
fn snippet(source: &str, line: usize, column: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let first = line.saturating_sub(5);
    let mut out = String::new();
    for (i, text) in lines.iter().enumerate().take(line + 1).skip(first) {
        let _ = writeln!(out, "{:>5} | {}", i + 1, text);
    }
    let _ = writeln!(out, "{}^", " ".repeat(8 + column));
    out
}
