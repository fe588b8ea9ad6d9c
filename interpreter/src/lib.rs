//! Tree-walking evaluator for the Turtle scripting language.
//!
//! [`run`] is the single entry point front ends (`turtle-cli`,
//! `turtle-server`) need: it owns parsing, installs the built-ins, runs the
//! program, and hands back whatever the program produced — a [`Canvas`]
//! and the accumulated log text — or the first [`Error`] encountered.

mod builtins;
mod canvas;
mod context;
mod evaluate;
mod flow;
mod value;

pub use canvas::Canvas;
pub use context::Context;
pub use flow::{EvalResult, Flow};
pub use value::{Native, Procedure, Turtle, Value};

use std::cell::RefCell;
use std::rc::Rc;
use turtle_errors::{Error, Result};

/// Parses and runs a whole program from source, starting from a fresh
/// root context. Returns the final canvas contents and the text written
/// by `print`/`println`, or the first error the pipeline hit.
pub fn run(source: &str) -> Result<(Canvas, String)> {
    let program = turtle_parser::parse_program(source)?;

    let root = Context::new_root();
    let canvas = Rc::new(RefCell::new(Canvas::new()));
    let log = Rc::new(RefCell::new(String::new()));
    builtins::install(&root, canvas.clone(), log.clone());

    evaluate::execute_program(&program, &root)?;

    // Turtle objects created during execution hold their own clone of this
    // `Rc`, so it can't generally be unwrapped — clone the recorded state
    // out instead.
    let canvas = canvas.borrow().clone();
    let log = log.borrow().clone();
    Ok((canvas, log))
}
