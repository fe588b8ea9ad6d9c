//! Command-line driver for the Turtle scripting language.
//!
//! Parses and runs a source file, then prints a textual summary of the
//! canvas it drew — there is no window renderer in this core, only the
//! stand-in the distilled interface calls for.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use turtle_errors::render;
use turtle_interpreter::Canvas;

/// Run a Turtle program.
#[derive(Parser, Debug)]
#[command(name = "turtle")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run a Turtle scripting language program", long_about = None)]
struct Cli {
    /// Path to the source file to run.
    file: PathBuf,

    /// Suppress the post-run canvas summary.
    #[arg(short = 'n', long = "no-render")]
    no_render: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_target(false).init();

    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(_) => {
            tracing::warn!("source file not found: {}", cli.file.display());
            return ExitCode::SUCCESS;
        }
    };

    tracing::info!("running {}", cli.file.display());
    match turtle_interpreter::run(&source) {
        Ok((canvas, log)) => {
            print!("{log}");
            if !cli.no_render {
                render_canvas_summary(&canvas);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("{}", render(&source, &err));
            ExitCode::FAILURE
        }
    }
}

/// The textual stand-in for an actual drawing surface: one line per
/// turtle naming its point count and final heading.
fn render_canvas_summary(canvas: &Canvas) {
    for (id, line) in canvas.turtle_lines() {
        let angle = canvas.turtle_angles().get(id).copied().unwrap_or(0.0);
        println!("turtle {id}: {} point(s), heading {angle}", line.len());
    }
}
