//! hdldoc - Command Line Entry Point
//!
//! ```text
//! hdldoc [PATH]
//! ```
//!
//! Reads the file at `PATH`, or standard input without one, and writes the
//! translated stubs to standard output. Diagnostics go to standard error;
//! set `RUST_LOG=debug` to see which constructs fell back to comments.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use log::info;

use hdldoc::{translate_source, Result, TranslateError};

#[derive(Parser, Debug)]
#[command(
    name = "hdldoc",
    author,
    version,
    about = "Rewrite SystemVerilog into C-like stubs for Doxygen"
)]
struct Cli {
    /// SystemVerilog source file; standard input is read when omitted
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| TranslateError::ReadInput {
            path: path.clone(),
            source,
        }),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(TranslateError::ReadStdin)?;
            Ok(source)
        }
    }
}

fn write_output(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(TranslateError::WriteOutput)
}

fn run(cli: &Cli) -> Result<()> {
    let source = read_input(cli.path.as_ref())?;
    info!(
        "translating {} ({} lines)",
        cli.path
            .as_ref()
            .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string()),
        source.lines().count()
    );
    let output = translate_source(&source);
    write_output(&output)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("hdldoc: {}", e);
        exit(1);
    }
}
