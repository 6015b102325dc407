//! thisfunc CLI

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use thisfunc::error::report_error;
use thisfunc::interp::Interpreter;
use thisfunc::repl::Repl;

#[derive(Parser)]
#[command(name = "thisfunc", version, about = "thisfunc - a tiny prefix-call expression language")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a script file line by line
    Run {
        /// Script to execute
        file: PathBuf,
    },
    /// Start the interactive REPL (the default)
    Repl,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Run { file }) => run_file(&file),
        Some(Command::Repl) | None => start_repl(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn start_repl() -> Result<(), Box<dyn std::error::Error>> {
    Repl::new()?.run()?;
    Ok(())
}

/// Execute every line of a script against one interpreter instance.
///
/// Evaluated values are printed as they are produced. A failing line is
/// reported over its location in the source and execution continues with
/// the next line, so one bad declaration does not abandon the rest of the
/// script.
fn run_file(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();

    let mut interpreter = Interpreter::new();
    let mut offset = 0;
    for segment in source.split_inclusive('\n') {
        let line = segment.trim_end_matches(['\n', '\r']);
        let span = offset..offset + line.len();
        offset += segment.len();

        if line.trim().is_empty() {
            continue;
        }
        match interpreter.execute(line) {
            Ok(Some(value)) => println!("{value}"),
            Ok(None) => {}
            Err(error) => report_error(&filename, &source, span, &error),
        }
    }
    Ok(())
}
