//! REPL (Read-Eval-Print Loop) for thisfunc

use crate::interp::Interpreter;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

const PROMPT: &str = "> ";
const HISTORY_FILE: &str = ".thisfunc_history";

/// What a `:`-prefixed line asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplCommand {
    Quit,
    Help,
    Clear,
    Unknown,
}

/// REPL state
pub struct Repl {
    editor: DefaultEditor,
    interpreter: Interpreter,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Create a new REPL
    pub fn new() -> RlResult<Self> {
        let editor = DefaultEditor::new()?;
        let interpreter = Interpreter::new();

        // Try to find history file in home directory
        let history_path = dirs_home().map(|h| h.join(HISTORY_FILE));

        let mut repl = Repl {
            editor,
            interpreter,
            history_path,
        };

        // Load history if available
        if let Some(ref path) = repl.history_path {
            let _ = repl.editor.load_history(path);
        }

        Ok(repl)
    }

    /// Run the REPL
    pub fn run(&mut self) -> RlResult<()> {
        println!("thisfunc interpreter");
        println!("Type :help for help, :quit or exit to leave.\n");

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    // Add to history
                    let _ = self.editor.add_history_entry(line);

                    // The bare keyword quits too
                    if line == "exit" {
                        println!("Goodbye!");
                        break;
                    }

                    // Handle commands
                    if line.starts_with(':') {
                        if self.handle_command(parse_command(line), line) {
                            break;
                        }
                        continue;
                    }

                    self.eval_line(line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = self.history_path {
            let _ = self.editor.save_history(path);
        }

        Ok(())
    }

    /// Handle a REPL command; returns true to quit
    fn handle_command(&mut self, command: ReplCommand, line: &str) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Goodbye!");
                true
            }
            ReplCommand::Help => {
                print_help();
                false
            }
            ReplCommand::Clear => {
                print!("\x1B[2J\x1B[1;1H");
                false
            }
            ReplCommand::Unknown => {
                println!("Unknown command: {line}");
                println!("Type :help for help.");
                false
            }
        }
    }

    /// Feed one line to the interpreter and print what comes back.
    /// Declarations produce no output; errors never end the session.
    fn eval_line(&mut self, line: &str) {
        match self.interpreter.execute(line) {
            Ok(Some(value)) => println!("{value}"),
            Ok(None) => {}
            Err(err) => eprintln!("Error: {err}"),
        }
    }
}

/// Parse a `:`-prefixed command line
fn parse_command(line: &str) -> ReplCommand {
    match line {
        ":quit" | ":q" | ":exit" => ReplCommand::Quit,
        ":help" | ":h" | ":?" => ReplCommand::Help,
        ":clear" => ReplCommand::Clear,
        _ => ReplCommand::Unknown,
    }
}

/// Print help message
fn print_help() {
    println!("thisfunc REPL Commands:");
    println!("  :help, :h, :?   Show this help");
    println!("  :quit, :q       Exit (so does `exit`)");
    println!("  :clear          Clear the screen");
    println!();
    println!("Declarations (name <- body):");
    println!("  five <- 5                  constant");
    println!("  xs <- list(1, 2, 3)        list");
    println!("  double <- mul(#0, #0)      expression over placeholders #0, #1, ...");
    println!();
    println!("Expressions use prefix calls and may recurse:");
    println!("  add(1, mul(2, 3))");
    println!("  fact <- if(le(#0, 1), 1, mul(#0, fact(sub(#0, 1))))");
    println!();
    println!("Built-in functions:");
    println!("  add sub mul div pow        two-argument arithmetic");
    println!("  sqrt sin cos               one-argument math");
    println!("  nand le eq                 logic; 1 is true and 0 is false");
    println!("  if(cond, then, else)       only the taken branch is evaluated");
    println!("  list head tail             list construction and access");
    println!("  map(f, xs) filter(p, xs)   f and p name single-argument functions");
}

/// Get home directory
fn dirs_home() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
