//! # CLI
//!
//! The REPL/file-runner front end. Not part of the interpreter's core
//! engineering, but required to have a runnable, testable program.

use std::io::{self, Write};

use crate::error::LoxError;
use crate::vm::VM;

/// Parse `args` (already stripped of argv[0], see [`crate::utils::get_args`])
/// and run the REPL or a single file, returning the process exit code.
pub fn run(args: Vec<String>) -> i32 {
  let mut verbose = false;
  let mut positional = Vec::with_capacity(args.len());
  for arg in args {
    if arg == "-v" || arg == "--verbose" {
      verbose = true;
    } else {
      positional.push(arg);
    }
  }

  if verbose && std::env::var("RUST_LOG").is_err() {
    std::env::set_var("RUST_LOG", "debug");
  }

  match positional.len() {
    0 => {
      run_repl();
      0
    }
    1 => run_file(&positional[0]),
    _ => {
      eprintln!("Usage: lanterne [-v|--verbose] [script]");
      64
    }
  }
}

fn run_repl() {
  let mut vm = VM::default();
  let stdin = io::stdin();
  loop {
    print!("> ");
    if io::stdout().flush().is_err() {
      break;
    }

    let mut line = String::new();
    match stdin.read_line(&mut line) {
      Ok(0) => {
        println!();
        break;
      }
      Ok(_) => {
        // Errors are already reported to stderr by the compiler/VM; the
        // REPL keeps going regardless.
        let _ = vm.interpret(&line);
      }
      Err(_) => break,
    }
  }
}

fn run_file(path: &str) -> i32 {
  let content = match std::fs::read_to_string(path) {
    Ok(content) => content,
    Err(e) => {
      eprintln!("Failed to open file `{}`: {}", path, e);
      return 74;
    }
  };

  let mut vm = VM::default();
  match vm.interpret(&content) {
    Ok(()) => 0,
    Err(LoxError::CompileError(_)) => 65,
    Err(LoxError::RuntimeError(_)) => 70,
  }
}
