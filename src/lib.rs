//! A single-pass bytecode compiler and stack-based virtual machine for a
//! small dynamically-typed scripting language.
//!
//! See [part III][bytecode] of [Crafting Interpreters][book] for the design
//! this interpreter is patterned after.
//!
//! [book]: https://craftinginterpreters.com/
//! [bytecode]: https://craftinginterpreters.com/a-bytecode-virtual-machine.html

pub mod chunk;
pub mod cli;
pub mod compiler;
pub mod debug;
pub mod error;
pub mod memory;
pub mod object;
pub mod scanner;
pub mod table;
pub mod utils;
pub mod value;
pub mod vm;

/// Re-exports of the most commonly needed items, for callers embedding the
/// interpreter rather than going through the CLI.
pub mod prelude {
  pub use crate::chunk::{Chunk, OpCode};
  pub use crate::error::LoxError;
  pub use crate::value::Value;
  pub use crate::vm::VM;
}
