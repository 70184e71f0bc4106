//! # Compiler
//!
//! The compiler is a single-pass Pratt parser: it walks the token stream
//! exactly once, emitting bytecode directly into a [`crate::chunk::Chunk`] as
//! it goes. There is no intermediate AST.

use crate::{chunk::Chunk, error::LoxError};

pub mod parser;

use parser::Parser;

/// ## Precedence
///
/// The operator-precedence ladder, low to high. `Precedence::next()` steps
/// one rung up; used when parsing the right-hand side of a left-associative
/// binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Precedence {
  #[default]
  None,
  Assignment,
  Or,
  And,
  Equality,
  Comparison,
  Sum,
  Product,
  Unary,
  Call,
  Primary,
}

impl Precedence {
  pub fn next(self) -> Self {
    match self {
      Precedence::None => Precedence::Assignment,
      Precedence::Assignment => Precedence::Or,
      Precedence::Or => Precedence::And,
      Precedence::And => Precedence::Equality,
      Precedence::Equality => Precedence::Comparison,
      Precedence::Comparison => Precedence::Sum,
      Precedence::Sum => Precedence::Product,
      Precedence::Product => Precedence::Unary,
      Precedence::Unary => Precedence::Call,
      Precedence::Call => Precedence::Primary,
      Precedence::Primary => Precedence::Primary,
    }
  }
}

/// ## Local
///
/// Compile-time bookkeeping for one lexical-scope-stack entry. `depth == -1`
/// is the sentinel meaning "declared but not yet initialized", forbidding a
/// variable's initializer from referring to itself.
#[derive(Debug, Clone)]
pub struct Local {
  pub name: String,
  pub depth: i32,
}

pub const UNINITIALIZED_DEPTH: i32 = -1;

/// ## Compiler
///
/// The lexical-scope stack, tracked alongside the runtime value stack so
/// that local-variable slots can be resolved to absolute stack indices at
/// compile time.
#[derive(Debug, Default)]
pub struct Compiler {
  pub locals: Vec<Local>,
  pub scope_depth: i32,
}

impl Compiler {
  pub fn resolve_local(&self, name: &str) -> Option<(usize, i32)> {
    self
      .locals
      .iter()
      .enumerate()
      .rev()
      .find(|(_, local)| local.name == name)
      .map(|(slot, local)| (slot, local.depth))
  }
}

/// Compile `source` into a [`Chunk`], or collect the diagnostics already
/// printed during panic-mode recovery into a single [`LoxError::CompileError`].
pub fn compile(source: &str) -> Result<Chunk, LoxError> {
  let mut parser = Parser::new(source);
  let result = parser.run();
  if let Ok(chunk) = &result {
    log::debug!("compile: finished chunk ({} bytes)", chunk.code.len());
  }
  result
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn precedence_ladder_is_strictly_increasing() {
    assert!(Precedence::None < Precedence::Assignment);
    assert!(Precedence::Assignment < Precedence::Or);
    assert!(Precedence::Unary < Precedence::Call);
  }

  #[test]
  fn primary_is_a_fixed_point() {
    assert_eq!(Precedence::Primary.next(), Precedence::Primary);
  }
}
