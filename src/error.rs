//! # Error
//!
//! The typed error surfaced by the compiler and the virtual machine.

use thiserror::Error;

/// ## LoxError
///
/// The only two ways a well-formed program can fail to finish successfully.
/// Both variants carry an already-formatted, user-facing message; callers
/// should not pattern-match on the message text, only on the variant.
#[derive(Debug, Clone, Error)]
pub enum LoxError {
  #[error("{0}")]
  CompileError(String),
  #[error("{0}")]
  RuntimeError(String),
}

impl LoxError {
  pub fn compile(message: impl Into<String>) -> Self {
    Self::CompileError(message.into())
  }

  pub fn runtime(message: impl Into<String>) -> Self {
    Self::RuntimeError(message.into())
  }
}
