//! # Chunk
//!
//! A module which represents a sequence of bytecode,
//! with it's dependent components.

use crate::{utils::Init, value::Value, value::ValueArray};
use enum_repr::EnumFromU8;

/// ## OpCode
///
/// An enum which represents the different opcodes used in the
/// virtual machine. `!=`, `<=` and `>=` are not opcodes of their own; the
/// compiler composes them from `Equal`/`Greater`/`Less` followed by `Not`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumFromU8)]
pub enum OpCode {
  Constant,
  Nil,
  True,
  False,
  Not,
  Negate,
  Add,
  Subtract,
  Multiply,
  Divide,
  Equal,
  Less,
  Greater,
  Print,
  Drop,
  DefineGlobal,
  GetGlobal,
  SetGlobal,
  GetLocal,
  SetLocal,
  Jump,
  JumpBack,
  ConditionalJump,
  Return,
}

/// ## Chunk
///
/// A struct which represents a chunk/sequence of bytecode: parallel `code`
/// and `lines` buffers plus a constant pool.
#[derive(Debug, Default, Clone)]
pub struct Chunk {
  pub(crate) code: Vec<u8>,
  pub(crate) constants: ValueArray,
  pub(crate) lines: Vec<usize>,
}

impl Chunk {
  /// Write a single byte to the given chunk, recording the source line it
  /// was emitted from.
  pub fn write_chunk(&mut self, byte: u8, line: usize) {
    self.code.push(byte);
    self.lines.push(line);
  }

  /// Add a constant to the given chunk, then return its index.
  ///
  /// The compiler, not the chunk, is responsible for rejecting indices that
  /// overflow a `u8` operand.
  pub fn add_constant(&mut self, value: Value) -> usize {
    self.constants.write(value)
  }

  /// Clear the given chunk.
  pub fn clear(&mut self) {
    self.code.clear();
    self.constants.clear();
    self.lines.clear();
  }

  /// Free the given chunk; an alias of [`Chunk::clear`] kept for symmetry
  /// with the VM's own `free`.
  pub fn free(&mut self) {
    self.clear();
  }
}

impl Init for Chunk {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn code_and_lines_stay_parallel() {
    let mut chunk = Chunk::init();
    chunk.write_chunk(OpCode::Nil as u8, 1);
    chunk.write_chunk(OpCode::Return as u8, 1);
    assert_eq!(chunk.code.len(), chunk.lines.len());
  }

  #[test]
  fn opcode_roundtrips_through_u8() {
    assert!(matches!(OpCode::from(OpCode::ConditionalJump as u8), OpCode::ConditionalJump));
  }
}
