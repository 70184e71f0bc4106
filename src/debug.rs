//! # Debug
//!
//! A module which represents the debugging utilities for the virtual machine:
//! a human-readable dump of a chunk's bytecode.

use crate::chunk::{Chunk, OpCode};

/// Named `Disassemble` (rather than `Debug`) to avoid colliding with
/// `std::fmt::Debug`.
pub trait Disassemble {
  /// Disassemble the given chunk.
  fn disassemble(&self, name: &str);

  /// Disassemble the given instruction, returning the offset of the next one.
  fn disassemble_instruction(&self, offset: usize) -> usize;

  /// Print a simple (no-operand) instruction.
  fn simple_instruction(&self, name: &str, offset: usize) -> usize;

  /// Print an instruction with a constant-pool operand.
  fn constant_instruction(&self, name: &str, offset: usize) -> usize;

  /// Print an instruction with a stack-slot operand.
  fn slot_instruction(&self, name: &str, offset: usize) -> usize;

  /// Print a jump instruction, showing both source offset and target.
  fn jump_instruction(&self, name: &str, sign: i32, offset: usize) -> usize;

  /// Get the line number of the given offset.
  fn line_number(&self, offset: usize) -> usize;
}

impl Disassemble for Chunk {
  fn disassemble(&self, name: &str) {
    println!("== {} ==", name);

    let mut offset = 0;
    while offset < self.code.len() {
      offset = self.disassemble_instruction(offset);
    }
  }

  fn disassemble_instruction(&self, offset: usize) -> usize {
    print!("{:04} ", offset);

    if offset > 0 && self.line_number(offset) == self.line_number(offset - 1) {
      print!("   | ");
    } else {
      print!("{:4} ", self.line_number(offset));
    }

    let instruction = self.code[offset];
    match OpCode::from(instruction) {
      OpCode::Constant => self.constant_instruction("CONSTANT", offset),
      OpCode::Nil => self.simple_instruction("NIL", offset),
      OpCode::True => self.simple_instruction("TRUE", offset),
      OpCode::False => self.simple_instruction("FALSE", offset),
      OpCode::Not => self.simple_instruction("NOT", offset),
      OpCode::Negate => self.simple_instruction("NEGATE", offset),
      OpCode::Add => self.simple_instruction("ADD", offset),
      OpCode::Subtract => self.simple_instruction("SUBTRACT", offset),
      OpCode::Multiply => self.simple_instruction("MULTIPLY", offset),
      OpCode::Divide => self.simple_instruction("DIVIDE", offset),
      OpCode::Equal => self.simple_instruction("EQUAL", offset),
      OpCode::Less => self.simple_instruction("LESS", offset),
      OpCode::Greater => self.simple_instruction("GREATER", offset),
      OpCode::Print => self.simple_instruction("PRINT", offset),
      OpCode::Drop => self.simple_instruction("DROP", offset),
      OpCode::DefineGlobal => self.constant_instruction("DEFINE_GLOBAL", offset),
      OpCode::GetGlobal => self.constant_instruction("GET_GLOBAL", offset),
      OpCode::SetGlobal => self.constant_instruction("SET_GLOBAL", offset),
      OpCode::GetLocal => self.slot_instruction("GET_LOCAL", offset),
      OpCode::SetLocal => self.slot_instruction("SET_LOCAL", offset),
      OpCode::Jump => self.jump_instruction("JUMP", 1, offset),
      OpCode::JumpBack => self.jump_instruction("JUMP_BACK", -1, offset),
      OpCode::ConditionalJump => self.jump_instruction("CONDITIONAL_JUMP", 1, offset),
      OpCode::Return => self.simple_instruction("RETURN", offset),
    }
  }

  fn simple_instruction(&self, name: &str, offset: usize) -> usize {
    println!("{}", name);
    offset + 1
  }

  fn constant_instruction(&self, name: &str, offset: usize) -> usize {
    let constant = self.code[offset + 1];
    println!(
      "{:-16} {:4} '{}'",
      name, constant, self.constants.values[constant as usize]
    );
    offset + 2
  }

  fn slot_instruction(&self, name: &str, offset: usize) -> usize {
    let slot = self.code[offset + 1];
    println!("{:-16} {:4}", name, slot);
    offset + 2
  }

  fn jump_instruction(&self, name: &str, sign: i32, offset: usize) -> usize {
    let jump = u16::from_be_bytes([self.code[offset + 1], self.code[offset + 2]]);
    let target = (offset as i32 + 3 + sign * jump as i32) as usize;
    println!("{:-16} {:4} -> {}", name, offset, target);
    offset + 3
  }

  fn line_number(&self, offset: usize) -> usize {
    self.lines[offset]
  }
}
