use super::*;

impl<'a> Parser<'a> {
  /// Emit a jump instruction with a placeholder offset, returning the index
  /// of the first placeholder byte so it can later be patched.
  pub(crate) fn emit_jump(&mut self, instruction: u8) -> Result<usize, LoxError> {
    self.emit_byte(instruction)?;
    self.emit_bytes(&[0xff, 0xff])?;
    Ok(self.chunk.code.len() - 2)
  }

  /// Patch a previously emitted jump to land at the current bytecode offset.
  pub(crate) fn patch_jump(&mut self, offset: usize) -> Result<(), LoxError> {
    // -2 to adjust for the bytecode for the jump offset itself
    let jump = self.chunk.code.len() - offset - 2;

    if jump > u16::MAX as usize {
      return self.error("Jump too large.".into());
    }

    self.chunk.code[offset] = ((jump >> 8) & 0xff) as u8;
    self.chunk.code[offset + 1] = (jump & 0xff) as u8;

    Ok(())
  }

  /// Emit a backward jump (`JumpBack`) from the current offset to `loop_start`.
  pub(crate) fn emit_loop(&mut self, loop_start: usize) -> Result<(), LoxError> {
    self.emit_byte(OpCode::JumpBack as u8)?;

    let offset = self.chunk.code.len() + 2 - loop_start;
    if offset > u16::MAX as usize {
      return self.error("Jump too large.".into());
    }

    self.emit_bytes(&[((offset >> 8) & 0xff) as u8, (offset & 0xff) as u8])
  }

  /// Appending a sequence of bytes to the chunk (in order).
  pub(crate) fn emit_bytes(&mut self, bytes: &[u8]) -> Result<(), LoxError> {
    for &byte in bytes {
      self.emit_byte(byte)?;
    }
    Ok(())
  }

  /// Appending a single byte to the chunk.
  pub(crate) fn emit_byte(&mut self, byte: u8) -> Result<(), LoxError> {
    self.chunk.write_chunk(byte, self.previous.line);
    Ok(())
  }

  /// Specifically appending the return instruction to the chunk.
  pub(crate) fn emit_return(&mut self) -> Result<(), LoxError> {
    self.emit_byte(OpCode::Return as u8)
  }

  /// Wrapper for appending `constant` and `index` info to the chunk.
  pub(crate) fn emit_constant(&mut self, value: Value) -> Result<(), LoxError> {
    let constant_index = self.make_constant(value)?;
    self.emit_bytes(&[OpCode::Constant as u8, constant_index])
  }

  /// Operations after end of compilation.
  pub(crate) fn end_compiler(&mut self) -> Result<(), LoxError> {
    self.emit_return()?;
    #[cfg(feature = "debug_print_code")]
    if !self.had_error {
      use crate::debug::Disassemble;
      self.chunk.disassemble("code");
    }
    Ok(())
  }
}
