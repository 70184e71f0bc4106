use super::*;

impl<'a> Parser<'a> {
  pub(crate) fn print_statement(&mut self) -> Result<(), LoxError> {
    self.expression()?;
    self.consume_token(TokenType::Semicolon, "Expected `;` after value.".into())?;
    self.emit_byte(OpCode::Print as u8)
  }

  pub(crate) fn if_statement(&mut self) -> Result<(), LoxError> {
    /* condition */
    self.consume_token(TokenType::LeftParen, "Expected `(` after `if`.".into())?;
    self.expression()?;
    self.consume_token(TokenType::RightParen, "Expected `)` after condition.".into())?;

    /* `then` branch: if {...} */
    let then_jump = self.emit_jump(OpCode::ConditionalJump as u8)?;
    // pop condition **iff** it's true
    self.emit_byte(OpCode::Drop as u8)?;
    self.statement()?;

    /* patch `if` jump */
    let else_jump = self.emit_jump(OpCode::Jump as u8)?;
    self.patch_jump(then_jump)?;

    /* `else` branch */
    // pop condition **iff** it's false
    self.emit_byte(OpCode::Drop as u8)?;
    if self.match_token(TokenType::Else)? {
      self.statement()?;
    }

    /* patch `else` jump */
    self.patch_jump(else_jump)
  }

  pub(crate) fn while_statement(&mut self) -> Result<(), LoxError> {
    let loop_start = self.chunk.code.len();

    self.consume_token(TokenType::LeftParen, "Expected `(` after `while`.".into())?;
    self.expression()?;
    self.consume_token(TokenType::RightParen, "Expected `)` after condition.".into())?;

    let exit_jump = self.emit_jump(OpCode::ConditionalJump as u8)?;
    self.emit_byte(OpCode::Drop as u8)?;
    self.statement()?;
    self.emit_loop(loop_start)?;

    self.patch_jump(exit_jump)?;
    self.emit_byte(OpCode::Drop as u8)
  }

  pub(crate) fn for_statement(&mut self) -> Result<(), LoxError> {
    self.begin_scope();
    self.consume_token(TokenType::LeftParen, "Expected `(` after `for`.".into())?;

    // Initializer clause.
    if self.match_token(TokenType::Semicolon)? {
      // no initializer
    } else if self.match_token(TokenType::Var)? {
      self.var_declaration()?;
    } else {
      self.expression_statement()?;
    }

    let mut loop_start = self.chunk.code.len();

    // Condition clause.
    let mut exit_jump = None;
    if !self.match_token(TokenType::Semicolon)? {
      self.expression()?;
      self.consume_token(
        TokenType::Semicolon,
        "Expected `;` after loop condition.".into(),
      )?;

      exit_jump = Some(self.emit_jump(OpCode::ConditionalJump as u8)?);
      self.emit_byte(OpCode::Drop as u8)?;
    }

    // Increment clause.
    if !self.match_token(TokenType::RightParen)? {
      let body_jump = self.emit_jump(OpCode::Jump as u8)?;
      let increment_start = self.chunk.code.len();

      self.expression()?;
      self.emit_byte(OpCode::Drop as u8)?;
      self.consume_token(
        TokenType::RightParen,
        "Expected `)` after for clauses.".into(),
      )?;

      self.emit_loop(loop_start)?;
      loop_start = increment_start;
      self.patch_jump(body_jump)?;
    }

    self.statement()?;
    self.emit_loop(loop_start)?;

    if let Some(exit_jump) = exit_jump {
      self.patch_jump(exit_jump)?;
      self.emit_byte(OpCode::Drop as u8)?;
    }

    self.end_scope()
  }

  /// If in panic_mode, then synchronize (for better recognizing what error has occurred).
  ///
  /// Synchronize means that, we will skip tokens indiscriminately
  /// until we reach something that looks like a statement boundary.
  ///
  /// E.g.: class | fun | var | for | if | while | print | return
  pub(crate) fn synchronize(&mut self) -> Result<(), LoxError> {
    self.panic_mode = false;
    while self.current.token_type != TokenType::Eof {
      if self.previous.token_type == TokenType::Semicolon {
        return Ok(());
      }
      match self.current.token_type {
        TokenType::Class
        | TokenType::Fun
        | TokenType::Var
        | TokenType::For
        | TokenType::If
        | TokenType::While
        | TokenType::Print
        | TokenType::Return => return Ok(()),
        _ => {}
      }
      self.advance_token()?;
    }
    Ok(())
  }

  pub(crate) fn expression_statement(&mut self) -> Result<(), LoxError> {
    self.expression()?;
    self.consume_token(TokenType::Semicolon, "Expected `;` after expression.".into())?;
    self.emit_byte(OpCode::Drop as u8)
  }
}
