use super::*;

impl<'a> Parser<'a> {
  pub(crate) fn number_adapter(&mut self, _: bool) -> Result<(), LoxError> {
    self.number()
  }

  pub(crate) fn number(&mut self) -> Result<(), LoxError> {
    match self.previous.lexeme.parse::<f64>() {
      Ok(value) => self.emit_constant(value.into()),
      Err(_) => self.error("Failed to parse number literal.".into()),
    }
  }

  pub(crate) fn string_adapter(&mut self, _: bool) -> Result<(), LoxError> {
    self.string()
  }

  pub(crate) fn string(&mut self) -> Result<(), LoxError> {
    let constant_index = self.string_constant(self.previous.lexeme)?;
    self.emit_bytes(&[OpCode::Constant as u8, constant_index])
  }

  pub(crate) fn named_variable(&mut self, can_assign: bool) -> Result<(), LoxError> {
    let name = self.previous.lexeme;
    let (arg, get_op, set_op) = if let Some((slot, depth)) = self.compiler.resolve_local(name) {
      if depth == UNINITIALIZED_DEPTH {
        return self.error("Can't read local variable in its own initializer.".into());
      }
      (slot as u8, OpCode::GetLocal, OpCode::SetLocal)
    } else {
      (
        self.identifier_constant()?,
        OpCode::GetGlobal,
        OpCode::SetGlobal,
      )
    };
    if can_assign && self.match_token(TokenType::Equal)? {
      self.expression()?;
      self.emit_bytes(&[set_op as u8, arg])
    } else {
      self.emit_bytes(&[get_op as u8, arg])
    }
  }

  pub(crate) fn variable(&mut self, can_assign: bool) -> Result<(), LoxError> {
    self.named_variable(can_assign)
  }

  pub(crate) fn unary_adapter(&mut self, _: bool) -> Result<(), LoxError> {
    self.unary()
  }

  pub(crate) fn unary(&mut self) -> Result<(), LoxError> {
    let operator_type = self.previous.token_type;

    // Compile the operand
    self.parse_precedence(Precedence::Unary)?;

    // Emit the operator instruction
    match operator_type {
      TokenType::Bang => self.emit_byte(OpCode::Not as u8),
      TokenType::Minus => self.emit_byte(OpCode::Negate as u8),
      _ => self.error("Unknown unary operator.".into()),
    }
  }

  pub(crate) fn binary_adapter(&mut self, _: bool) -> Result<(), LoxError> {
    self.binary()
  }

  /// `!=`, `<=` and `>=` are not opcodes of their own: they're composed from
  /// the corresponding strict comparison followed by `Not`.
  pub(crate) fn binary(&mut self) -> Result<(), LoxError> {
    let operator_type = self.previous.token_type;
    let rule = self.get_rule(operator_type);
    self.parse_precedence(rule.precedence.next())?;

    match operator_type {
      TokenType::BangEqual => self.emit_bytes(&[OpCode::Equal as u8, OpCode::Not as u8]),
      TokenType::EqualEqual => self.emit_byte(OpCode::Equal as u8),
      TokenType::Greater => self.emit_byte(OpCode::Greater as u8),
      TokenType::GreaterEqual => self.emit_bytes(&[OpCode::Less as u8, OpCode::Not as u8]),
      TokenType::Less => self.emit_byte(OpCode::Less as u8),
      TokenType::LessEqual => self.emit_bytes(&[OpCode::Greater as u8, OpCode::Not as u8]),
      TokenType::Plus => self.emit_byte(OpCode::Add as u8),
      TokenType::Minus => self.emit_byte(OpCode::Subtract as u8),
      TokenType::Star => self.emit_byte(OpCode::Multiply as u8),
      TokenType::Slash => self.emit_byte(OpCode::Divide as u8),
      _ => self.error("Unknown binary operator.".into()),
    }
  }

  pub(crate) fn and_adapter(&mut self, _: bool) -> Result<(), LoxError> {
    self.and_expr()
  }

  /// Short-circuiting `and`: if the left operand is falsey, skip the right
  /// operand entirely and leave the left value as the result.
  pub(crate) fn and_expr(&mut self) -> Result<(), LoxError> {
    let end_jump = self.emit_jump(OpCode::ConditionalJump as u8)?;
    self.emit_byte(OpCode::Drop as u8)?;
    self.parse_precedence(Precedence::And)?;
    self.patch_jump(end_jump)
  }

  pub(crate) fn or_adapter(&mut self, _: bool) -> Result<(), LoxError> {
    self.or_expr()
  }

  /// Short-circuiting `or`: if the left operand is truthy, skip the right
  /// operand entirely and leave the left value as the result.
  pub(crate) fn or_expr(&mut self) -> Result<(), LoxError> {
    let else_jump = self.emit_jump(OpCode::ConditionalJump as u8)?;
    let end_jump = self.emit_jump(OpCode::Jump as u8)?;

    self.patch_jump(else_jump)?;
    self.emit_byte(OpCode::Drop as u8)?;

    self.parse_precedence(Precedence::Or)?;
    self.patch_jump(end_jump)
  }

  pub(crate) fn literal_adapter(&mut self, _: bool) -> Result<(), LoxError> {
    self.literal()
  }

  pub(crate) fn literal(&mut self) -> Result<(), LoxError> {
    match self.previous.token_type {
      TokenType::False => self.emit_byte(OpCode::False as u8),
      TokenType::Nil => self.emit_byte(OpCode::Nil as u8),
      TokenType::True => self.emit_byte(OpCode::True as u8),
      _ => self.error("Unknown literal.".into()),
    }
  }

  pub(crate) fn grouping_adapter(&mut self, _: bool) -> Result<(), LoxError> {
    self.grouping()
  }

  pub(crate) fn grouping(&mut self) -> Result<(), LoxError> {
    self.expression()?;
    self.consume_token(
      TokenType::RightParen,
      "Expected `)` after expression.".to_owned(),
    )
  }
}
