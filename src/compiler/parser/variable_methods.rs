use super::*;

impl<'a> Parser<'a> {
  pub(crate) fn parse_variable(&mut self, message: String) -> Result<u8, LoxError> {
    self.consume_token(TokenType::Identifier, message)?;

    // record if it's a local variable (scope_depth > 0)
    self.declare_variable()?;

    // if in local scope, simply exit (with a fake index)
    if self.compiler.scope_depth > 0 {
      return Ok(0);
    }

    self.identifier_constant()
  }

  fn mark_initialized(&mut self) {
    if self.compiler.scope_depth == 0 {
      return;
    }
    if let Some(local) = self.compiler.locals.last_mut() {
      local.depth = self.compiler.scope_depth;
    }
  }

  pub(crate) fn define_variable(&mut self, global_index: u8) -> Result<(), LoxError> {
    if self.compiler.scope_depth > 0 {
      self.mark_initialized();
      Ok(())
    } else {
      self.emit_bytes(&[OpCode::DefineGlobal as u8, global_index])
    }
  }

  /// Records the existence of variable (only for locals).
  fn declare_variable(&mut self) -> Result<(), LoxError> {
    if self.compiler.scope_depth == 0 {
      return Ok(());
    }

    let name = self.previous.lexeme;

    // Detect error => two variables with same name
    // in the same local scope.
    for local in self.compiler.locals.iter().rev() {
      if local.depth != UNINITIALIZED_DEPTH && local.depth < self.compiler.scope_depth {
        break;
      }
      if local.name == name {
        return self.error("A variable with this name is already in scope.".into());
      }
    }

    self.add_local(name)
  }

  fn add_local(&mut self, name: &str) -> Result<(), LoxError> {
    if self.compiler.locals.len() >= u8::MAX as usize + 1 {
      return self.error("Too many local variables.".into());
    }
    self.compiler.locals.push(Local {
      name: name.to_owned(),
      depth: UNINITIALIZED_DEPTH,
    });
    Ok(())
  }

  /// Build a constant from the raw (unquoted) identifier lexeme, e.g. a
  /// variable name. Unlike `string_constant`, no quote-stripping happens.
  pub(crate) fn identifier_constant(&mut self) -> Result<u8, LoxError> {
    let name: Rc<str> = Rc::from(self.previous.lexeme);
    self.make_constant(Value::from(name))
  }

  /// Declare: bind a new variable.
  pub(crate) fn var_declaration(&mut self) -> Result<(), LoxError> {
    let global_index = self.parse_variable("Expect variable name.".into())?;

    if self.match_token(TokenType::Equal)? {
      self.expression()?;
    } else {
      self.emit_byte(OpCode::Nil as u8)?;
    }

    self.consume_token(
      TokenType::Semicolon,
      "Expect `;` after variable declaration.".into(),
    )?;

    self.define_variable(global_index)
  }
}
