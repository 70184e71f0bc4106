//! # Parser
//!
//! Submodule of `compiler`, which is used to parse the source code into bytecode.

use crate::{
  chunk::{Chunk, OpCode},
  compiler::{Compiler, Local, Precedence, UNINITIALIZED_DEPTH},
  error::LoxError,
  scanner::{Scanner, Token, TokenType},
  value::Value,
};

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::rc::Rc;

use super::*;

type ParseFn = fn(&mut Parser, bool) -> Result<(), LoxError>;

pub mod compile_time_error_handlers;
pub mod emit_methods;
pub mod ops_after_get_parse_rule;
pub mod statement_methods;
pub mod variable_methods;

/// ## ParseRule
///
/// A struct which represents the parse rule, with:
///
/// - prefix: the prefix parse function
/// - infix: the infix parse function
/// - precedence: the precedence of the operator
#[derive(Default, Clone, Copy)]
pub struct ParseRule {
  pub prefix: Option<ParseFn>,
  pub infix: Option<ParseFn>,
  pub precedence: Precedence,
}

impl ParseRule {
  pub fn new(prefix: Option<ParseFn>, infix: Option<ParseFn>, precedence: Precedence) -> Self {
    Self {
      prefix,
      infix,
      precedence,
    }
  }
}

/// ## RULES_VEC
///
/// A vec which contains the rules for the different tokens.
///
/// Initialized lazily by `once_cell::sync::Lazy`.
static RULES_VEC: Lazy<Vec<(TokenType, ParseRule)>> = Lazy::new(|| {
  vec![
    (
      TokenType::LeftParen,
      ParseRule::new(Some(Parser::grouping_adapter), None, Precedence::None),
    ),
    (
      TokenType::RightParen,
      ParseRule::new(None, None, Precedence::None),
    ),
    (
      TokenType::LeftBrace,
      ParseRule::new(None, None, Precedence::None),
    ),
    (
      TokenType::RightBrace,
      ParseRule::new(None, None, Precedence::None),
    ),
    (
      TokenType::Comma,
      ParseRule::new(None, None, Precedence::None),
    ),
    (TokenType::Dot, ParseRule::new(None, None, Precedence::None)),
    (
      TokenType::Minus,
      ParseRule::new(
        Some(Parser::unary_adapter),
        Some(Parser::binary_adapter),
        Precedence::Sum,
      ),
    ),
    (
      TokenType::Plus,
      ParseRule::new(None, Some(Parser::binary_adapter), Precedence::Sum),
    ),
    (
      TokenType::Semicolon,
      ParseRule::new(None, None, Precedence::None),
    ),
    (
      TokenType::Slash,
      ParseRule::new(None, Some(Parser::binary_adapter), Precedence::Product),
    ),
    (
      TokenType::Star,
      ParseRule::new(None, Some(Parser::binary_adapter), Precedence::Product),
    ),
    (
      TokenType::Bang,
      ParseRule::new(Some(Parser::unary_adapter), None, Precedence::None),
    ),
    (
      TokenType::BangEqual,
      ParseRule::new(None, Some(Parser::binary_adapter), Precedence::Equality),
    ),
    (TokenType::Equal, ParseRule::new(None, None, Precedence::None)),
    (
      TokenType::EqualEqual,
      ParseRule::new(None, Some(Parser::binary_adapter), Precedence::Equality),
    ),
    (
      TokenType::Greater,
      ParseRule::new(None, Some(Parser::binary_adapter), Precedence::Comparison),
    ),
    (
      TokenType::GreaterEqual,
      ParseRule::new(None, Some(Parser::binary_adapter), Precedence::Comparison),
    ),
    (
      TokenType::Less,
      ParseRule::new(None, Some(Parser::binary_adapter), Precedence::Comparison),
    ),
    (
      TokenType::LessEqual,
      ParseRule::new(None, Some(Parser::binary_adapter), Precedence::Comparison),
    ),
    (
      TokenType::Identifier,
      ParseRule::new(Some(Parser::variable), None, Precedence::None),
    ),
    (
      TokenType::String,
      ParseRule::new(Some(Parser::string_adapter), None, Precedence::None),
    ),
    (
      TokenType::Number,
      ParseRule::new(Some(Parser::number_adapter), None, Precedence::None),
    ),
    (
      TokenType::And,
      ParseRule::new(None, Some(Parser::and_adapter), Precedence::And),
    ),
    (
      TokenType::Class,
      ParseRule::new(None, None, Precedence::None),
    ),
    (TokenType::Else, ParseRule::new(None, None, Precedence::None)),
    (
      TokenType::False,
      ParseRule::new(Some(Parser::literal_adapter), None, Precedence::None),
    ),
    (TokenType::For, ParseRule::new(None, None, Precedence::None)),
    (TokenType::Fun, ParseRule::new(None, None, Precedence::None)),
    (TokenType::If, ParseRule::new(None, None, Precedence::None)),
    (
      TokenType::Nil,
      ParseRule::new(Some(Parser::literal_adapter), None, Precedence::None),
    ),
    (
      TokenType::Or,
      ParseRule::new(None, Some(Parser::or_adapter), Precedence::Or),
    ),
    (
      TokenType::Print,
      ParseRule::new(None, None, Precedence::None),
    ),
    (
      TokenType::Return,
      ParseRule::new(None, None, Precedence::None),
    ),
    (
      TokenType::Super,
      ParseRule::new(None, None, Precedence::None),
    ),
    (TokenType::This, ParseRule::new(None, None, Precedence::None)),
    (
      TokenType::True,
      ParseRule::new(Some(Parser::literal_adapter), None, Precedence::None),
    ),
    (TokenType::Var, ParseRule::new(None, None, Precedence::None)),
    (
      TokenType::While,
      ParseRule::new(None, None, Precedence::None),
    ),
    (
      TokenType::Error,
      ParseRule::new(None, None, Precedence::None),
    ),
    (TokenType::Eof, ParseRule::new(None, None, Precedence::None)),
  ]
});

/// ## RULES
///
/// HashMap form of `RULES_VEC`, built once on first access.
static RULES: Lazy<HashMap<TokenType, ParseRule>> = Lazy::new(|| {
  let mut map = HashMap::new();
  for (token_type, rule) in RULES_VEC.iter() {
    map.insert(*token_type, *rule);
  }
  map
});

pub struct Parser<'a> {
  /// Chunk being compiled into.
  pub(crate) chunk: Chunk,
  /// Scanner in parser.
  pub(crate) scanner: Scanner<'a>,
  /// Current token.
  pub(crate) current: Token<'a>,
  /// Previous token.
  pub(crate) previous: Token<'a>,
  /// If had error.
  pub(crate) had_error: bool,
  /// If in panic mode.
  pub(crate) panic_mode: bool,
  /// Scope/local-slot bookkeeping.
  pub(crate) compiler: Compiler,
}

impl<'a> Parser<'a> {
  pub fn new(source: &'a str) -> Self {
    Self {
      chunk: Chunk::default(),
      scanner: Scanner::init(source),
      current: Token::default(),
      previous: Token::default(),
      had_error: false,
      panic_mode: false,
      compiler: Compiler::default(),
    }
  }

  /// Drive the whole compilation: advance to the first token, parse
  /// declarations until EOF, then hand back the finished chunk.
  pub fn run(&mut self) -> Result<Chunk, LoxError> {
    self.advance_token()?;
    while !self.check_token(TokenType::Eof) {
      let _ = self.declaration();
    }
    self.end_compiler()?;

    if self.had_error {
      Err(LoxError::compile("compilation failed"))
    } else {
      Ok(std::mem::take(&mut self.chunk))
    }
  }
}

impl<'a> Parser<'a> {
  /// This function starts at the current token,
  /// then parses any expression at the given precedence level or higher.
  fn parse_precedence(&mut self, precedence: Precedence) -> Result<(), LoxError> {
    // if it's valid to operate `assign`
    let can_assign = precedence <= Precedence::Assignment;

    // look up `prefix parser` for the `current` token
    self.advance_token()?;
    let prefix_rule = self.get_rule(self.previous.token_type).prefix;
    let prefix_rule = match prefix_rule {
      Some(rule) => rule,
      None => return self.error("Expected an expression.".to_owned()),
    };
    prefix_rule(self, can_assign)?;

    // look for `infix parser` for the `next` token.
    while precedence <= self.get_rule(self.current.token_type).precedence {
      self.advance_token()?;
      let infix_rule = self.get_rule(self.previous.token_type).infix;
      match infix_rule {
        Some(rule) => rule(self, can_assign)?,
        None => break,
      }
    }

    // Deal with invalid assignment.
    // (E.g. => {...}; a + b = c * d;)
    if can_assign && self.match_token(TokenType::Equal)? {
      return self.error("Invalid assignment target.".to_owned());
    }

    Ok(())
  }

  fn get_rule(&self, token_type: TokenType) -> ParseRule {
    *RULES.get(&token_type).unwrap()
  }
}

impl<'a> Parser<'a> {
  /// Activate parser, move to next token (one step).
  ///
  /// It asks the scanner for the next token and stores it for later use.
  /// Error tokens are reported and silently skipped — scanning never stops
  /// on a bad character, only the compiler's final verdict does.
  pub(crate) fn advance_token(&mut self) -> Result<(), LoxError> {
    self.previous = self.current;
    loop {
      self.current = self.scanner.scan_token();
      if self.current.token_type != TokenType::Error {
        break;
      }
      let _ = self.error_at_current(self.current.lexeme.to_owned());
    }
    Ok(())
  }

  /// Try consuming current(last) token, if can't, throw error.
  fn consume_token(&mut self, token_type: TokenType, message: String) -> Result<(), LoxError> {
    if self.current.token_type == token_type {
      self.advance_token()
    } else {
      self.error_at_current(message)
    }
  }

  /// Check if current token has the same type with expected.
  fn check_token(&mut self, expected_type: TokenType) -> bool {
    self.current.token_type == expected_type
  }

  /// Execute `check_token`.
  ///
  /// If true, advance token with true returned.
  ///
  /// Else, directly return false.
  pub(crate) fn match_token(&mut self, expected_type: TokenType) -> Result<bool, LoxError> {
    if !self.check_token(expected_type) {
      Ok(false)
    } else {
      self.advance_token()?;
      Ok(true)
    }
  }

  /// Parse the expression.
  fn expression(&mut self) -> Result<(), LoxError> {
    self.parse_precedence(Precedence::Assignment)
  }

  /// Step into a block.
  fn begin_scope(&mut self) {
    self.compiler.scope_depth += 1;
  }

  /// Step out of a block, emitting a `Drop` for every local that falls out
  /// of scope.
  fn end_scope(&mut self) -> Result<(), LoxError> {
    self.compiler.scope_depth -= 1;
    while matches!(self.compiler.locals.last(), Some(local) if local.depth > self.compiler.scope_depth)
    {
      self.emit_byte(OpCode::Drop as u8)?;
      self.compiler.locals.pop();
    }
    Ok(())
  }

  /// Parse contents in a block.
  fn block(&mut self) -> Result<(), LoxError> {
    while !self.check_token(TokenType::RightBrace) && !self.check_token(TokenType::Eof) {
      let _ = self.declaration();
    }
    self.consume_token(TokenType::RightBrace, "Expected `}` after block.".into())
  }

  /// Try matching current token as a declaration.
  pub(crate) fn declaration(&mut self) -> Result<(), LoxError> {
    let _ = if self.match_token(TokenType::Var)? {
      self.var_declaration()
    } else {
      self.statement()
    };
    if self.panic_mode {
      self.synchronize()?;
    }
    Ok(())
  }

  /// Try matching current token as a statement.
  fn statement(&mut self) -> Result<(), LoxError> {
    if self.match_token(TokenType::Print)? {
      self.print_statement()
    } else if self.match_token(TokenType::If)? {
      self.if_statement()
    } else if self.match_token(TokenType::While)? {
      self.while_statement()
    } else if self.match_token(TokenType::For)? {
      self.for_statement()
    } else if self.match_token(TokenType::LeftBrace)? {
      self.begin_scope();
      self.block()?;
      self.end_scope()
    } else {
      self.expression_statement()
    }
  }
}

impl<'a> Parser<'a> {
  /// Emit a constant instruction with the given value.
  ///
  /// If it's position/index is out of range of u8, return error.
  ///
  /// Else, return the index.
  fn make_constant(&mut self, value: Value) -> Result<u8, LoxError> {
    let index = self.chunk.add_constant(value);
    if index > u8::MAX as usize {
      let _ = self.error("Too many constants in one chunk.".to_owned());
      Err(LoxError::compile("Too many constants in one chunk."))
    } else {
      Ok(index as u8)
    }
  }

  /// Build a string constant from a raw (still-quoted) lexeme.
  fn string_constant(&mut self, quoted_lexeme: &str) -> Result<u8, LoxError> {
    let len = quoted_lexeme.len();
    let unquoted: Rc<str> = Rc::from(&quoted_lexeme[1..len - 1]);
    self.make_constant(Value::from(unquoted))
  }
}
