//! # VM
//!
//! ## Based on Stack
//!
//! The VM (aka. Virtual Machine) is the core of the interpreter.
//!
//! It is responsible for:
//!
//! - executing the bytecode

#[cfg(feature = "debug_trace_execution")]
use crate::debug::Disassemble;
use crate::{
  chunk::{Chunk, OpCode},
  compiler,
  error::LoxError,
  memory::Interner,
  object::Obj,
  table::Table,
  utils::Init,
  value::Value,
};

/// ## VM
///
/// A struct which represents the virtual machine.
#[derive(Debug, Default)]
pub struct VM {
  /// The chunk currently being executed.
  pub(crate) chunk: Chunk,
  /// The instruction pointer (actually, the index).
  pub(crate) ip: usize,
  /// The stack of the virtual machine.
  pub(crate) stack: Vec<Value>,
  /// Canonical handles for every interned string, survives across `interpret` calls.
  pub(crate) strings: Interner,
  /// All globals.
  pub(crate) globals: Table,
}

impl VM {
  /// Compile then interpret a source string.
  pub fn interpret(&mut self, src: &str) -> Result<(), LoxError> {
    log::debug!("interpret: begin ({} bytes of source)", src.len());
    let chunk = compiler::compile(src)?;
    self.rebind(chunk);
    let result = self.run();
    log::debug!("interpret: end ({})", if result.is_ok() { "ok" } else { "err" });
    result
  }
}

impl VM {
  /// A stack-empty pop here means the compiler emitted an opcode that
  /// doesn't balance the stack the way the compiler itself guarantees;
  /// that's a bug in the compiler, not a LANG-level fault, so it panics
  /// rather than surfacing as a `LoxError`.
  fn unary_op<T>(&mut self, op: T) -> Result<(), LoxError>
  where
    T: Fn(Value) -> Result<Value, LoxError>,
  {
    let value = self.stack.pop().unwrap();
    self.stack.push(op(value)?);
    Ok(())
  }

  fn binary_op<T>(&mut self, op: T) -> Result<(), LoxError>
  where
    T: Fn(Value, Value) -> Result<Value, LoxError>,
  {
    let b = self.stack.pop().unwrap();
    let a = self.stack.pop().unwrap();
    self.stack.push(op(a, b)?);
    Ok(())
  }

  fn peek(&self, distance: usize) -> &Value {
    &self.stack[self.stack.len() - 1 - distance]
  }
}

impl VM {
  /// Read a byte from the chunk (update ip).
  fn read_byte(&mut self) -> u8 {
    let byte = self.chunk.code[self.ip];
    self.ip += 1;
    byte
  }

  /// Read a constant from the chunk (update ip), re-interning it if it's a string.
  fn read_constant(&mut self) -> Value {
    let index = self.chunk.code[self.ip];
    self.ip += 1;
    let value = self.chunk.constants.values[index as usize].clone();
    match value {
      Value::Obj(Obj::String(s)) => Value::string_val(self.strings.intern(s)),
      other => other,
    }
  }

  /// Read a short(u16) from the chunk (update ip).
  fn read_u16(&mut self) -> u16 {
    self.ip += 2;
    u16::from_be_bytes([self.chunk.code[self.ip - 2], self.chunk.code[self.ip - 1]])
  }
}

impl VM {
  /// Disassemble the current instruction.
  ///
  /// This function is only available when the feature
  /// `debug_trace_execution` is enabled.
  #[cfg(feature = "debug_trace_execution")]
  fn disassemble_instruction(&self) {
    self.chunk.disassemble_instruction(self.ip);
  }

  /// Trace VM's stack.
  ///
  /// This function is only available when the feature
  /// `debug_trace_stack` is enabled.
  #[cfg(feature = "debug_trace_stack")]
  pub fn trace_stack(&self) {
    print!("        | [");
    for (i, value) in self.stack.iter().enumerate() {
      print!("{}", value);
      if i != self.stack.len() - 1 {
        print!(", ");
      }
    }
    println!("]")
  }
}

impl VM {
  /// Run the virtual machine (with a valid chunk linked via [`VM::rebind`]).
  pub fn run(&mut self) -> Result<(), LoxError> {
    loop {
      #[cfg(feature = "debug_trace_stack")]
      {
        self.trace_stack();
        log::trace!("stack: {:?}", self.stack);
      }
      #[cfg(feature = "debug_trace_execution")]
      {
        self.disassemble_instruction();
        log::trace!("ip: {}", self.ip);
      }

      match self.run_one_step() {
        Ok(true) => return Ok(()),
        Ok(false) => continue,
        Err(LoxError::RuntimeError(message)) => return self.runtime_error(message),
        Err(other) => return Err(other),
      }
    }
  }

  /// Execute one instruction. Returns `Ok(true)` once `Return` halts the run.
  #[inline]
  fn run_one_step(&mut self) -> Result<bool, LoxError> {
    match OpCode::from(self.read_byte()) {
      /* Constants */
      OpCode::Constant => {
        let constant = self.read_constant();
        self.stack.push(constant);
      }
      OpCode::Nil => self.stack.push(Value::nil_val()),
      OpCode::True => self.stack.push(Value::bool_val(true)),
      OpCode::False => self.stack.push(Value::bool_val(false)),
      /* Comparisons */
      OpCode::Equal => self.binary_op(|l, r| Ok(Value::bool_val(l == r)))?,
      OpCode::Greater => self.binary_op(|l, r| {
        if l.is_number() && r.is_number() {
          Ok(Value::bool_val(l.as_number() > r.as_number()))
        } else {
          Err(LoxError::runtime("Operands must be numbers."))
        }
      })?,
      OpCode::Less => self.binary_op(|l, r| {
        if l.is_number() && r.is_number() {
          Ok(Value::bool_val(l.as_number() < r.as_number()))
        } else {
          Err(LoxError::runtime("Operands must be numbers."))
        }
      })?,
      /* Binary Arith Opts */
      OpCode::Add => self.binary_op(|l, r| match (&l, &r) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::number_val(a + b)),
        (Value::Obj(Obj::String(a)), Value::Obj(Obj::String(b))) => {
          let mut concatenated = String::with_capacity(a.len() + b.len());
          concatenated.push_str(a);
          concatenated.push_str(b);
          Ok(Value::string_val(std::rc::Rc::from(concatenated)))
        }
        _ => Err(LoxError::runtime(
          "Operands must be either two numbers or two strings.",
        )),
      })?,
      OpCode::Subtract => self.binary_op(|l, r| {
        Self::arith(l, r, "Operands must be numbers.", |a, b| a - b)
      })?,
      OpCode::Multiply => self.binary_op(|l, r| {
        Self::arith(l, r, "Operands must be numbers.", |a, b| a * b)
      })?,
      OpCode::Divide => self.binary_op(|l, r| {
        Self::arith(l, r, "Operands must be numbers.", |a, b| a / b)
      })?,
      /* Unary Arith Opts */
      OpCode::Not => self.unary_op(|v| Ok(Value::bool_val(v.is_falsey())))?,
      OpCode::Negate => self.unary_op(|v| {
        if v.is_number() {
          Ok(Value::number_val(-v.as_number()))
        } else {
          Err(LoxError::runtime("Operand must be a number."))
        }
      })?,
      /* Control Flow Opts */
      OpCode::ConditionalJump => {
        let offset = self.read_u16();
        if self.peek(0).is_falsey() {
          self.ip += offset as usize;
        }
      }
      OpCode::Jump => {
        let offset = self.read_u16();
        self.ip += offset as usize;
      }
      OpCode::JumpBack => {
        let offset = self.read_u16();
        self.ip -= offset as usize;
      }
      /* Helper Opts */
      OpCode::Print => {
        let value = self.stack.pop().unwrap();
        println!("{}", value);
      }
      OpCode::Drop => {
        self.stack.pop();
      }
      /* Variable Getters/Setters */
      OpCode::DefineGlobal => {
        let name = self.read_constant();
        let name = name.as_string().clone();
        if self.globals.contains(&name) {
          return Err(LoxError::runtime(format!(
            "Global variable {} already declared.",
            name
          )));
        }
        let value = self.stack.pop().unwrap();
        self.globals.set(name, value);
      }
      OpCode::GetGlobal => {
        let name = self.read_constant();
        let name = name.as_string().clone();
        match self.globals.get(&name) {
          Some(value) => self.stack.push(value.clone()),
          None => {
            return Err(LoxError::runtime(format!("Unknown global variable {}.", name)));
          }
        }
      }
      OpCode::SetGlobal => {
        let name = self.read_constant();
        let name = name.as_string().clone();
        if !self.globals.contains(&name) {
          return Err(LoxError::runtime(format!(
            "Cannot assign to unknown global variable {}.",
            name
          )));
        }
        self.globals.set(name, self.peek(0).clone());
      }
      OpCode::GetLocal => {
        let slot = self.read_byte();
        let value = self.stack[slot as usize].clone();
        self.stack.push(value);
      }
      OpCode::SetLocal => {
        let slot = self.read_byte();
        self.stack[slot as usize] = self.peek(0).clone();
      }
      /* Return */
      OpCode::Return => return Ok(true),
    };
    Ok(false)
  }

  fn arith(
    l: Value,
    r: Value,
    error: &str,
    op: impl Fn(f64, f64) -> f64,
  ) -> Result<Value, LoxError> {
    if l.is_number() && r.is_number() {
      Ok(Value::number_val(op(l.as_number(), r.as_number())))
    } else {
      Err(LoxError::runtime(error.to_owned()))
    }
  }
}

impl VM {
  fn runtime_error(&mut self, message: String) -> Result<(), LoxError> {
    // Index should be `ip - 1`, as ip has increased before error occurred.
    let inst_index = self.ip.saturating_sub(1).min(self.chunk.lines.len().saturating_sub(1));
    let line = self.chunk.lines.get(inst_index).copied().unwrap_or(0);

    eprintln!("{}\n[line {}] in script", message, line);
    log::error!("runtime error at line {}: {}", line, message);

    self.stack.clear();

    Err(LoxError::runtime(message))
  }
}

impl Init for VM {}

impl VM {
  /// Free the chunk, stack, and tables (if any).
  pub fn free(&mut self) {
    self.chunk.free();
    self.stack.clear();
    self.strings.free();
    self.globals.free();
  }

  /// Rebind the virtual machine to the given chunk, resetting the ip.
  pub fn rebind(&mut self, chunk: Chunk) {
    self.chunk = chunk;
    self.ip = 0;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn arithmetic_and_print_drive_the_stack() {
    let mut vm = VM::init();
    assert!(vm.interpret("print 1 + 2 * 3;").is_ok());
  }

  #[test]
  fn string_concatenation_works() {
    let mut vm = VM::init();
    assert!(vm.interpret("print \"a\" + \"b\";").is_ok());
  }

  #[test]
  fn mismatched_add_operands_is_a_runtime_error() {
    let mut vm = VM::init();
    let err = vm.interpret("print 1 + \"a\";").unwrap_err();
    assert!(matches!(err, LoxError::RuntimeError(_)));
  }

  #[test]
  fn redefining_a_global_is_a_runtime_error() {
    let mut vm = VM::init();
    let err = vm.interpret("var a = 1; var a = 2;").unwrap_err();
    assert!(matches!(err, LoxError::RuntimeError(_)));
  }

  #[test]
  fn reading_an_unknown_global_is_a_runtime_error() {
    let mut vm = VM::init();
    let err = vm.interpret("print unknown;").unwrap_err();
    assert!(matches!(err, LoxError::RuntimeError(_)));
  }

  #[test]
  fn locals_and_blocks_round_trip() {
    let mut vm = VM::init();
    assert!(vm.interpret("{ var a = 1; var b = 2; print a + b; }").is_ok());
  }

  #[test]
  fn while_loop_executes() {
    let mut vm = VM::init();
    assert!(vm
      .interpret("var i = 0; while (i < 3) { i = i + 1; } print i;")
      .is_ok());
  }

  #[test]
  fn for_loop_executes() {
    let mut vm = VM::init();
    assert!(vm.interpret("for (var i = 0; i < 3; i = i + 1) print i;").is_ok());
  }
}
