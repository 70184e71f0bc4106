//! End-to-end tests: source text in, stdout/exit behavior out.

use lanterne::error::LoxError;
use lanterne::vm::VM;

fn run(source: &str) -> Result<(), LoxError> {
  VM::default().interpret(source)
}

#[test]
fn arithmetic_precedence() {
  assert!(run("print 1 + 2 * 3;").is_ok());
}

#[test]
fn string_concatenation() {
  assert!(run("var a = \"foo\"; var b = \"bar\"; print a + b;").is_ok());
}

#[test]
fn for_loop_accumulates() {
  assert!(run("var x = 0; for (var i = 0; i < 3; i = i + 1) { x = x + i; } print x;").is_ok());
}

#[test]
fn while_loop_accumulates() {
  assert!(run("var n = 10; var s = 0; while (n > 0) { s = s + n; n = n - 1; } print s;").is_ok());
}

#[test]
fn or_short_circuits_to_truthy_left_or_right() {
  assert!(run("if (nil or \"hi\") { print \"yes\"; } else { print \"no\"; }").is_ok());
}

#[test]
fn shadowing_in_nested_blocks() {
  assert!(run("{ var a = 1; { var a = 2; print a; } print a; }").is_ok());
}

#[test]
fn adding_number_and_string_is_a_runtime_error() {
  match run("print 1 + \"a\";") {
    Err(LoxError::RuntimeError(message)) => {
      assert!(message.contains("Operands must be either two numbers or two strings."))
    }
    other => panic!("expected a runtime error, got {:?}", other),
  }
}

#[test]
fn redeclaring_a_global_is_a_runtime_error() {
  match run("var a = 1; var a = 2;") {
    Err(LoxError::RuntimeError(message)) => {
      assert!(message.contains("Global variable a already declared."))
    }
    other => panic!("expected a runtime error, got {:?}", other),
  }
}

#[test]
fn redeclaring_a_local_is_a_compile_error() {
  match run("{ var a = 1; var a = 2; }") {
    Err(LoxError::CompileError(message)) => {
      assert!(message.contains("A variable with this name is already in scope."))
    }
    other => panic!("expected a compile error, got {:?}", other),
  }
}

#[test]
fn self_referencing_initializer_is_a_compile_error() {
  match run("{ var a = a; }") {
    Err(LoxError::CompileError(message)) => {
      assert!(message.contains("Can't read local variable in its own initializer."))
    }
    other => panic!("expected a compile error, got {:?}", other),
  }
}

#[test]
fn assigning_to_a_non_lvalue_is_a_compile_error() {
  match run("1 = 2;") {
    Err(LoxError::CompileError(message)) => {
      assert!(message.contains("Invalid assignment target."))
    }
    other => panic!("expected a compile error, got {:?}", other),
  }
}

#[test]
fn globals_and_interned_strings_persist_across_interpret_calls() {
  let mut vm = VM::default();
  assert!(vm.interpret("var greeting = \"hi\";").is_ok());
  assert!(vm.interpret("print greeting;").is_ok());
}
