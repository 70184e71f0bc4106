use lanterne::{
  chunk::{Chunk, OpCode},
  debug::Disassemble,
  utils::Init,
  vm::VM,
};

#[test]
fn manual_bytecode_runs_to_completion() {
  let mut vm = VM::init();
  let mut chunk = Chunk::init();

  // 1.2
  let constant = chunk.add_constant(1.2.into());
  chunk.write_chunk(OpCode::Constant as u8, 123);
  chunk.write_chunk(constant as u8, 123);
  // 2.3
  let constant = chunk.add_constant(2.3.into());
  chunk.write_chunk(OpCode::Constant as u8, 123);
  chunk.write_chunk(constant as u8, 123);
  // +
  chunk.write_chunk(OpCode::Add as u8, 123);
  // 5.6
  let constant = chunk.add_constant(5.6.into());
  chunk.write_chunk(OpCode::Constant as u8, 123);
  chunk.write_chunk(constant as u8, 123);
  // /
  chunk.write_chunk(OpCode::Divide as u8, 123);
  // -
  chunk.write_chunk(OpCode::Negate as u8, 123);
  // print
  chunk.write_chunk(OpCode::Print as u8, 123);
  // return
  chunk.write_chunk(OpCode::Return as u8, 123);

  chunk.disassemble("Test Chunk");

  vm.rebind(chunk);
  vm.run().unwrap();
  vm.free();
}
