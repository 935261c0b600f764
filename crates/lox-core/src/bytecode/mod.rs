pub mod chunk;
pub mod disasm;
pub mod lines;
pub mod opcode;

pub use chunk::{Chunk, MAX_CONSTANTS};
pub use disasm::{disassemble, disassemble_instruction};
pub use lines::{LineRun, LineTable};
pub use opcode::OpCode;
