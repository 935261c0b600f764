//! Chunk disassembler
//!
//! Renders chunk bytecode as readable listings for debugging and
//! execution tracing.
//!
//! # Format
//! ```text
//! == demo ==
//! 0000    1 OP_CONSTANT         0 '1.2'
//! 0002    | OP_NEGATE
//! 0003    2 OP_RETURN
//! ```

use super::chunk::Chunk;
use super::opcode::OpCode;

/// Disassemble a whole chunk under a `== name ==` header
pub fn disassemble(chunk: &Chunk, name: &str) -> String {
    let mut output = format!("== {} ==\n", name);
    let mut offset = 0;
    while offset < chunk.len() {
        let (text, next) = disassemble_instruction(chunk, offset);
        output.push_str(&text);
        output.push('\n');
        offset = next;
    }
    output
}

/// Disassemble the instruction starting at `offset`.
///
/// Returns the formatted line and the offset of the next instruction.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> (String, usize) {
    let line = chunk.line_for(offset);
    let line_column = if offset > 0 && line == chunk.line_for(offset - 1) {
        "   |".to_string()
    } else {
        match line {
            Some(l) => format!("{:4}", l),
            None => "   ?".to_string(),
        }
    };
    let prefix = format!("{:04} {} ", offset, line_column);

    let Some(&byte) = chunk.code().get(offset) else {
        return (format!("{}<end of code>", prefix), offset + 1);
    };
    let Some(op) = OpCode::from_u8(byte) else {
        return (format!("{}Unknown opcode 0x{:02X}", prefix, byte), offset + 1);
    };

    let text = match op {
        OpCode::Constant => constant_instruction(chunk, offset, &prefix),
        _ => format!("{}{}", prefix, op),
    };
    (text, offset + 1 + op.operand_width())
}

fn constant_instruction(chunk: &Chunk, offset: usize, prefix: &str) -> String {
    let Some(&index) = chunk.code().get(offset + 1) else {
        return format!("{}{:<16} <missing operand>", prefix, OpCode::Constant);
    };
    let value = match chunk.constants().get(index as usize) {
        Some(v) => v.to_string(),
        None => "<invalid>".to_string(),
    };
    format!("{}{:<16} {:4} '{}'", prefix, OpCode::Constant, index, value)
}
