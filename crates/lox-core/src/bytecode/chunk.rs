//! Bytecode Chunk
//!
//! A chunk owns its code bytes, line table and constant pool. It is built
//! by appending and is read-only while a VM executes it.

use crate::error::{LoxError, LoxResult};
use crate::memory::GrowableArray;
use crate::vm::value::{Value, ValueStore};

use super::lines::LineTable;
use super::opcode::OpCode;

/// Pool entries addressable by the one-byte CONSTANT operand
pub const MAX_CONSTANTS: usize = u8::MAX as usize + 1;

#[derive(Debug, Clone, Default)]
pub struct Chunk {
    code: GrowableArray<u8>,
    lines: LineTable,
    constants: ValueStore,
}

impl Chunk {
    pub fn new() -> Self {
        Chunk {
            code: GrowableArray::new(),
            lines: LineTable::new(),
            constants: ValueStore::new(),
        }
    }

    /// Append one byte and record its source line
    pub fn write_byte(&mut self, byte: u8, line: u32) {
        self.code.push(byte);
        self.lines.record(line);
    }

    pub fn write_op(&mut self, op: OpCode, line: u32) {
        self.write_byte(op.into(), line);
    }

    /// Add `value` to the constant pool and return its index.
    ///
    /// The index is not checked against the CONSTANT operand width; use
    /// [`Chunk::write_constant`] to add and emit in one bounded step.
    pub fn add_constant(&mut self, value: Value) -> usize {
        self.constants.append(value)
    }

    /// Add `value` to the pool and emit `CONSTANT index`
    pub fn write_constant(&mut self, value: Value, line: u32) -> LoxResult<u8> {
        if self.constants.count() >= MAX_CONSTANTS {
            return Err(LoxError::ConstantPoolFull { max: MAX_CONSTANTS });
        }
        let index = self.add_constant(value) as u8;
        self.write_op(OpCode::Constant, line);
        self.write_byte(index, line);
        Ok(index)
    }

    pub fn code(&self) -> &[u8] {
        self.code.as_slice()
    }

    /// Number of code bytes
    pub fn len(&self) -> usize {
        self.code.count()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn code_capacity(&self) -> usize {
        self.code.capacity()
    }

    pub fn constants(&self) -> &ValueStore {
        &self.constants
    }

    pub fn lines(&self) -> &LineTable {
        &self.lines
    }

    /// Source line of the byte at `offset`
    pub fn line_for(&self, offset: usize) -> Option<u32> {
        self.lines.line_for(offset)
    }

    /// Release all three buffers; idempotent
    pub fn free(&mut self) {
        self.code.free();
        self.lines.free();
        self.constants.free();
    }
}
