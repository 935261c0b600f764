//! Bytecode Opcode Definitions
//!
//! Defines the closed opcode set for chunk bytecode.
//! This file contains no execution semantics.
//! Opcode values are part of the chunk encoding and must not be renumbered.

use std::fmt;

use crate::error::LoxError;

/// Bytecode opcodes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    /// Push constant from pool [u8 index]
    Constant = 0x00,

    /// Pop a, push -a
    Negate = 0x01,

    /// Pop b, pop a, push a + b
    Add = 0x02,
    /// Pop b, pop a, push a - b
    Subtract = 0x03,
    /// Pop b, pop a, push a * b
    Multiply = 0x04,
    /// Pop b, pop a, push a / b
    Divide = 0x05,

    /// Stop execution successfully
    Return = 0x06,
}

impl OpCode {
    /// Convert raw byte to opcode
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(OpCode::Constant),
            0x01 => Some(OpCode::Negate),
            0x02 => Some(OpCode::Add),
            0x03 => Some(OpCode::Subtract),
            0x04 => Some(OpCode::Multiply),
            0x05 => Some(OpCode::Divide),
            0x06 => Some(OpCode::Return),
            _ => None,
        }
    }

    /// Number of operand bytes following the opcode
    pub fn operand_width(self) -> usize {
        match self {
            OpCode::Constant => 1,
            _ => 0,
        }
    }

    /// Number of values popped before the result is pushed
    pub fn arity(self) -> usize {
        match self {
            OpCode::Constant | OpCode::Return => 0,
            OpCode::Negate => 1,
            OpCode::Add | OpCode::Subtract | OpCode::Multiply | OpCode::Divide => 2,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Constant => "OP_CONSTANT",
            OpCode::Negate => "OP_NEGATE",
            OpCode::Add => "OP_ADD",
            OpCode::Subtract => "OP_SUBTRACT",
            OpCode::Multiply => "OP_MULTIPLY",
            OpCode::Divide => "OP_DIVIDE",
            OpCode::Return => "OP_RETURN",
        }
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> Self {
        op as u8
    }
}

impl TryFrom<u8> for OpCode {
    type Error = LoxError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        OpCode::from_u8(byte).ok_or(LoxError::InvalidOpcode { byte })
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}
