//! Lox Error Types
//!
//! Defines the error conditions produced by the bytecode engine and the
//! outcome codes reported to the host shell.

use std::fmt;

use thiserror::Error;

use crate::bytecode::opcode::OpCode;

/// Execution faults detected by the VM or chunk helpers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoxError {
    // Stack
    #[error("stack underflow in {op}")]
    StackUnderflow { op: OpCode },
    #[error("stack overflow: limit of {limit} values exceeded")]
    StackOverflow { limit: usize },

    // Operand kinds
    #[error("operand to {op} must be a number, got {got}")]
    OperandNotNumber { op: OpCode, got: &'static str },
    #[error("operands to {op} must be numbers, got {left} and {right}")]
    OperandsNotNumbers {
        op: OpCode,
        left: &'static str,
        right: &'static str,
    },

    // Chunk framing
    #[error("invalid constant index {index}: pool has {count} entries")]
    InvalidConstant { index: usize, count: usize },
    #[error("unknown opcode 0x{byte:02X}")]
    InvalidOpcode { byte: u8 },
    #[error("instruction pointer ran past end of code at offset {offset}")]
    CodeOverrun { offset: usize },
    #[error("constant pool full: at most {max} constants per chunk")]
    ConstantPoolFull { max: usize },
}

pub type LoxResult<T> = Result<T, LoxError>;

/// A fault located at the instruction that raised it
#[derive(Debug, Clone, PartialEq, Error)]
pub struct RuntimeError {
    pub error: LoxError,
    /// Byte offset of the faulting instruction's opcode
    pub offset: usize,
    /// Source line of that instruction; `None` when the chunk has no code
    pub line: Option<u32>,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "[line {}] {}", line, self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Raised by a front-end when source cannot be turned into a chunk
#[derive(Debug, Clone, PartialEq, Error)]
pub struct CompileError {
    pub message: String,
    pub line: Option<u32>,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        CompileError {
            message: message.into(),
            line: None,
        }
    }

    pub fn at_line(message: impl Into<String>, line: u32) -> Self {
        CompileError {
            message: message.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "[line {}] {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Error behind a non-`Ok` interpret outcome
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpretError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl InterpretError {
    /// Outcome code this error maps to
    pub fn outcome(&self) -> InterpretResult {
        match self {
            InterpretError::Compile(_) => InterpretResult::CompileError,
            InterpretError::Runtime(_) => InterpretResult::RuntimeError,
        }
    }
}

/// Terminal outcome of an `interpret` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretResult {
    Ok,
    CompileError,
    RuntimeError,
}

impl InterpretResult {
    /// Conventional process exit code (sysexits: EX_DATAERR, EX_SOFTWARE)
    pub fn exit_code(self) -> i32 {
        match self {
            InterpretResult::Ok => 0,
            InterpretResult::CompileError => 65,
            InterpretResult::RuntimeError => 70,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(InterpretResult::Ok.exit_code(), 0);
        assert_eq!(InterpretResult::CompileError.exit_code(), 65);
        assert_eq!(InterpretResult::RuntimeError.exit_code(), 70);
    }

    #[test]
    fn runtime_error_names_line_and_operands() {
        let err = RuntimeError {
            error: LoxError::OperandsNotNumbers {
                op: OpCode::Add,
                left: "number",
                right: "boolean",
            },
            offset: 4,
            line: Some(2),
        };
        assert_eq!(
            err.to_string(),
            "[line 2] operands to OP_ADD must be numbers, got number and boolean"
        );
    }

    #[test]
    fn runtime_error_without_line_has_no_prefix() {
        let err = RuntimeError {
            error: LoxError::CodeOverrun { offset: 0 },
            offset: 0,
            line: None,
        };
        assert_eq!(
            err.to_string(),
            "instruction pointer ran past end of code at offset 0"
        );
    }

    #[test]
    fn compile_error_display() {
        assert_eq!(CompileError::new("empty input").to_string(), "empty input");
        assert_eq!(
            CompileError::at_line("unexpected token", 3).to_string(),
            "[line 3] unexpected token"
        );
    }
}
