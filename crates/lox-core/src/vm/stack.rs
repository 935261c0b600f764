//! Evaluation stack
//!
//! Holds intermediate values while a chunk runs. Pops are height-checked
//! so underflow surfaces as an error naming the opcode that caused it.

use crate::bytecode::opcode::OpCode;
use crate::error::{LoxError, LoxResult};
use crate::memory::GrowableArray;

use super::value::Value;

/// VM evaluation stack
#[derive(Debug)]
pub struct Stack {
    values: GrowableArray<Value>,
    max_size: usize,
}

impl Stack {
    /// Create new stack with maximum height
    pub fn new(max_size: usize) -> Self {
        Stack {
            values: GrowableArray::new(),
            max_size,
        }
    }

    /// Push value onto stack
    pub fn push(&mut self, value: Value) -> LoxResult<()> {
        if self.values.count() >= self.max_size {
            return Err(LoxError::StackOverflow { limit: self.max_size });
        }
        self.values.push(value);
        Ok(())
    }

    /// Pop value from stack on behalf of `op`
    pub fn pop(&mut self, op: OpCode) -> LoxResult<Value> {
        self.values.pop().ok_or(LoxError::StackUnderflow { op })
    }

    /// Fail unless at least `n` values are present
    pub fn require(&self, n: usize, op: OpCode) -> LoxResult<()> {
        if self.values.count() < n {
            return Err(LoxError::StackUnderflow { op });
        }
        Ok(())
    }

    /// Peek at top of stack without removing
    pub fn peek(&self) -> Option<Value> {
        self.values.last().copied()
    }

    /// Get current stack height
    pub fn size(&self) -> usize {
        self.values.count()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        self.values.as_slice()
    }

    /// Clear stack, keeping storage
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Release storage; idempotent
    pub fn free(&mut self) {
        self.values.free();
    }
}
