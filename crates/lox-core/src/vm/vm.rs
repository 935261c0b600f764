//! Virtual Machine Core
//!
//! Defines the virtual machine structure and the fetch-decode-execute loop.
//! A VM is reused sequentially; each `interpret` call binds a chunk, resets
//! the instruction pointer and stack, and runs to `RETURN` or the first fault.

use crate::bytecode::chunk::Chunk;
use crate::bytecode::disasm::disassemble_instruction;
use crate::bytecode::opcode::OpCode;
use crate::config::VmConfig;
use crate::error::{InterpretError, InterpretResult, LoxError, LoxResult, RuntimeError};
use crate::frontend::Frontend;

use super::stack::Stack;
use super::value::Value;

/// Whether an `interpret` call is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmState {
    Ready,
    Running,
}

/// Control flow after a single instruction
enum Flow {
    Continue,
    Return,
}

/// Stack-based bytecode virtual machine
#[derive(Debug)]
pub struct VirtualMachine {
    config: VmConfig,
    stack: Stack,
    ip: usize,
    state: VmState,
    last_error: Option<InterpretError>,
}

impl VirtualMachine {
    /// Create a new VM instance
    pub fn new(config: VmConfig) -> Self {
        VirtualMachine {
            stack: Stack::new(config.max_stack_size),
            ip: 0,
            state: VmState::Ready,
            last_error: None,
            config,
        }
    }

    /// Execute `chunk` from its first byte until `RETURN` or a runtime error
    pub fn interpret(&mut self, chunk: &Chunk) -> InterpretResult {
        self.ip = 0;
        self.stack.reset();
        self.last_error = None;
        self.state = VmState::Running;

        let result = match self.run(chunk) {
            Ok(()) => InterpretResult::Ok,
            Err(err) => {
                self.last_error = Some(err.into());
                InterpretResult::RuntimeError
            }
        };

        self.state = VmState::Ready;
        result
    }

    /// Compile `source` with `frontend`, then execute the resulting chunk.
    ///
    /// Nothing is executed when compilation fails.
    pub fn interpret_source<F>(&mut self, frontend: &mut F, source: &str) -> InterpretResult
    where
        F: Frontend + ?Sized,
    {
        match frontend.compile(source) {
            Ok(chunk) => self.interpret(&chunk),
            Err(err) => {
                self.stack.reset();
                self.ip = 0;
                self.last_error = Some(err.into());
                InterpretResult::CompileError
            }
        }
    }

    fn run(&mut self, chunk: &Chunk) -> Result<(), RuntimeError> {
        loop {
            let start = self.ip;
            if self.config.trace_execution {
                self.trace(chunk, start);
            }

            match self.step(chunk) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Return) => return Ok(()),
                Err(error) => {
                    return Err(RuntimeError {
                        error,
                        offset: start,
                        line: Self::line_near(chunk, start),
                    })
                }
            }
        }
    }

    /// Execute a single instruction
    fn step(&mut self, chunk: &Chunk) -> LoxResult<Flow> {
        let opcode = OpCode::try_from(self.read_u8(chunk)?)?;

        match opcode {
            OpCode::Constant => {
                let index = self.read_u8(chunk)? as usize;
                let constants = chunk.constants();
                let value = constants.get(index).ok_or(LoxError::InvalidConstant {
                    index,
                    count: constants.count(),
                })?;
                self.stack.push(value)?;
            }
            OpCode::Negate => {
                self.stack.require(opcode.arity(), opcode)?;
                let value = self.stack.pop(opcode)?;
                let n = value.as_number().ok_or(LoxError::OperandNotNumber {
                    op: opcode,
                    got: value.type_name(),
                })?;
                self.stack.push(Value::Number(-n))?;
            }
            OpCode::Add => self.binary(opcode, |a, b| a + b)?,
            OpCode::Subtract => self.binary(opcode, |a, b| a - b)?,
            OpCode::Multiply => self.binary(opcode, |a, b| a * b)?,
            OpCode::Divide => self.binary(opcode, |a, b| a / b)?,
            OpCode::Return => return Ok(Flow::Return),
        }

        Ok(Flow::Continue)
    }

    /// Pop `b`, then `a`, and push `apply(a, b)`.
    /// Division by zero follows IEEE 754.
    fn binary(&mut self, op: OpCode, apply: fn(f64, f64) -> f64) -> LoxResult<()> {
        self.stack.require(op.arity(), op)?;
        let b = self.stack.pop(op)?;
        let a = self.stack.pop(op)?;

        match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => self.stack.push(Value::Number(apply(x, y))),
            _ => Err(LoxError::OperandsNotNumbers {
                op,
                left: a.type_name(),
                right: b.type_name(),
            }),
        }
    }

    /// Read next byte from the code buffer
    fn read_u8(&mut self, chunk: &Chunk) -> LoxResult<u8> {
        let byte = chunk
            .code()
            .get(self.ip)
            .copied()
            .ok_or(LoxError::CodeOverrun { offset: self.ip })?;
        self.ip += 1;
        Ok(byte)
    }

    /// Line of the byte at `offset`, falling back to the last recorded byte
    /// when `offset` is past the end of code. `None` only for an empty chunk.
    fn line_near(chunk: &Chunk, offset: usize) -> Option<u32> {
        chunk
            .line_for(offset)
            .or_else(|| chunk.len().checked_sub(1).and_then(|last| chunk.line_for(last)))
    }

    fn trace(&self, chunk: &Chunk, offset: usize) {
        let stack: String = self
            .stack
            .as_slice()
            .iter()
            .map(|v| format!("[ {} ]", v))
            .collect();
        eprintln!("          {}", stack);
        if offset < chunk.len() {
            let (text, _) = disassemble_instruction(chunk, offset);
            eprintln!("{}", text);
        }
    }

    /// Release stack storage and return to the ready state; idempotent
    pub fn free(&mut self) {
        self.stack.free();
        self.ip = 0;
        self.state = VmState::Ready;
        self.last_error = None;
    }

    pub fn state(&self) -> VmState {
        self.state
    }

    /// Byte offset of the next instruction to execute
    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn stack_height(&self) -> usize {
        self.stack.size()
    }

    /// Evaluation stack, bottom first
    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }

    /// Peek at the top of the evaluation stack
    pub fn peek_top(&self) -> Option<Value> {
        self.stack.peek()
    }

    /// Error reported by the most recent `interpret` call
    pub fn last_error(&self) -> Option<&InterpretError> {
        self.last_error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<InterpretError> {
        self.last_error.take()
    }
}

impl Default for VirtualMachine {
    fn default() -> Self {
        Self::new(VmConfig::default())
    }
}
