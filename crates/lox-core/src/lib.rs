//! Lox bytecode engine - Core Library
//!
//! Chunk encoding, constant pools, run-length line tables and the
//! stack-based virtual machine that executes chunks.

pub mod error;
pub mod config;
pub mod memory;
pub mod bytecode;
pub mod vm;
pub mod frontend;

// Re-export commonly used types
pub use error::{CompileError, InterpretError, InterpretResult, LoxError, LoxResult, RuntimeError};
pub use config::VmConfig;
pub use bytecode::{Chunk, OpCode};
pub use vm::value::{Value, ValueStore};
pub use vm::vm::{VirtualMachine, VmState};
pub use frontend::Frontend;
