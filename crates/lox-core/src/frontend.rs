//! Front-end boundary
//!
//! The engine consumes chunks; turning source text into a chunk is the job
//! of a front-end supplied by the host. This trait is the handoff point.

use crate::bytecode::chunk::Chunk;
use crate::error::CompileError;

/// Produces a chunk from source text.
///
/// Implementations must emit well-framed code: every `CONSTANT` opcode
/// followed by one operand byte, and a trailing `RETURN`.
pub trait Frontend {
    fn compile(&mut self, source: &str) -> Result<Chunk, CompileError>;
}
