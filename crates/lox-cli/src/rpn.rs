//! Reverse-Polish assembler
//!
//! Stand-in front-end for the shell: turns `1.2 3.4 + 5.6 / neg` into a
//! chunk. Literals push constants, operators emit the matching opcode, and
//! a trailing `RETURN` is always appended. Operand counts are not checked
//! here; the VM reports underflow at run time.

use lox_core::{Chunk, CompileError, Frontend, OpCode, Value};

#[derive(Debug, Default)]
pub struct RpnAssembler;

impl RpnAssembler {
    pub fn new() -> Self {
        RpnAssembler
    }
}

impl Frontend for RpnAssembler {
    fn compile(&mut self, source: &str) -> Result<Chunk, CompileError> {
        let mut chunk = Chunk::new();
        let mut last_line = 1;

        for (index, text) in source.lines().enumerate() {
            let line = index as u32 + 1;
            for token in text.split_whitespace() {
                if token.starts_with('#') {
                    break;
                }
                emit_token(&mut chunk, token, line)?;
                last_line = line;
            }
        }

        if chunk.is_empty() {
            return Err(CompileError::new("expected an expression"));
        }
        chunk.write_op(OpCode::Return, last_line);
        Ok(chunk)
    }
}

fn emit_token(chunk: &mut Chunk, token: &str, line: u32) -> Result<(), CompileError> {
    let op = match token {
        "+" => Some(OpCode::Add),
        "-" => Some(OpCode::Subtract),
        "*" => Some(OpCode::Multiply),
        "/" => Some(OpCode::Divide),
        "neg" | "~" => Some(OpCode::Negate),
        _ => None,
    };
    if let Some(op) = op {
        chunk.write_op(op, line);
        return Ok(());
    }

    let value = match token {
        "nil" => Value::Nil,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => token
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| CompileError::at_line(format!("unexpected token '{}'", token), line))?,
    };
    chunk
        .write_constant(value, line)
        .map_err(|e| CompileError::at_line(e.to_string(), line))?;
    Ok(())
}
