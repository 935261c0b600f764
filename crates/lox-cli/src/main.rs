//! Lox bytecode engine - CLI
//!
//! Thin shell around the engine: builds chunks, runs them and maps the
//! outcome to a process exit code (0 ok, 65 compile error, 70 runtime error).

mod rpn;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use lox_core::bytecode::disassemble;
use lox_core::{Chunk, Frontend, InterpretResult, OpCode, Value, VirtualMachine, VmConfig};

use rpn::RpnAssembler;

#[derive(Parser)]
#[command(name = "lox", version, about = "Lox bytecode engine")]
struct Cli {
    /// Print the stack and each instruction while executing
    #[arg(long, global = true)]
    trace: bool,

    /// Maximum evaluation stack height
    #[arg(long, global = true, default_value_t = VmConfig::default().max_stack_size)]
    stack_limit: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the built-in sample chunk: -((1.2 + 3.4) / 5.6)
    Demo {
        #[arg(long)]
        disassemble: bool,
    },
    /// Assemble and run a reverse-Polish expression, e.g. "1 2 + neg"
    Eval {
        expr: String,
        #[arg(long)]
        disassemble: bool,
    },
    /// Assemble and run a reverse-Polish source file
    Run {
        path: PathBuf,
        #[arg(long)]
        disassemble: bool,
    },
    /// Read expressions line by line from stdin
    Repl,
}

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config = VmConfig::new()
        .with_trace(cli.trace)
        .with_max_stack_size(cli.stack_limit);
    let mut vm = VirtualMachine::new(config);

    let code = match cli.command {
        Command::Demo { disassemble: show } => {
            let chunk = sample_chunk();
            if show {
                print!("{}", disassemble(&chunk, "demo"));
            }
            execute(&mut vm, &chunk)
        }
        Command::Eval { expr, disassemble: show } => run_source(&mut vm, &expr, "expr", show),
        Command::Run { path, disassemble: show } => {
            let source = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let name = path.display().to_string();
            run_source(&mut vm, &source, &name, show)
        }
        Command::Repl => repl(&mut vm)?,
    };

    vm.free();
    Ok(code)
}

fn run_source(vm: &mut VirtualMachine, source: &str, name: &str, show: bool) -> i32 {
    let mut assembler = RpnAssembler::new();
    if !show {
        let result = vm.interpret_source(&mut assembler, source);
        return report(vm, result);
    }
    match assembler.compile(source) {
        Ok(chunk) => {
            print!("{}", disassemble(&chunk, name));
            execute(vm, &chunk)
        }
        Err(e) => {
            eprintln!("Compile error: {}", e);
            InterpretResult::CompileError.exit_code()
        }
    }
}

fn execute(vm: &mut VirtualMachine, chunk: &Chunk) -> i32 {
    let result = vm.interpret(chunk);
    report(vm, result)
}

/// Print the result value or the error, and return the exit code
fn report(vm: &mut VirtualMachine, result: InterpretResult) -> i32 {
    match result {
        InterpretResult::Ok => {
            if let Some(value) = vm.peek_top() {
                println!("{}", value);
            }
        }
        InterpretResult::CompileError => {
            if let Some(e) = vm.take_error() {
                eprintln!("Compile error: {}", e);
            }
        }
        InterpretResult::RuntimeError => {
            if let Some(e) = vm.take_error() {
                eprintln!("Runtime error: {}", e);
            }
        }
    }
    result.exit_code()
}

fn repl(vm: &mut VirtualMachine) -> Result<i32> {
    let stdin = io::stdin();
    let mut assembler = RpnAssembler::new();
    loop {
        print!("> ");
        io::stdout().flush().context("failed to flush stdout")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("failed to read line")? == 0 {
            println!();
            return Ok(0);
        }
        if line.trim().is_empty() {
            continue;
        }
        let result = vm.interpret_source(&mut assembler, &line);
        report(vm, result);
    }
}

/// -((1.2 + 3.4) / 5.6) spread over five source lines
fn sample_chunk() -> Chunk {
    let mut chunk = Chunk::new();
    let constants = [(1.2, 1), (3.4, 2)];
    for (n, line) in constants {
        let index = chunk.add_constant(Value::Number(n));
        chunk.write_op(OpCode::Constant, line);
        chunk.write_byte(index as u8, line);
    }
    chunk.write_op(OpCode::Add, 2);

    let index = chunk.add_constant(Value::Number(5.6));
    chunk.write_op(OpCode::Constant, 2);
    chunk.write_byte(index as u8, 2);

    chunk.write_op(OpCode::Divide, 3);
    chunk.write_op(OpCode::Negate, 4);
    chunk.write_op(OpCode::Return, 5);
    chunk
}
