use std::{
    fs::{self, File},
    io::BufWriter,
    ops::Range,
    path::Path,
};

use anyhow::Context;
use libassembler::AssemblyOutput;
use libemulator::{memory::dump::MemoryDump, Emulator, ExecuteErr};
use log::info;
use thiserror::Error;

use crate::Command;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Execution halted after {executed} instructions")]
    ExecutionHalted {
        executed: usize,
        #[source]
        source: ExecuteErr,
    },
}

#[derive(clap::Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryArgs {
    /// First address of the dump.
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// End of the dump, exclusive.
    #[arg(long, default_value_t = 16)]
    pub end: usize,

    /// Number of memory cells [default: the dump end]
    #[arg(long)]
    pub memory_size: Option<usize>,

    /// Also print the dump as a table.
    #[arg(long)]
    pub print: bool,
}

impl MemoryArgs {
    pub fn memory_size(&self) -> usize {
        self.memory_size.unwrap_or(self.end)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

pub fn execute_command(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Assemble {
            source,
            binary,
            log,
        } => {
            assemble_file(&source, &binary, &log)?;
        }

        Command::Run {
            binary,
            result,
            memory,
        } => {
            run_file(&binary, &result, memory)?;
        }

        Command::Disasm { binary } => {
            let code = read_binary(&binary)?;
            print!("{}", libdeassembler::deassemble_text(&code));
        }

        Command::Build {
            source,
            binary,
            log,
            result,
            memory,
        } => {
            assemble_file(&source, &binary, &log)?;
            run_file(&binary, &result, memory)?;
        }
    }

    Ok(())
}

/// Writes the binary and the log only once the whole source has assembled.
pub fn assemble_file(source: &Path, binary: &Path, log: &Path) -> anyhow::Result<AssemblyOutput> {
    let text = fs::read_to_string(source)
        .with_context(|| format!("Failed to read source file {}", source.display()))?;

    let output = libassembler::assemble(&text)
        .with_context(|| format!("Failed to assemble {}", source.display()))?;

    fs::write(binary, &output.machine_code)
        .with_context(|| format!("Failed to write binary {}", binary.display()))?;

    let log_file = File::create(log)
        .with_context(|| format!("Failed to create log {}", log.display()))?;
    output.log.write_csv(BufWriter::new(log_file))?;

    info!(
        "Assembled {} instructions into {} and {}",
        output.log.len(),
        binary.display(),
        log.display()
    );

    Ok(output)
}

pub fn run_file(binary: &Path, result: &Path, memory: MemoryArgs) -> anyhow::Result<MemoryDump> {
    let code = read_binary(binary)?;

    let mut emulator = Emulator::new(memory.memory_size());

    // Reject a bad range before running anything.
    emulator.dump(memory.range())?;

    emulator
        .execute(&code)
        .map_err(|source| CommandError::ExecutionHalted {
            executed: emulator.executed,
            source,
        })
        .with_context(|| format!("Failed to run {}", binary.display()))?;

    let dump = emulator.dump(memory.range())?;

    let result_file = File::create(result)
        .with_context(|| format!("Failed to create result file {}", result.display()))?;
    dump.write_csv(BufWriter::new(result_file))?;

    info!(
        "Executed {} instructions, saved addresses {}..{} to {}",
        emulator.executed,
        memory.start,
        memory.end,
        result.display()
    );

    if memory.print {
        println!("{}", dump);
    }

    Ok(dump)
}

fn read_binary(binary: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(binary).with_context(|| format!("Failed to read binary {}", binary.display()))
}
