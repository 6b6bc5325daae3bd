use std::{path::PathBuf, process::exit};

use clap::{Parser, Subcommand};
use command::MemoryArgs;
use env_logger::Env;

mod command;


/// Assembler and emulator for a 56-bit toy machine.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble a source file into a binary and a CSV log.
    Assemble {
        source: PathBuf,
        binary: PathBuf,
        log: PathBuf,
    },

    /// Run a binary and write a CSV dump of a memory range.
    Run {
        binary: PathBuf,
        result: PathBuf,

        #[command(flatten)]
        memory: MemoryArgs,
    },

    /// Print the instructions of a binary.
    Disasm { binary: PathBuf },

    /// Assemble a source file and run the result.
    Build {
        source: PathBuf,
        binary: PathBuf,
        log: PathBuf,
        result: PathBuf,

        #[command(flatten)]
        memory: MemoryArgs,
    },
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = command::execute_command(args.command) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}
