use libdeassembler::{DeassembledWord, Deassembler, DeassemblyError};
use libisa::{
    instruction::{Instruction, InstructionDeassemblyError, Operand},
    Word,
};
use log::{debug, trace};
use thiserror::Error;

use crate::{memory::Cell, Emulator};

mod parsed;

#[cfg(test)]
mod tests;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteErr {
    #[error("Malformed stream ({0})")]
    MalformedStream(#[from] DeassemblyError),

    #[error("Unknown opcode {opcode} at offset {offset}")]
    UnknownOpcode { opcode: Word, offset: usize },

    #[error("Memory index {index} out of bounds for {memory_size} cells at offset {offset}")]
    OutOfBounds {
        index: Operand,
        offset: usize,
        memory_size: usize,
    },
}

impl ExecuteErr {
    /// Byte offset of the failing instruction, if the failure belongs to one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::MalformedStream(_) => None,
            Self::UnknownOpcode { offset, .. } | Self::OutOfBounds { offset, .. } => Some(*offset),
        }
    }
}

impl Emulator {
    /// Executes every instruction of `code` in order, halting at the first failure.
    ///
    /// A malformed stream is rejected before any instruction runs.
    pub fn execute(&mut self, code: &[u8]) -> Result<(), ExecuteErr> {
        let deassembler = Deassembler::new(code)?;

        for word in deassembler.words() {
            self.execute_word(word)?;
        }

        debug!(
            "Executed {} instructions over {} memory cells",
            self.executed,
            self.memory_size()
        );

        Ok(())
    }

    pub fn execute_word(&mut self, word: DeassembledWord) -> Result<(), ExecuteErr> {
        let instruction = Self::parse_instruction(word)?;

        trace!("{:04}: {}", word.offset, instruction);

        self.execute_parsed_instruction(word.offset, instruction)?;
        self.executed += 1;

        Ok(())
    }

    fn parse_instruction(word: DeassembledWord) -> Result<Instruction, ExecuteErr> {
        word.instruction().map_err(|e| match e {
            InstructionDeassemblyError::UnrecognizedOpcode(opcode) => ExecuteErr::UnknownOpcode {
                opcode,
                offset: word.offset,
            },
        })
    }

    fn mem_cell(&self, index: Operand, offset: usize) -> Result<Cell, ExecuteErr> {
        usize::try_from(index)
            .ok()
            .and_then(|addr| self.memory.cell(addr))
            .ok_or_else(|| self.out_of_bounds(index, offset))
    }

    fn mem_cell_mut(&mut self, index: Operand, offset: usize) -> Result<&mut Cell, ExecuteErr> {
        let err = self.out_of_bounds(index, offset);

        usize::try_from(index)
            .ok()
            .and_then(|addr| self.memory.cell_mut(addr))
            .ok_or(err)
    }

    fn out_of_bounds(&self, index: Operand, offset: usize) -> ExecuteErr {
        ExecuteErr::OutOfBounds {
            index,
            offset,
            memory_size: self.memory_size(),
        }
    }
}
