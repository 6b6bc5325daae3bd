use std::ops::Range;

use memory::{
    dump::{DumpError, MemoryDump},
    Memory,
};

pub use execute::ExecuteErr;

pub mod execute;
pub mod memory;

/// Straight-line machine over a flat memory of integer cells.
///
/// Effects of instructions that ran before a failing one stay in `memory`.
pub struct Emulator {
    pub memory: Memory,
    pub executed: usize,
}

impl Emulator {
    pub fn new(memory_size: usize) -> Self {
        Self {
            memory: Memory::new(memory_size),
            executed: 0,
        }
    }

    pub fn memory_size(&self) -> usize {
        self.memory.size()
    }

    pub fn dump(&self, range: Range<usize>) -> Result<MemoryDump, DumpError> {
        self.memory.dump(range)
    }
}

/// Executes a whole instruction stream against freshly zeroed memory.
///
/// On error the partially updated memory is dropped. Use [`Emulator::execute`]
/// to inspect the effects of the instructions that ran before the failure.
pub fn run(code: &[u8], memory_size: usize) -> Result<Memory, ExecuteErr> {
    let mut emulator = Emulator::new(memory_size);
    emulator.execute(code)?;

    Ok(emulator.memory)
}
