use std::ops::Range;

use dump::{DumpEntry, DumpError, MemoryDump};

pub mod dump;


pub type Cell = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory(Vec<Cell>);

impl Memory {
    pub fn new(size: usize) -> Self {
        Self(vec![0; size])
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn cell(&self, addr: usize) -> Option<Cell> {
        self.0.get(addr).copied()
    }

    pub fn cell_mut(&mut self, addr: usize) -> Option<&mut Cell> {
        self.0.get_mut(addr)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    /// Reads out `range`, which has to lie within the memory.
    pub fn dump(&self, range: Range<usize>) -> Result<MemoryDump, DumpError> {
        let Range { start, end } = range;

        let cells = self
            .0
            .get(start..end)
            .ok_or(DumpError::RangeError {
                start,
                end,
                memory_size: self.size(),
            })?;

        Ok(cells
            .iter()
            .zip(start..)
            .map(|(&value, address)| DumpEntry { address, value })
            .collect())
    }
}
