use std::{fmt::Display, io::Write};

use prettytable::{Cell as TableCell, Row, Table};
use thiserror::Error;

use super::Cell;

pub const DUMP_COLUMNS: [&str; 2] = ["Address", "Value"];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DumpError {
    #[error("Dump range {start}..{end} isn't within memory of {memory_size} cells")]
    RangeError {
        start: usize,
        end: usize,
        memory_size: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DumpEntry {
    pub address: usize,
    pub value: Cell,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDump {
    entries: Vec<DumpEntry>,
}

impl MemoryDump {
    pub fn entries(&self) -> &[DumpEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_table(&self) -> Table {
        libtable::titled_table(&DUMP_COLUMNS, self.rows())
    }

    /// Writes the dump as CSV, header row first.
    pub fn write_csv<W>(&self, writer: W) -> anyhow::Result<()>
    where
        W: Write,
    {
        libtable::write_csv(&DUMP_COLUMNS, self.rows(), writer, "memory dump")
    }

    fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.entries.iter().map(|entry| {
            Row::new(vec![
                TableCell::new(&entry.address.to_string()),
                TableCell::new(&entry.value.to_string()),
            ])
        })
    }
}

impl FromIterator<DumpEntry> for MemoryDump {
    fn from_iter<I: IntoIterator<Item = DumpEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Display for MemoryDump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_table().fmt(f)
    }
}
