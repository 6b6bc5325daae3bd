use std::{fmt::Display, io::Write};

use libisa::{
    instruction::{kind::InstructionKind, Instruction, Operand},
    Word,
};
use prettytable::{Cell, Row, Table};

pub const LOG_COLUMNS: [&str; 5] = ["Instruction", "A", "B", "C", "D"];

/// One assembled instruction: its mnemonic and the field values that were encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssemblyLogEntry {
    pub line: usize,
    pub kind: InstructionKind,
    pub opcode: Word,
    pub b: Operand,
    pub c: Operand,
    pub d: Option<Operand>,
}

impl AssemblyLogEntry {
    pub fn new(line: usize, instruction: Instruction) -> Self {
        Self {
            line,
            kind: instruction.kind,
            opcode: instruction.kind.opcode(),
            b: instruction.b,
            c: instruction.c,
            d: instruction.d,
        }
    }

    fn row(&self) -> Row {
        Row::new(vec![
            Cell::new(self.kind.mnemonic()),
            Cell::new(&self.opcode.to_string()),
            Cell::new(&self.b.to_string()),
            Cell::new(&self.c.to_string()),
            // Two operand instructions leave D blank.
            Cell::new(&self.d.map(|d| d.to_string()).unwrap_or_default()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyLog {
    entries: Vec<AssemblyLogEntry>,
}

impl AssemblyLog {
    pub fn push(&mut self, entry: AssemblyLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AssemblyLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_table(&self) -> Table {
        libtable::titled_table(&LOG_COLUMNS, self.rows())
    }

    /// Writes the log as CSV, header row first.
    pub fn write_csv<W>(&self, writer: W) -> anyhow::Result<()>
    where
        W: Write,
    {
        libtable::write_csv(&LOG_COLUMNS, self.rows(), writer, "assembly log")
    }

    fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.entries.iter().map(AssemblyLogEntry::row)
    }
}

impl Display for AssemblyLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_table().fmt(f)
    }
}
