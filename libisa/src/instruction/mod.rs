use std::fmt::Display;

use field::Field;
use kind::InstructionKind;
use thiserror::Error;

use crate::{Word, BYTES_PER_WORD, WORD_BITS};

pub mod field;
pub mod kind;


pub type Operand = Word;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InstructionAssemblyError {
    #[error(
        "Field {field} value {value} exceeds its maximum of {max}",
        max = .field.max()
    )]
    FieldOverflow { field: Field, value: Word },

    #[error("Encoded instruction {0:#x} doesn't fit into {bits} bits", bits = WORD_BITS)]
    WordOverflow(Word),

    #[error("Missing operand {0}")]
    MissingOperand(Field),

    #[error("Unexpected operand {0}")]
    UnexpectedOperand(Field),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InstructionDeassemblyError {
    #[error("Unrecognized opcode {0}")]
    UnrecognizedOpcode(Word),
}

/// Field values of an instruction word exactly as they appear on the wire.
///
/// Any word decodes into one of these, opcodes without a mnemonic included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RawInstruction {
    pub opcode: Word,
    pub b: Word,
    pub c: Word,
    pub d: Word,
}

impl RawInstruction {
    pub const fn new(opcode: Word, b: Word, c: Word, d: Word) -> Self {
        Self { opcode, b, c, d }
    }

    pub const fn field(&self, field: Field) -> Word {
        match field {
            Field::Opcode => self.opcode,
            Field::B => self.b,
            Field::C => self.c,
            Field::D => self.d,
        }
    }

    pub fn encode_word(self) -> Result<Word, InstructionAssemblyError> {
        let word = Field::ALL.into_iter().try_fold(0, |word, field| {
            let value = self.field(field);

            if !field.fits(value) {
                return Err(InstructionAssemblyError::FieldOverflow { field, value });
            }

            Ok(word | field.place(value))
        })?;

        // Unreachable while every field fits, kept in case the layout changes.
        if word & !crate::word_mask() != 0 {
            return Err(InstructionAssemblyError::WordOverflow(word));
        }

        Ok(word)
    }

    pub fn encode(self) -> Result<[u8; BYTES_PER_WORD], InstructionAssemblyError> {
        self.encode_word().map(crate::word_to_bytes)
    }

    pub const fn decode_word(word: Word) -> Self {
        Self {
            opcode: Field::Opcode.extract(word),
            b: Field::B.extract(word),
            c: Field::C.extract(word),
            d: Field::D.extract(word),
        }
    }

    pub fn decode(bytes: [u8; BYTES_PER_WORD]) -> Self {
        Self::decode_word(crate::bytes_to_word(bytes))
    }
}

/// Encodes the four fields into a big-endian instruction word.
pub fn encode(
    opcode: Word,
    b: Word,
    c: Word,
    d: Word,
) -> Result<[u8; BYTES_PER_WORD], InstructionAssemblyError> {
    RawInstruction::new(opcode, b, c, d).encode()
}

pub fn decode(bytes: [u8; BYTES_PER_WORD]) -> RawInstruction {
    RawInstruction::decode(bytes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub b: Operand,
    pub c: Operand,
    pub d: Option<Operand>,
}

impl Instruction {
    pub const fn new(kind: InstructionKind, b: Operand, c: Operand) -> Self {
        Self { kind, b, c, d: None }
    }

    pub const fn with_d(mut self, d: Operand) -> Self {
        self.d = Some(d);
        self
    }

    pub fn raw(self) -> Result<RawInstruction, InstructionAssemblyError> {
        let d = match (self.kind.has_d(), self.d) {
            (true, Some(d)) => d,
            (true, None) => return Err(InstructionAssemblyError::MissingOperand(Field::D)),
            (false, Some(_)) => return Err(InstructionAssemblyError::UnexpectedOperand(Field::D)),
            (false, None) => 0,
        };

        Ok(RawInstruction::new(self.kind.opcode(), self.b, self.c, d))
    }

    pub fn assemble(self) -> Result<[u8; BYTES_PER_WORD], InstructionAssemblyError> {
        self.raw()?.encode()
    }

    pub fn deassemble_instruction_word(
        instruction: Word,
    ) -> Result<Self, InstructionDeassemblyError> {
        Self::try_from(RawInstruction::decode_word(instruction))
    }

    pub fn operands(&self) -> impl Iterator<Item = Operand> {
        [self.b, self.c].into_iter().chain(self.d)
    }
}

impl TryFrom<RawInstruction> for Instruction {
    type Error = InstructionDeassemblyError;

    fn try_from(raw: RawInstruction) -> Result<Self, Self::Error> {
        let kind = InstructionKind::from_opcode(raw.opcode)
            .ok_or(InstructionDeassemblyError::UnrecognizedOpcode(raw.opcode))?;

        Ok(Self {
            kind,
            b: raw.b,
            c: raw.c,
            // Don't set D if it's zero and the instruction doesn't use it.
            d: (raw.d != 0 || kind.has_d()).then_some(raw.d),
        })
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.kind))?;

        for operand in self.operands() {
            f.write_fmt(format_args!(" {}", operand))?;
        }

        Ok(())
    }
}
