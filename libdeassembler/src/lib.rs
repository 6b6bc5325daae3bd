use libisa::{
    instruction::{Instruction, InstructionDeassemblyError, RawInstruction},
    BYTES_PER_WORD,
};
use thiserror::Error;


#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeassemblyError {
    #[error(
        "Stream of {len} bytes isn't a whole number of {bytes}-byte instructions \
         ({trailing} trailing bytes)",
        bytes = BYTES_PER_WORD
    )]
    MalformedStream { len: usize, trailing: usize },
}

/// A decoded instruction word and the byte offset it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeassembledWord {
    pub offset: usize,
    pub raw: RawInstruction,
}

impl DeassembledWord {
    pub fn index(&self) -> usize {
        self.offset / BYTES_PER_WORD
    }

    pub fn instruction(&self) -> Result<Instruction, InstructionDeassemblyError> {
        Instruction::try_from(self.raw)
    }
}

pub struct Deassembler<'a> {
    code: &'a [u8],
}

impl<'a> Deassembler<'a> {
    /// Checks that `code` splits evenly into instruction words.
    pub fn new(code: &'a [u8]) -> Result<Self, DeassemblyError> {
        let trailing = code.len() % BYTES_PER_WORD;

        if trailing != 0 {
            return Err(DeassemblyError::MalformedStream {
                len: code.len(),
                trailing,
            });
        }

        Ok(Self { code })
    }

    pub fn len(&self) -> usize {
        self.code.len() / BYTES_PER_WORD
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = DeassembledWord> + 'a {
        self.code
            .chunks_exact(BYTES_PER_WORD)
            .enumerate()
            .map(|(index, chunk)| {
                let mut bytes = [0; BYTES_PER_WORD];
                bytes.copy_from_slice(chunk);

                DeassembledWord {
                    offset: index * BYTES_PER_WORD,
                    raw: RawInstruction::decode(bytes),
                }
            })
    }

    pub fn deassemble(&self) -> Result<Vec<Instruction>, InstructionDeassemblyError> {
        self.words().map(|word| word.instruction()).collect()
    }

    /// One line per word, unrecognized opcodes are written out in angle brackets.
    pub fn deassemble_text(&self) -> String {
        self.words()
            .map(|word| {
                let text = match word.instruction() {
                    Ok(instruction) => instruction.to_string(),
                    Err(e) => format!("<{}>", e),
                };

                format!("{:04}: {}\n", word.offset, text)
            })
            .collect()
    }
}

pub fn deassemble_text(code: &[u8]) -> String {
    match Deassembler::new(code) {
        Ok(deassembler) => deassembler.deassemble_text(),
        Err(e) => format!("<{}>\n", e),
    }
}
