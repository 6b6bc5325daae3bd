use libisa::{
    instruction::{field::Field, kind::InstructionKind, InstructionAssemblyError},
    Word,
};
use log::debug;
use thiserror::Error;

pub use assembly_log::{AssemblyLog, AssemblyLogEntry};
pub use source::{parse_line, parse_program, SourceInstruction};

pub mod assembly_log;
pub mod source;


#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("Line {line}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic { line: usize, mnemonic: String },

    #[error(
        "Line {line}: {kind} takes {expected} operands but {found} were given",
        expected = .kind.arity()
    )]
    WrongArity {
        line: usize,
        kind: InstructionKind,
        found: usize,
    },

    #[error("Line {line}: operand {index} (`{token}`) is not a non-negative decimal integer")]
    InvalidOperand {
        line: usize,
        index: usize,
        token: String,
    },

    #[error(
        "Line {line}: field {field} value {value} exceeds its maximum of {max}",
        max = .field.max()
    )]
    FieldOverflow { line: usize, field: Field, value: Word },

    #[error("Line {line}: {source}")]
    Encoding {
        line: usize,
        source: InstructionAssemblyError,
    },
}

impl AssemblyError {
    pub fn line(&self) -> usize {
        match self {
            Self::UnknownMnemonic { line, .. }
            | Self::WrongArity { line, .. }
            | Self::InvalidOperand { line, .. }
            | Self::FieldOverflow { line, .. }
            | Self::Encoding { line, .. } => *line,
        }
    }

    fn from_encoding(line: usize, error: InstructionAssemblyError) -> Self {
        match error {
            InstructionAssemblyError::FieldOverflow { field, value } => {
                Self::FieldOverflow { line, field, value }
            }
            source => Self::Encoding { line, source },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyOutput {
    pub machine_code: Vec<u8>,
    pub log: AssemblyLog,
}

/// Assembles source text into machine code, one 7-byte word per non-blank line.
///
/// Nothing is returned unless every line assembles.
pub fn assemble(source: &str) -> Result<AssemblyOutput, AssemblyError> {
    assemble_program(parse_program(source)?)
}

/// Assembles already parsed instructions in order.
///
/// [`parse_program`] always sets D to match the arity of the mnemonic, so
/// [`AssemblyError::Encoding`] (wrapping a missing or unexpected operand, or a
/// word overflow) can only come from instructions built by hand and passed here.
pub fn assemble_program<I>(program: I) -> Result<AssemblyOutput, AssemblyError>
where
    I: IntoIterator<Item = SourceInstruction>,
{
    program.into_iter().try_fold(
        AssemblyOutput::default(),
        |mut output, SourceInstruction { line, instruction }| {
            let instruction_machine_code = instruction
                .assemble()
                .map_err(|e| AssemblyError::from_encoding(line, e))?;

            debug!(
                "Line {}: {} => {:02X?}",
                line, instruction, instruction_machine_code
            );

            output.machine_code.extend(instruction_machine_code);
            output.log.push(AssemblyLogEntry::new(line, instruction));

            Ok(output)
        },
    )
}
