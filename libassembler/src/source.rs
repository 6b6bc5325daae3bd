use libisa::instruction::{kind::InstructionKind, Instruction, Operand};

use crate::AssemblyError;

/// An instruction together with the 1-based source line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceInstruction {
    pub line: usize,
    pub instruction: Instruction,
}

/// Parses every non-blank line of `source`, stopping at the first bad one.
pub fn parse_program(source: &str) -> Result<Vec<SourceInstruction>, AssemblyError> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, text)| {
            let line = index + 1;

            parse_line(line, text)
                .map(|parsed| parsed.map(|instruction| SourceInstruction { line, instruction }))
                .transpose()
        })
        .collect()
}

/// Parses one line of source. Blank lines parse to `None`.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Instruction>, AssemblyError> {
    let mut tokens = text.split_whitespace();

    let Some(mnemonic) = tokens.next() else {
        return Ok(None);
    };

    let kind = InstructionKind::from_mnemonic(mnemonic).ok_or_else(|| {
        AssemblyError::UnknownMnemonic {
            line,
            mnemonic: mnemonic.to_string(),
        }
    })?;

    let operand_tokens: Vec<_> = tokens.collect();
    if operand_tokens.len() != kind.arity() {
        return Err(AssemblyError::WrongArity {
            line,
            kind,
            found: operand_tokens.len(),
        });
    }

    // Operands are counted from 1, the mnemonic is token 0.
    let operands = operand_tokens
        .into_iter()
        .enumerate()
        .map(|(index, token)| parse_operand(line, index + 1, token))
        .collect::<Result<Vec<_>, _>>()?;

    let instruction = Instruction::new(kind, operands[0], operands[1]);

    Ok(Some(match operands.get(2) {
        Some(&d) => instruction.with_d(d),
        None => instruction,
    }))
}

fn parse_operand(line: usize, index: usize, token: &str) -> Result<Operand, AssemblyError> {
    let invalid = || AssemblyError::InvalidOperand {
        line,
        index,
        token: token.to_string(),
    };

    // `u64::from_str` also takes a leading `+`, which isn't valid source.
    if !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid());
    }

    token.parse().map_err(|_| invalid())
}
