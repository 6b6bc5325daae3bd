use std::fmt::Display;

use bimap::BiMap;
use lazy_static::lazy_static;

use crate::Word;

lazy_static! {
    static ref KIND_OPCODE_BIMAP: BiMap<InstructionKind, Word> = BiMap::from_iter([
        (InstructionKind::LoadConst, 2),
        (InstructionKind::StoreMemory, 10),
        (InstructionKind::LoadMemory, 14),
        (InstructionKind::ShiftRight, 15),
        (InstructionKind::ShiftLeft, 16),
    ]);

    static ref KIND_MNEMONIC_BIMAP: BiMap<InstructionKind, &'static str> = BiMap::from_iter([
        (InstructionKind::LoadConst, "LOAD_CONST"),
        (InstructionKind::LoadMemory, "LOAD_MEMORY"),
        (InstructionKind::StoreMemory, "STORE_MEMORY"),
        (InstructionKind::ShiftRight, "SHIFT_RIGHT"),
        (InstructionKind::ShiftLeft, "SHIFT_LEFT"),
    ]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    LoadConst,
    LoadMemory,

    /// Adds two memory cells, the name notwithstanding.
    StoreMemory,

    ShiftRight,
    ShiftLeft,
}

impl InstructionKind {
    pub const ALL: [InstructionKind; 5] = [
        Self::LoadConst,
        Self::LoadMemory,
        Self::StoreMemory,
        Self::ShiftRight,
        Self::ShiftLeft,
    ];

    pub fn from_opcode(opcode: Word) -> Option<Self> {
        KIND_OPCODE_BIMAP.get_by_right(&opcode).copied()
    }

    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        KIND_MNEMONIC_BIMAP.get_by_right(mnemonic).copied()
    }

    pub fn opcode(&self) -> Word {
        *KIND_OPCODE_BIMAP
            .get_by_left(self)
            .expect("No opcode mapping for instruction kind")
    }

    pub fn mnemonic(&self) -> &'static str {
        *KIND_MNEMONIC_BIMAP
            .get_by_left(self)
            .expect("No mnemonic mapping for instruction kind")
    }

    /// Number of operands read from source text: B and C, plus D for three operand kinds.
    pub fn arity(&self) -> usize {
        if self.has_d() {
            3
        } else {
            2
        }
    }

    pub fn has_d(&self) -> bool {
        match self {
            Self::LoadConst | Self::LoadMemory => false,
            Self::StoreMemory | Self::ShiftRight | Self::ShiftLeft => true,
        }
    }
}

impl Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::InstructionKind;

    #[test]
    fn every_kind_has_opcode_and_mnemonic() {
        for kind in InstructionKind::ALL {
            assert_eq!(InstructionKind::from_opcode(kind.opcode()), Some(kind));
            assert_eq!(InstructionKind::from_mnemonic(kind.mnemonic()), Some(kind));
        }
    }

    #[test]
    fn opcodes_are_fixed() {
        let opcodes: Vec<_> = InstructionKind::ALL.iter().map(|kind| kind.opcode()).collect();
        assert_eq!(opcodes, [2, 14, 10, 15, 16]);
    }

    #[test]
    fn unknown_codes_and_mnemonics() {
        assert_eq!(InstructionKind::from_opcode(0), None);
        assert_eq!(InstructionKind::from_opcode(3), None);
        assert_eq!(InstructionKind::from_mnemonic("load_const"), None);
        assert_eq!(InstructionKind::from_mnemonic("JMP"), None);
    }

    #[test]
    fn arities() {
        assert_eq!(InstructionKind::LoadConst.arity(), 2);
        assert_eq!(InstructionKind::LoadMemory.arity(), 2);
        assert_eq!(InstructionKind::StoreMemory.arity(), 3);
        assert_eq!(InstructionKind::ShiftRight.arity(), 3);
        assert_eq!(InstructionKind::ShiftLeft.arity(), 3);
    }
}
