use std::fmt::Display;

use crate::Word;

/// A named bit range inside an instruction word.
///
/// ```text
///  55  54 53    49 48      38 37   31 30          12 11      0
/// [reserved][opcode][    B    ][reserved][      C      ][   D    ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Opcode,
    B,
    C,
    D,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Opcode, Field::B, Field::C, Field::D];

    pub const fn offset(self) -> u32 {
        match self {
            Self::Opcode => 49,
            Self::B => 38,
            Self::C => 12,
            Self::D => 0,
        }
    }

    pub const fn width(self) -> u32 {
        match self {
            // Five bits rather than four, SHIFT_LEFT is opcode 16.
            Self::Opcode => 5,
            Self::B => 11,
            Self::C => 19,
            Self::D => 12,
        }
    }

    /// Largest value the assembler and encoder accept for the field.
    ///
    /// C sits in a 19-bit slot but only takes 18-bit values, so this is not
    /// always the all-ones value of [`Field::width`].
    pub const fn max(self) -> Word {
        match self {
            Self::Opcode => 31,
            Self::B => 2047,
            Self::C => 262_143,
            Self::D => 4095,
        }
    }

    /// Bits occupied by the field, shifted into place.
    pub const fn mask(self) -> Word {
        self.slot() << self.offset()
    }

    pub const fn fits(self, value: Word) -> bool {
        value <= self.max()
    }

    /// Reads the whole slot, so a decoded C may exceed [`Field::max`].
    pub const fn extract(self, word: Word) -> Word {
        (word >> self.offset()) & self.slot()
    }

    const fn slot(self) -> Word {
        (1 << self.width()) - 1
    }

    /// Shifts `value` into place. The caller has to check [`Field::fits`] first.
    pub(crate) const fn place(self, value: Word) -> Word {
        value << self.offset()
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The opcode column is called A in assembly logs.
        f.write_str(match self {
            Self::Opcode => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        })
    }
}
