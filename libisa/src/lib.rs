use byteorder::{BigEndian, ByteOrder};

pub mod instruction;

/// An instruction word. Only the low [`WORD_BITS`] bits are ever used.
pub type Word = u64;

pub const BYTES_PER_WORD: usize = 7;
pub const WORD_BITS: u32 = (BYTES_PER_WORD * 8) as u32;

pub fn word_to_bytes(word: Word) -> [u8; BYTES_PER_WORD] {
    let mut bytes = [0; BYTES_PER_WORD];
    BigEndian::write_uint(&mut bytes, word & word_mask(), BYTES_PER_WORD);
    bytes
}

pub fn bytes_to_word(bytes: [u8; BYTES_PER_WORD]) -> Word {
    BigEndian::read_uint(&bytes, BYTES_PER_WORD)
}

pub const fn word_mask() -> Word {
    (1 << WORD_BITS) - 1
}
