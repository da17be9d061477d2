//! Helpers for extracting data from opcodes.
use std::fmt;

/// Instruction word split into its operand fields.
///
/// Every 16-bit word decodes into some field set. Whether
/// the fields form a supported instruction is decided by
/// [`Instr`](crate::instr::Instr) classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpCode {
    /// The raw instruction word.
    pub word: u16,
    /// Operation group in the upper nibble. (0xF000)
    pub t: u8,
    /// Register VX. (0x0F00)
    pub x: u8,
    /// Register VY. (0x00F0)
    pub y: u8,
    /// Lowest nibble. (0x000F)
    pub n: u8,
    /// Lowest byte. (0x00FF)
    pub nn: u8,
    /// 12-bit address. (0x0FFF)
    pub nnn: u16,
}

impl OpCode {
    #[inline(always)]
    pub fn decode(word: u16) -> Self {
        let [a, b] = word.to_be_bytes();
        Self {
            word,
            t: (a & 0b1111_0000) >> 4,
            x: a & 0b1111,
            y: (b & 0b1111_0000) >> 4,
            n: b & 0b1111,
            nn: b,
            nnn: word & 0x0FFF,
        }
    }

    /// Decode the instruction stored big-endian in the buffer at the cursor.
    #[inline(always)]
    pub fn from_bytes(bytecode: &[u8], cursor: usize) -> Option<Self> {
        let a = *bytecode.get(cursor)?;
        let b = *bytecode.get(cursor + 1)?;
        Some(Self::decode(u16::from_be_bytes([a, b])))
    }

    /// The nibble tuple that instructions are matched on.
    #[inline(always)]
    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.t, self.x, self.y, self.n)
    }
}

impl From<u16> for OpCode {
    fn from(word: u16) -> Self {
        OpCode::decode(word)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}{:X}{:X}{:X}", self.t, self.x, self.y, self.n)
    }
}
