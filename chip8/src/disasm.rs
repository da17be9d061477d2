//! Disassembler.
use std::fmt::{self, Write as FmtWrite};

use crate::{bytecode::OpCode, conf::Quirks, constants::*, instr::Instr};

/// Renders bytecode as an assembly listing.
///
/// ```text
/// 0200: 6A05 LD VA, 0x05    ; set VA to 0x05
/// ```
pub struct Disassembler<'a> {
    bytecode: &'a [u8],
    /// Address the first byte is loaded at.
    origin: usize,
    /// Instructions are rendered the way they behave with these quirks.
    quirks: Quirks,
    cursor: usize,
}

impl<'a> Disassembler<'a> {
    pub fn new(bytecode: &'a [u8]) -> Self {
        Self::with_origin(bytecode, MEM_START)
    }

    pub fn with_origin(bytecode: &'a [u8], origin: usize) -> Self {
        Self {
            bytecode,
            origin,
            quirks: Quirks::default(),
            cursor: 0,
        }
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    /// Disassemble the whole program.
    pub fn listing(&mut self) -> Result<String, fmt::Error> {
        let mut s = String::new();

        self.cursor = 0;
        while self.cursor < self.bytecode.len() {
            self.disassemble(&mut s)?;
            self.cursor += 2;
        }
        self.cursor = 0;

        Ok(s)
    }

    /// Write the instruction under the cursor to the given writer.
    pub fn disassemble<W: FmtWrite>(&self, w: &mut W) -> fmt::Result {
        let addr = self.origin + self.cursor;

        match OpCode::from_bytes(self.bytecode, self.cursor) {
            Some(op) => match Instr::try_from(op) {
                Ok(instr) => {
                    let mnemonic = instr.mnemonic(&self.quirks);
                    writeln!(
                        w,
                        "{addr:04X}: {op} {mnemonic:<16} ; {}",
                        instr.describe()
                    )
                }
                // Sprite data and other embedded bytes.
                Err(op) => writeln!(w, "{addr:04X}: {op} DW 0x{op}"),
            },
            None => match self.bytecode.get(self.cursor) {
                Some(byte) => writeln!(w, "{addr:04X}: {byte:02X}   DB 0x{byte:02X}"),
                None => Ok(()),
            },
        }
    }
}
