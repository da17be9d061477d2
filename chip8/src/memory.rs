//! Main memory.
use std::ops::Range;

use crate::error::{Chip8Error, Chip8Result, Region};

/// Byte addressable RAM.
///
/// Addresses wrap around the capacity, so instructions can never
/// reach outside of the buffer.
pub struct Memory {
    /// Main memory storage space.
    ram: Box<[u8]>,
    /// Where the fontset is loaded.
    font_start: usize,
    /// Where programs are loaded and execution starts.
    program_start: usize,
}

impl Memory {
    pub fn new(size: usize, font_start: usize, program_start: usize) -> Self {
        Self {
            ram: vec![0; size].into_boxed_slice(),
            font_start,
            program_start,
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.ram.len()
    }

    pub fn font_start(&self) -> usize {
        self.font_start
    }

    pub fn program_start(&self) -> usize {
        self.program_start
    }

    #[inline(always)]
    fn wrap(&self, addr: usize) -> usize {
        addr % self.ram.len()
    }

    /// Read the big-endian instruction word at the given address.
    #[inline(always)]
    pub fn fetch_short(&self, addr: usize) -> u16 {
        let a = self.ram[self.wrap(addr)];
        let b = self.ram[self.wrap(addr + 1)];
        u16::from_be_bytes([a, b])
    }

    #[inline(always)]
    pub fn read(&self, addr: usize) -> u8 {
        self.ram[self.wrap(addr)]
    }

    #[inline(always)]
    pub fn write(&mut self, addr: usize, value: u8) {
        let addr = self.wrap(addr);
        self.ram[addr] = value;
    }

    /// Erase all memory.
    pub fn reset(&mut self) {
        self.ram.fill(0);
    }

    pub fn load_font(&mut self, fontset: &[u8]) -> Chip8Result<()> {
        let range = self.region(Region::Font, self.font_start, fontset.len())?;
        self.ram[range].copy_from_slice(fontset);
        Ok(())
    }

    pub fn load_program(&mut self, bytecode: &[u8]) -> Chip8Result<()> {
        let range = self.region(Region::Program, self.program_start, bytecode.len())?;
        self.ram[range].copy_from_slice(bytecode);
        Ok(())
    }

    /// Range of memory that a load of the given length would occupy.
    fn region(&self, region: Region, offset: usize, len: usize) -> Chip8Result<Range<usize>> {
        match offset.checked_add(len) {
            Some(end) if end <= self.ram.len() => Ok(offset..end),
            _ => Err(Chip8Error::OutOfMemory {
                region,
                offset,
                len,
                capacity: self.ram.len(),
            }),
        }
    }

    /// View of the raw memory.
    pub fn as_slice(&self) -> &[u8] {
        &self.ram
    }
}
