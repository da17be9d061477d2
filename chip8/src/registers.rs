//! Register file.
use std::ops::{Index, IndexMut};

use crate::constants::*;

/// Registers with a special role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    V0 = 0x0,
    /// Carry, borrow and collision flag.
    VF = 0xF,
}

/// General purpose registers and the address register.
#[derive(Debug, Default, Clone)]
pub struct Registers {
    /// General purpose registers for temporary values.
    ///
    /// Register 16 (VF) is used for either the carry flag or borrow switch depending on opcode.
    v: [u8; REGISTER_COUNT],
    /// Pointer register (I) used for temporarily storing an address.
    index: Address,
}

impl Registers {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn reset(&mut self) {
        self.v.fill(0);
        self.index = 0;
    }

    #[inline(always)]
    pub fn index(&self) -> Address {
        self.index
    }

    #[inline(always)]
    pub fn set_index(&mut self, addr: Address) {
        self.index = addr;
    }

    /// Registers V0 through VF.
    pub fn as_slice(&self) -> &[u8] {
        &self.v
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.v
    }
}

/// Register by number. Only the lowest nibble is used.
impl Index<u8> for Registers {
    type Output = u8;

    #[inline(always)]
    fn index(&self, reg: u8) -> &Self::Output {
        &self.v[reg as usize & 0xF]
    }
}

impl IndexMut<u8> for Registers {
    #[inline(always)]
    fn index_mut(&mut self, reg: u8) -> &mut Self::Output {
        &mut self.v[reg as usize & 0xF]
    }
}

impl Index<Register> for Registers {
    type Output = u8;

    #[inline(always)]
    fn index(&self, reg: Register) -> &Self::Output {
        &self[reg as u8]
    }
}

impl IndexMut<Register> for Registers {
    #[inline(always)]
    fn index_mut(&mut self, reg: Register) -> &mut Self::Output {
        &mut self[reg as u8]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_symbolic_registers() {
        let mut regs = Registers::new();
        regs[0xF_u8] = 1;
        regs[Register::V0] = 0x42;

        assert_eq!(regs[Register::VF], 1);
        assert_eq!(regs[0_u8], 0x42);
    }

    #[test]
    fn test_reset() {
        let mut regs = Registers::new();
        for i in 0..REGISTER_COUNT as u8 {
            regs[i] = i + 1;
        }
        regs.set_index(0xFFF);

        regs.reset();
        assert!(regs.as_slice().iter().all(|v| *v == 0));
        assert_eq!(regs.index(), 0);
    }
}
