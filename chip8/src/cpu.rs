//! CPU and memory state.
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    conf::{Chip8Conf, Quirks},
    constants::*,
    devices::Keypad,
    display::Display,
    memory::Memory,
    registers::Registers,
    stack::AddressStack,
    timers::Timers,
};

/// Core state for a chip8 interpreter.
pub struct Chip8Cpu {
    // ------------------------------------------------------------------------
    // Registers
    /// Program counter pointing to the next instruction to fetch.
    pub(crate) pc: Address,
    pub(crate) registers: Registers,
    pub(crate) timers: Timers,

    // ------------------------------------------------------------------------
    // Memory
    pub(crate) memory: Memory,
    pub(crate) stack: AddressStack,
    /// Screen buffer that is drawn to.
    pub(crate) display: Display,

    // ------------------------------------------------------------------------
    // Devices
    pub(crate) keypad: Keypad,
    pub(crate) rng: StdRng,
    pub(crate) quirks: Quirks,
}

impl Chip8Cpu {
    /// Build the machine described by the configuration.
    ///
    /// The configuration must have been validated.
    pub(crate) fn new(conf: &Chip8Conf, keypad: Keypad) -> Self {
        let rng = match conf.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            pc: conf.program_start as Address,
            registers: Registers::new(),
            timers: Timers::new(),
            memory: Memory::new(conf.memory_size, conf.font_start, conf.program_start),
            stack: AddressStack::new(conf.stack_size),
            display: Display::new(conf.display_width, conf.display_height),
            keypad,
            rng,
            quirks: conf.quirks,
        }
    }

    /// Return every component to its power-on state.
    pub(crate) fn reset(&mut self) {
        self.pc = self.memory.program_start() as Address;
        self.registers.reset();
        self.timers.reset();
        self.memory.reset();
        self.stack.reset();
        self.display.reset();
        self.keypad.clear();
    }

    /// Read the instruction word at the program counter, and advance past it.
    #[inline(always)]
    pub(crate) fn fetch(&mut self) -> u16 {
        let word = self.memory.fetch_short(self.pc as usize);
        self.pc = self.pc.wrapping_add(2);
        word
    }

    /// Extract the instruction word at the current program counter.
    #[inline(always)]
    pub fn instr(&self) -> u16 {
        self.memory.fetch_short(self.pc as usize)
    }

    #[inline(always)]
    pub fn pc(&self) -> Address {
        self.pc
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn stack(&self) -> &AddressStack {
        &self.stack
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }
}
