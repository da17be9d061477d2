//! Virtual machine.
use std::fmt::{self, Write};

use log::{debug, error, info, trace};

use crate::{
    conf::{Chip8Conf, Hz},
    constants::*,
    cpu::Chip8Cpu,
    devices::{KeyCode, Keypad},
    display::Display,
    error::{Chip8Error, Chip8Result, Fault},
    font::{BuiltinFonts, FontSupplier},
    instr::Instr,
};

pub struct Chip8Vm {
    /// Machine state, constructed when a program is loaded.
    cpu: Option<Chip8Cpu>,
    keypad: Keypad,
    fonts: Box<dyn FontSupplier + Send>,
    /// Target number of instructions executed per second.
    frequency: Hz,
    /// Fault that stopped the machine.
    trap: Option<Fault>,
    conf: Chip8Conf,
}

impl Chip8Vm {
    pub fn new(conf: Chip8Conf) -> Self {
        Self::with_fonts(conf, BuiltinFonts)
    }

    /// Create a VM that takes its fontset from the given supplier.
    pub fn with_fonts(conf: Chip8Conf, fonts: impl FontSupplier + Send + 'static) -> Self {
        Chip8Vm {
            cpu: None,
            keypad: Keypad::new(),
            fonts: Box::new(fonts),
            frequency: conf.clock_frequency,
            trap: None,
            conf,
        }
    }

    /// Configuration that was used to instantiate the VM.
    pub fn config(&self) -> &Chip8Conf {
        &self.conf
    }

    /// Build a fresh machine, and load the font and the given program into it.
    ///
    /// On failure the VM is left as it was.
    pub fn load_bytecode(&mut self, bytecode: &[u8]) -> Chip8Result<()> {
        self.conf.validate(bytecode.len())?;

        let fontset = self.fonts.glyphs(self.conf.font)?;
        if fontset.len() != FONTSET_DATA_LENGTH {
            return Err(Chip8Error::invalid_config(
                "font",
                format!(
                    "fontset data must be {FONTSET_DATA_LENGTH} bytes, got {}",
                    fontset.len()
                ),
            ));
        }

        let mut cpu = Chip8Cpu::new(&self.conf, self.keypad.clone());

        // Start with clean memory to avoid leaking previous program.
        cpu.reset();
        cpu.memory.load_font(fontset)?;
        cpu.memory.load_program(bytecode)?;

        info!(
            "loaded {} byte program at 0x{:04X}, {} font at 0x{:04X}, {} bytes of memory",
            bytecode.len(),
            self.conf.program_start,
            self.conf.font,
            self.conf.font_start,
            self.conf.memory_size
        );
        debug!("quirks: {:?}", self.conf.quirks);

        self.cpu = Some(cpu);
        self.frequency = self.conf.clock_frequency;
        self.trap = None;

        Ok(())
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.cpu.is_some()
    }

    /// Fault that trapped the machine, if any.
    pub fn fault(&self) -> Option<Fault> {
        self.trap
    }

    pub fn cpu(&self) -> Option<&Chip8Cpu> {
        self.cpu.as_ref()
    }

    pub fn display(&self) -> Option<&Display> {
        self.cpu.as_ref().map(|cpu| cpu.display())
    }

    pub fn frequency(&self) -> Hz {
        self.frequency
    }

    /// Change the target instruction rate, until the next program is loaded.
    pub fn set_frequency(&mut self, frequency: Hz) {
        debug!("clock frequency {} Hz -> {} Hz", self.frequency.0, frequency.0);
        self.frequency = frequency;
    }

    /// Machine that can be stepped.
    ///
    /// Errors when no program is loaded, or a fault trapped the machine.
    fn cpu_mut(&mut self) -> Chip8Result<&mut Chip8Cpu> {
        if let Some(fault) = self.trap {
            return Err(Chip8Error::Runtime(fault));
        }
        self.cpu.as_mut().ok_or(Chip8Error::NotLoaded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Flow {
    Ok,
    /// Program counter has jumped to a new address.
    ///
    /// This is useful for the caller to avoid being
    /// blocked on infinite or long running loops.
    ///
    /// This is returned when the interpreter encounters:
    ///
    /// - 1nnn (`JP addr`)
    /// - 2nnn (`CALL addr`)
    /// - 00EE (`RET`)
    /// - Bnnn (`JP V0, addr`)
    Jump,
    /// The display buffer was cleared or drawn to.
    Draw,
    /// The sound timer was set.
    Sound,
    /// Wait for a keypress.
    ///
    /// This is triggered by the opcode `Fx0A` (`LD Vx, K`), which stops
    /// execution until a key is pressed, and loads the key value into `Vx`.
    KeyWait,
}

/// Interpreter
impl Chip8Vm {
    /// Sets the keyboard key input state.
    pub fn set_key(&self, key: KeyCode, pressed: bool) {
        self.keypad.set(key, pressed)
    }

    /// Handle to the keyboard state, which can be moved to an input thread.
    pub fn keypad(&self) -> Keypad {
        self.keypad.clone()
    }

    /// Clear the keyboard input state, setting all keys to up.
    pub fn clear_keys(&self) {
        self.keypad.clear()
    }

    /// Advance the machine by the time elapsed since the previous update.
    ///
    /// Executes as many instructions as fit in the elapsed time at the
    /// target frequency, at least one, then counts down the timers once.
    pub fn update(&mut self, elapsed_ms: f64) -> Chip8Result<()> {
        self.cpu_mut()?.display.clear_dirty();

        let step_count = self.frequency.cycles_in(elapsed_ms).max(1);
        for _ in 0..step_count {
            self.step()?;
        }

        self.cpu_mut()?.timers.decrement();

        Ok(())
    }

    /// Execute the given number of instructions, returning the
    /// control flow of the last one.
    pub fn run_steps(&mut self, step_count: usize) -> Chip8Result<Flow> {
        let mut control_flow = Flow::Ok;

        for _ in 0..step_count {
            control_flow = self.step()?;
        }

        Ok(control_flow)
    }

    /// Fetch, decode and execute a single instruction.
    pub fn step(&mut self) -> Chip8Result<Flow> {
        let cpu = self.cpu_mut()?;

        let addr = cpu.pc;
        let word = cpu.fetch();

        let result = match Instr::try_from(word) {
            Ok(instr) => {
                trace!("{addr:04X}: {word:04X} {}", instr.mnemonic(&cpu.quirks));
                cpu.execute(instr, addr)
            }
            Err(_) => Err(Fault::UnsupportedOpcode { instr: word, addr }),
        };

        result.map_err(|fault| {
            error!("{fault}, machine is trapped");
            self.trap = Some(fault);
            Chip8Error::Runtime(fault)
        })
    }
}

/// Troubleshooting
impl Chip8Vm {
    /// Returns the instruction words of the loaded program as a human readable string.
    pub fn dump_ram(&self, count: usize) -> Result<String, fmt::Error> {
        let mut buf = String::new();

        if let Some(cpu) = &self.cpu {
            let memory = cpu.memory();
            let start = memory.program_start();
            let end = start.saturating_add(count).min(memory.capacity());

            for addr in (start..end).step_by(2) {
                writeln!(buf, "{:04X}: {:04X}", addr, memory.fetch_short(addr))?;
            }
        }

        Ok(buf)
    }

    pub fn dump_display(&self) -> Result<String, fmt::Error> {
        match self.display() {
            Some(display) => display.dump(),
            None => Ok(String::new()),
        }
    }

    pub fn dump_keys(&self) -> Result<String, fmt::Error> {
        let mut buf = String::new();

        if self.keypad.any_key() {
            write!(buf, "keys:")?;
            for i in 0..KEY_COUNT {
                if self.keypad.is_pressed(i) {
                    write!(buf, " k{i:x}")?;
                }
            }
        }

        Ok(buf)
    }
}
