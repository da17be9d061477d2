//! VM configuration.
use std::time::Duration;

use crate::{
    constants::*,
    error::{Chip8Error, Chip8Result},
    font::FontKind,
};

/// VM Configuration Parameters.
///
/// The defaults describe the canonical machine: 4KB of memory,
/// programs at 0x200, 16 levels of subroutine nesting and a
/// 64x32 display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Chip8Conf {
    /// Size of main memory in bytes.
    pub memory_size: usize,
    /// Address where programs are loaded and execution starts.
    pub program_start: usize,
    /// Address where the fontset is loaded.
    pub font_start: usize,
    /// Levels of subroutine nesting.
    pub stack_size: usize,
    pub display_width: usize,
    pub display_height: usize,
    /// Initial number of instructions executed per second.
    pub clock_frequency: Hz,
    pub font: FontKind,
    pub quirks: Quirks,
    /// Seed for the random number generator, for reproducible runs.
    pub rng_seed: Option<u64>,
}

impl Default for Chip8Conf {
    fn default() -> Self {
        Self {
            memory_size: MEM_SIZE,
            program_start: MEM_START,
            font_start: FONTSET_START,
            stack_size: STACK_SIZE,
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
            clock_frequency: Hz(CPU_FREQUENCY),
            font: FontKind::default(),
            quirks: Quirks::default(),
            rng_seed: None,
        }
    }
}

/// Behaviour of instructions that differ between historical interpreters.
///
/// All switches default to off.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Quirks {
    /// 8XY6 and 8XYE copy VY into VX before shifting, like the COSMAC VIP.
    pub shift_uses_vy: bool,
    /// BNNN jumps to NNN + VX (as BXNN) instead of NNN + V0, like CHIP-48.
    pub jump_offset_uses_vx: bool,
    /// FX55 and FX65 leave I pointing past the last register, like the COSMAC VIP.
    pub load_store_increments_index: bool,
    /// FX1E sets VF when I moves past the end of memory, like the Amiga interpreter.
    pub index_overflow_sets_vf: bool,
}

/// CPU clock frequency, in hertz (per second)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Hz(pub u64);

impl From<Hz> for Duration {
    fn from(freq: Hz) -> Self {
        if freq.0 == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(NANOS_IN_SECOND / freq.0)
        }
    }
}

impl Hz {
    /// Number of whole cycles that fit in the elapsed milliseconds.
    ///
    /// Negative and non-finite durations contain no cycles.
    #[inline]
    pub fn cycles_in(&self, elapsed_ms: f64) -> usize {
        // Float to int casts saturate, and NaN becomes 0.
        (self.0 as f64 * (elapsed_ms / MILLIS_IN_SECOND)).floor() as usize
    }
}

impl Chip8Conf {
    /// Check that the configuration describes a machine that can run
    /// a program of the given length.
    pub fn validate(&self, program_len: usize) -> Chip8Result<()> {
        if self.memory_size == 0 || self.memory_size > MEM_SIZE_MAX {
            return Err(Chip8Error::invalid_config(
                "memory_size",
                format!("must be between 1 and {MEM_SIZE_MAX} bytes, got {}", self.memory_size),
            ));
        }

        if self.program_start >= self.memory_size {
            return Err(Chip8Error::invalid_config(
                "program_start",
                format!(
                    "0x{:04X} is outside of {} bytes of memory",
                    self.program_start, self.memory_size
                ),
            ));
        }

        if self.font_start >= self.memory_size {
            return Err(Chip8Error::invalid_config(
                "font_start",
                format!(
                    "0x{:04X} is outside of {} bytes of memory",
                    self.font_start, self.memory_size
                ),
            ));
        }

        if self.stack_size == 0 || self.stack_size > STACK_SIZE_MAX {
            return Err(Chip8Error::invalid_config(
                "stack_size",
                format!(
                    "call stack must have between 1 and {STACK_SIZE_MAX} levels, got {}",
                    self.stack_size
                ),
            ));
        }

        for (field, size) in [
            ("display_width", self.display_width),
            ("display_height", self.display_height),
        ] {
            if size == 0 || size > DISPLAY_SIZE_MAX {
                return Err(Chip8Error::invalid_config(
                    field,
                    format!(
                        "display of {}x{} must be between 1 and {DISPLAY_SIZE_MAX} pixels on each side",
                        self.display_width, self.display_height
                    ),
                ));
            }
        }

        let font = self.font_start..self.font_start + FONTSET_DATA_LENGTH;
        let program = self.program_start..self.program_start + program_len;
        if program_len > 0 && font.start < program.end && program.start < font.end {
            return Err(Chip8Error::invalid_config(
                "font_start",
                format!(
                    "fontset at 0x{:04X}..0x{:04X} overlaps program at 0x{:04X}..0x{:04X}",
                    font.start, font.end, program.start, program.end
                ),
            ));
        }

        Ok(())
    }
}
