//! Constant values of the Chip-8 architecture.

/// Number of general purpose registers.
pub const REGISTER_COUNT: usize = 0x10; // 16

/// The lower memory space was historically used for the interpreter itself,
/// but is now used for fonts.
pub const MEM_START: usize = 0x200; // 512
pub const MEM_SIZE: usize = 0x1000; // 4096

/// Largest memory that 16-bit addresses can reach.
pub const MEM_SIZE_MAX: usize = 0x10000;

/// Where the builtin font is placed, by popular convention.
pub const FONTSET_START: usize = 0x050; // 80

/// Each hexadecimal glyph is 8 pixels wide and 5 rows high.
pub const FONTSET_HEIGHT: usize = 5;
pub const FONTSET_GLYPH_COUNT: usize = 16;
pub const FONTSET_DATA_LENGTH: usize = FONTSET_HEIGHT * FONTSET_GLYPH_COUNT; // 80

/// Levels of nesting allowed in the call stack.
///
/// The original RCA 1802 implementation allocated 48 bytes
/// for up to 12 levels of nesting. Most modern interpreters
/// allow 16.
pub const STACK_SIZE: usize = 16;

/// Deepest call stack a configuration may ask for.
pub const STACK_SIZE_MAX: usize = 256;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Largest display width or height a configuration may ask for.
///
/// Sprite coordinates come from 8-bit registers.
pub const DISPLAY_SIZE_MAX: usize = 256;

/// Sprites are always one byte, so 8 pixels, wide.
pub const SPRITE_WIDTH: usize = 8;

/// Number of clock cycles in a second that delay timers count down.
pub const DELAY_FREQUENCY: u64 = 60;

/// Default number of instructions executed per second.
pub const CPU_FREQUENCY: u64 = 700;

/// Number of nanoseconds in a second
#[doc(hidden)]
pub const NANOS_IN_SECOND: u64 = 1_000_000_000;

#[doc(hidden)]
pub const MILLIS_IN_SECOND: f64 = 1000.0;

/// Number of keys on the keyboard (0x0-0xF)
pub const KEY_COUNT: u8 = 16;

/// Type for storing the 12-bit memory addresses.
pub type Address = u16;
