//! Result and errors.
use std::fmt::{self, Display, Formatter};

use crate::constants::Address;

pub type Chip8Result<T> = std::result::Result<T, Chip8Error>;

#[derive(Debug)]
pub enum Chip8Error {
    /// VM error during interpreter loop.
    ///
    /// The machine is trapped and keeps reporting the fault until
    /// a program is loaded again.
    Runtime(Fault),
    /// Attempt to load data that can't fit in VM memory.
    OutOfMemory {
        region: Region,
        offset: usize,
        len: usize,
        capacity: usize,
    },
    /// Configuration values that can't describe a working machine.
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
    /// The VM was stepped before a program was loaded.
    NotLoaded,
    Io(std::io::Error),
    Fmt(fmt::Error),
}

/// Fatal conditions raised while executing a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Fetched instruction word matches no known instruction.
    UnsupportedOpcode { instr: u16, addr: Address },
    /// Subroutine call with a full address stack.
    StackOverflow { addr: Address, capacity: usize },
    /// Subroutine return with an empty address stack.
    StackUnderflow { addr: Address },
}

/// Memory area that a load targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Font,
    Program,
}

impl Display for Chip8Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Runtime(fault) => write!(f, "runtime error: {}", fault),
            Self::OutOfMemory {
                region,
                offset,
                len,
                capacity,
            } => write!(
                f,
                "{region} of {len} bytes at 0x{offset:04X} does not fit in {capacity} bytes of VM memory"
            ),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid configuration `{field}`: {reason}")
            }
            Self::NotLoaded => write!(f, "no program loaded"),
            Self::Io(err) => write!(f, "{}", err),
            Self::Fmt(err) => write!(f, "{}", err),
        }
    }
}

impl Display for Fault {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedOpcode { instr, addr } => {
                write!(f, "unsupported opcode {instr:04X} at 0x{addr:04X}")
            }
            Self::StackOverflow { addr, capacity } => write!(
                f,
                "call stack overflow at 0x{addr:04X}, cannot nest deeper than {capacity}"
            ),
            Self::StackUnderflow { addr } => {
                write!(f, "call stack underflow, return at 0x{addr:04X} without call")
            }
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Font => write!(f, "fontset"),
            Self::Program => write!(f, "program"),
        }
    }
}

impl std::error::Error for Chip8Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Fmt(err) => Some(err),
            _ => None,
        }
    }
}

impl Chip8Error {
    pub(crate) fn invalid_config(field: &'static str, reason: impl ToString) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.to_string(),
        }
    }

    /// The runtime fault, if this error was raised while stepping.
    pub fn fault(&self) -> Option<Fault> {
        match self {
            Self::Runtime(fault) => Some(*fault),
            _ => None,
        }
    }
}

impl From<Fault> for Chip8Error {
    fn from(fault: Fault) -> Self {
        Chip8Error::Runtime(fault)
    }
}

impl From<fmt::Error> for Chip8Error {
    fn from(err: fmt::Error) -> Self {
        Chip8Error::Fmt(err)
    }
}

impl From<std::io::Error> for Chip8Error {
    fn from(err: std::io::Error) -> Self {
        Chip8Error::Io(err)
    }
}
