mod bytecode;
mod clock;
mod conf;
pub mod constants;
mod cpu;
mod devices;
mod disasm;
mod display;
mod error;
mod font;
mod instr;
mod interp;
mod memory;
mod registers;
mod stack;
mod timers;
mod vm;

pub use self::{
    bytecode::OpCode,
    clock::Clock,
    conf::{Chip8Conf, Hz, Quirks},
    cpu::Chip8Cpu,
    devices::{InvalidKeyCode, KeyCode, Keypad},
    disasm::Disassembler,
    display::Display,
    error::{Chip8Error, Chip8Result, Fault, Region},
    font::{BuiltinFonts, FontKind, FontSupplier},
    instr::Instr,
    memory::Memory,
    registers::{Register, Registers},
    stack::{AddressStack, StackOverflow, StackUnderflow},
    timers::Timers,
    vm::{Chip8Vm, Flow},
};

/// Version of the interpreter crate.
pub const IMPL_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use super::{
        conf::{Chip8Conf, Hz, Quirks},
        cpu::Chip8Cpu,
        devices::{KeyCode, Keypad},
        disasm::Disassembler,
        error::{Chip8Error, Chip8Result, Fault},
        font::FontKind,
        vm::{Chip8Vm, Flow},
    };
}
