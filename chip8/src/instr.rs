//! Instruction set.
use std::fmt;

use crate::{bytecode::OpCode, conf::Quirks, constants::Address};

/// Supported Chip-8 instructions, with the operands each one uses.
///
/// Register operands are indices into the general purpose registers,
/// always in the range `0x0..=0xF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    /// 00E0 (CLS)
    Cls,
    /// 00EE (RET)
    Ret,
    /// 1NNN (JP addr)
    Jump { addr: Address },
    /// 2NNN (CALL addr)
    Call { addr: Address },
    /// 3XNN (SE Vx, byte)
    SkipEqImm { x: u8, nn: u8 },
    /// 4XNN (SNE Vx, byte)
    SkipNeImm { x: u8, nn: u8 },
    /// 5XY0 (SE Vx, Vy)
    SkipEq { x: u8, y: u8 },
    /// 6XNN (LD Vx, byte)
    LoadImm { x: u8, nn: u8 },
    /// 7XNN (ADD Vx, byte)
    AddImm { x: u8, nn: u8 },
    /// 8XY0 (LD Vx, Vy)
    Load { x: u8, y: u8 },
    /// 8XY1 (OR Vx, Vy)
    Or { x: u8, y: u8 },
    /// 8XY2 (AND Vx, Vy)
    And { x: u8, y: u8 },
    /// 8XY3 (XOR Vx, Vy)
    Xor { x: u8, y: u8 },
    /// 8XY4 (ADD Vx, Vy)
    Add { x: u8, y: u8 },
    /// 8XY5 (SUB Vx, Vy)
    Sub { x: u8, y: u8 },
    /// 8XY6 (SHR Vx {, Vy})
    ShiftRight { x: u8, y: u8 },
    /// 8XY7 (SUBN Vx, Vy)
    SubN { x: u8, y: u8 },
    /// 8XYE (SHL Vx {, Vy})
    ShiftLeft { x: u8, y: u8 },
    /// 9XY0 (SNE Vx, Vy)
    SkipNe { x: u8, y: u8 },
    /// ANNN (LD I, addr)
    LoadIndex { addr: Address },
    /// BNNN (JP V0, addr)
    ///
    /// `x` is the high nibble of the address, used as the offset
    /// register by interpreters that treat this as BXNN.
    JumpOffset { x: u8, addr: Address },
    /// CXNN (RND Vx, byte)
    Random { x: u8, nn: u8 },
    /// DXYN (DRW Vx, Vy, nibble)
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E (SKP Vx)
    SkipKey { x: u8 },
    /// EXA1 (SKNP Vx)
    SkipNotKey { x: u8 },
    /// FX07 (LD Vx, DT)
    LoadDelay { x: u8 },
    /// FX0A (LD Vx, K)
    WaitKey { x: u8 },
    /// FX15 (LD DT, Vx)
    SetDelay { x: u8 },
    /// FX18 (LD ST, Vx)
    SetSound { x: u8 },
    /// FX1E (ADD I, Vx)
    AddIndex { x: u8 },
    /// FX29 (LD F, Vx)
    LoadFont { x: u8 },
    /// FX33 (LD B, Vx)
    Bcd { x: u8 },
    /// FX55 (LD [I], Vx)
    Store { x: u8 },
    /// FX65 (LD Vx, [I])
    Restore { x: u8 },
}

impl TryFrom<OpCode> for Instr {
    /// The opcode is handed back when it matches no instruction.
    type Error = OpCode;

    #[rustfmt::skip]
    fn try_from(op: OpCode) -> Result<Self, Self::Error> {
        use Instr::*;

        let OpCode { x, y, n, nn, nnn: addr, .. } = op;

        let instr = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Cls,
            (0x0, 0x0, 0xE, 0xE) => Ret,
            (0x1,   _,   _,   _) => Jump { addr },
            (0x2,   _,   _,   _) => Call { addr },
            (0x3,   _,   _,   _) => SkipEqImm { x, nn },
            (0x4,   _,   _,   _) => SkipNeImm { x, nn },
            (0x5,   _,   _, 0x0) => SkipEq { x, y },
            (0x6,   _,   _,   _) => LoadImm { x, nn },
            (0x7,   _,   _,   _) => AddImm { x, nn },
            (0x8,   _,   _, 0x0) => Load { x, y },
            (0x8,   _,   _, 0x1) => Or { x, y },
            (0x8,   _,   _, 0x2) => And { x, y },
            (0x8,   _,   _, 0x3) => Xor { x, y },
            (0x8,   _,   _, 0x4) => Add { x, y },
            (0x8,   _,   _, 0x5) => Sub { x, y },
            (0x8,   _,   _, 0x6) => ShiftRight { x, y },
            (0x8,   _,   _, 0x7) => SubN { x, y },
            (0x8,   _,   _, 0xE) => ShiftLeft { x, y },
            (0x9,   _,   _, 0x0) => SkipNe { x, y },
            (0xA,   _,   _,   _) => LoadIndex { addr },
            (0xB,   _,   _,   _) => JumpOffset { x, addr },
            (0xC,   _,   _,   _) => Random { x, nn },
            (0xD,   _,   _,   _) => Draw { x, y, n },
            (0xE,   _, 0x9, 0xE) => SkipKey { x },
            (0xE,   _, 0xA, 0x1) => SkipNotKey { x },
            (0xF,   _, 0x0, 0x7) => LoadDelay { x },
            (0xF,   _, 0x0, 0xA) => WaitKey { x },
            (0xF,   _, 0x1, 0x5) => SetDelay { x },
            (0xF,   _, 0x1, 0x8) => SetSound { x },
            (0xF,   _, 0x1, 0xE) => AddIndex { x },
            (0xF,   _, 0x2, 0x9) => LoadFont { x },
            (0xF,   _, 0x3, 0x3) => Bcd { x },
            (0xF,   _, 0x5, 0x5) => Store { x },
            (0xF,   _, 0x6, 0x5) => Restore { x },
            // Machine code routines (0NNN) and unassigned encodings
            // can't be emulated.
            _ => return Err(op),
        };

        Ok(instr)
    }
}

impl TryFrom<u16> for Instr {
    type Error = OpCode;

    fn try_from(word: u16) -> Result<Self, Self::Error> {
        Instr::try_from(OpCode::decode(word))
    }
}

impl Instr {
    /// Assembly mnemonic of the instruction as it behaves with the given quirks.
    pub fn mnemonic(&self, quirks: &Quirks) -> String {
        match *self {
            Instr::JumpOffset { x, addr } if quirks.jump_offset_uses_vx => {
                format!("JP V{x:X}, 0x{addr:03X}")
            }
            _ => self.to_string(),
        }
    }

    /// Human readable description of what the instruction does.
    pub fn describe(&self) -> String {
        use Instr::*;

        match *self {
            Cls => "clear the screen".to_string(),
            Ret => "return from subroutine".to_string(),
            Jump { addr } => format!("jump to 0x{addr:03X}"),
            Call { addr } => format!("call subroutine at 0x{addr:03X}"),
            SkipEqImm { x, nn } => format!("skip next instruction if V{x:X} == 0x{nn:02X}"),
            SkipNeImm { x, nn } => format!("skip next instruction if V{x:X} != 0x{nn:02X}"),
            SkipEq { x, y } => format!("skip next instruction if V{x:X} == V{y:X}"),
            LoadImm { x, nn } => format!("set V{x:X} to 0x{nn:02X}"),
            AddImm { x, nn } => format!("set V{x:X} to V{x:X} + 0x{nn:02X}"),
            Load { x, y } => format!("set V{x:X} to V{y:X}"),
            Or { x, y } => format!("set V{x:X} to V{x:X} | V{y:X}"),
            And { x, y } => format!("set V{x:X} to V{x:X} & V{y:X}"),
            Xor { x, y } => format!("set V{x:X} to V{x:X} ^ V{y:X}"),
            Add { x, y } => format!("set V{x:X} to V{x:X} + V{y:X}, VF = 1 on carry"),
            Sub { x, y } => format!("set V{x:X} to V{x:X} - V{y:X}, VF = 1 if V{x:X} >= V{y:X}"),
            ShiftRight { x, .. } => format!("shift V{x:X} right by 1, VF = bit shifted out"),
            SubN { x, y } => format!("set V{x:X} to V{y:X} - V{x:X}, VF = 1 if V{y:X} >= V{x:X}"),
            ShiftLeft { x, .. } => format!("shift V{x:X} left by 1, VF = bit shifted out"),
            SkipNe { x, y } => format!("skip next instruction if V{x:X} != V{y:X}"),
            LoadIndex { addr } => format!("set I to 0x{addr:03X}"),
            JumpOffset { addr, .. } => format!("jump to 0x{addr:03X} plus offset register"),
            Random { x, nn } => format!("set V{x:X} to a random byte & 0x{nn:02X}"),
            Draw { x, y, n } => {
                format!("draw {n} byte sprite from I at (V{x:X}, V{y:X}), VF = 1 on collision")
            }
            SkipKey { x } => format!("skip next instruction if key V{x:X} is pressed"),
            SkipNotKey { x } => format!("skip next instruction if key V{x:X} is not pressed"),
            LoadDelay { x } => format!("set V{x:X} to the delay timer"),
            WaitKey { x } => format!("wait for a key press and store it in V{x:X}"),
            SetDelay { x } => format!("set the delay timer to V{x:X}"),
            SetSound { x } => format!("set the sound timer to V{x:X}"),
            AddIndex { x } => format!("set I to I + V{x:X}"),
            LoadFont { x } => format!("set I to the font glyph for digit V{x:X}"),
            Bcd { x } => format!("store decimal digits of V{x:X} at I, I+1 and I+2"),
            Store { x } => format!("store V0 through V{x:X} in memory starting at I"),
            Restore { x } => format!("load V0 through V{x:X} from memory starting at I"),
        }
    }
}

/// Assembly mnemonic.
impl fmt::Display for Instr {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instr::*;

        match *self {
            Cls                      => write!(f, "CLS"),
            Ret                      => write!(f, "RET"),
            Jump { addr }            => write!(f, "JP 0x{addr:03X}"),
            Call { addr }            => write!(f, "CALL 0x{addr:03X}"),
            SkipEqImm { x, nn }      => write!(f, "SE V{x:X}, 0x{nn:02X}"),
            SkipNeImm { x, nn }      => write!(f, "SNE V{x:X}, 0x{nn:02X}"),
            SkipEq { x, y }          => write!(f, "SE V{x:X}, V{y:X}"),
            LoadImm { x, nn }        => write!(f, "LD V{x:X}, 0x{nn:02X}"),
            AddImm { x, nn }         => write!(f, "ADD V{x:X}, 0x{nn:02X}"),
            Load { x, y }            => write!(f, "LD V{x:X}, V{y:X}"),
            Or { x, y }              => write!(f, "OR V{x:X}, V{y:X}"),
            And { x, y }             => write!(f, "AND V{x:X}, V{y:X}"),
            Xor { x, y }             => write!(f, "XOR V{x:X}, V{y:X}"),
            Add { x, y }             => write!(f, "ADD V{x:X}, V{y:X}"),
            Sub { x, y }             => write!(f, "SUB V{x:X}, V{y:X}"),
            ShiftRight { x, y }      => write!(f, "SHR V{x:X}, V{y:X}"),
            SubN { x, y }            => write!(f, "SUBN V{x:X}, V{y:X}"),
            ShiftLeft { x, y }       => write!(f, "SHL V{x:X}, V{y:X}"),
            SkipNe { x, y }          => write!(f, "SNE V{x:X}, V{y:X}"),
            LoadIndex { addr }       => write!(f, "LD I, 0x{addr:03X}"),
            JumpOffset { addr, .. }  => write!(f, "JP V0, 0x{addr:03X}"),
            Random { x, nn }         => write!(f, "RND V{x:X}, 0x{nn:02X}"),
            Draw { x, y, n }         => write!(f, "DRW V{x:X}, V{y:X}, {n}"),
            SkipKey { x }            => write!(f, "SKP V{x:X}"),
            SkipNotKey { x }         => write!(f, "SKNP V{x:X}"),
            LoadDelay { x }          => write!(f, "LD V{x:X}, DT"),
            WaitKey { x }            => write!(f, "LD V{x:X}, K"),
            SetDelay { x }           => write!(f, "LD DT, V{x:X}"),
            SetSound { x }           => write!(f, "LD ST, V{x:X}"),
            AddIndex { x }           => write!(f, "ADD I, V{x:X}"),
            LoadFont { x }           => write!(f, "LD F, V{x:X}"),
            Bcd { x }                => write!(f, "LD B, V{x:X}"),
            Store { x }              => write!(f, "LD [I], V{x:X}"),
            Restore { x }            => write!(f, "LD V{x:X}, [I]"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Instr::try_from(0x00E0), Ok(Instr::Cls));
        assert_eq!(Instr::try_from(0x00EE), Ok(Instr::Ret));
        assert_eq!(Instr::try_from(0x1ABC), Ok(Instr::Jump { addr: 0xABC }));
        assert_eq!(Instr::try_from(0x8AB6), Ok(Instr::ShiftRight { x: 0xA, y: 0xB }));
        assert_eq!(
            Instr::try_from(0xB2F0),
            Ok(Instr::JumpOffset { x: 0x2, addr: 0x2F0 })
        );
        assert_eq!(Instr::try_from(0xD125), Ok(Instr::Draw { x: 1, y: 2, n: 5 }));
        assert_eq!(Instr::try_from(0xF355), Ok(Instr::Store { x: 3 }));
    }

    #[test]
    fn test_classify_unsupported() {
        for word in [0x0000_u16, 0x0123, 0x00E1, 0x5121, 0x8008, 0x800F, 0x9001, 0xE09F, 0xF000, 0xF0FF] {
            assert_eq!(
                Instr::try_from(word),
                Err(OpCode::decode(word)),
                "{word:04X} must not classify"
            );
        }
    }

    #[test]
    fn test_mnemonic() {
        assert_eq!(Instr::try_from(0x6A05).unwrap().to_string(), "LD VA, 0x05");
        assert_eq!(Instr::try_from(0x8344).unwrap().to_string(), "ADD V3, V4");
        assert_eq!(Instr::try_from(0xF10A).unwrap().to_string(), "LD V1, K");
        assert_eq!(Instr::try_from(0xD01F).unwrap().to_string(), "DRW V0, V1, 15");
    }

    #[test]
    fn test_mnemonic_quirks() {
        let instr = Instr::try_from(0xB2F0).unwrap();
        assert_eq!(instr.to_string(), "JP V0, 0x2F0");
        assert_eq!(instr.mnemonic(&Quirks::default()), "JP V0, 0x2F0");

        let quirks = Quirks {
            jump_offset_uses_vx: true,
            ..Default::default()
        };
        assert_eq!(instr.mnemonic(&quirks), "JP V2, 0x2F0");
        assert_eq!(Instr::try_from(0x6A05).unwrap().mnemonic(&quirks), "LD VA, 0x05");
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            Instr::try_from(0x8344).unwrap().describe(),
            "set V3 to V3 + V4, VF = 1 on carry"
        );
        assert_eq!(Instr::try_from(0x2300).unwrap().describe(), "call subroutine at 0x300");
    }
}
