//! Builtin hexadecimal fonts.
use std::{fmt, str::FromStr};

use crate::{
    constants::*,
    error::{Chip8Error, Chip8Result},
};

/// Glyph sets for the hexadecimal digits 0-F.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
pub enum FontKind {
    /// Glyphs of the CHIP-48 and SUPER-CHIP interpreters,
    /// which most modern programs expect.
    #[default]
    Chip48,
    /// Glyphs of the original COSMAC VIP interpreter.
    CosmacVip,
}

impl FontKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chip48 => "chip48",
            Self::CosmacVip => "vip",
        }
    }
}

impl fmt::Display for FontKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FontKind {
    type Err = Chip8Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chip48" | "chip-48" | "schip" => Ok(Self::Chip48),
            "vip" | "cosmac" | "cosmacvip" | "cosmac-vip" => Ok(Self::CosmacVip),
            other => Err(Chip8Error::invalid_config(
                "font",
                format!("unsupported font variant \"{other}\""),
            )),
        }
    }
}

impl TryFrom<String> for FontKind {
    type Error = Chip8Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Source of fontset data loaded into VM memory.
pub trait FontSupplier {
    /// Glyph bitmaps for digits 0-F, 5 bytes each, in digit order.
    fn glyphs(&self, kind: FontKind) -> Chip8Result<&[u8]>;
}

/// Fonts compiled into the interpreter.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinFonts;

impl FontSupplier for BuiltinFonts {
    fn glyphs(&self, kind: FontKind) -> Chip8Result<&[u8]> {
        match kind {
            FontKind::Chip48 => Ok(&CHIP48_FONT),
            FontKind::CosmacVip => Ok(&VIP_FONT),
        }
    }
}

#[rustfmt::skip]
static CHIP48_FONT: [u8; FONTSET_DATA_LENGTH] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[rustfmt::skip]
static VIP_FONT: [u8; FONTSET_DATA_LENGTH] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x60, 0x20, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0xA0, 0xA0, 0xF0, 0x20, 0x20, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x10, 0x10, 0x10, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xF0, 0x50, 0x70, 0x50, 0xF0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xF0, 0x50, 0x50, 0x50, 0xF0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_builtin_fonts() {
        for kind in [FontKind::Chip48, FontKind::CosmacVip] {
            let glyphs = BuiltinFonts.glyphs(kind).unwrap();
            assert_eq!(glyphs.len(), FONTSET_DATA_LENGTH);
            // Zero looks the same everywhere.
            assert_eq!(&glyphs[0..FONTSET_HEIGHT], &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        }

        let chip48 = BuiltinFonts.glyphs(FontKind::Chip48).unwrap();
        let vip = BuiltinFonts.glyphs(FontKind::CosmacVip).unwrap();
        assert_ne!(chip48, vip);
    }

    #[test]
    fn test_parse_font_kind() {
        assert_eq!("chip48".parse::<FontKind>().unwrap(), FontKind::Chip48);
        assert_eq!(" VIP ".parse::<FontKind>().unwrap(), FontKind::CosmacVip);
        assert_eq!(FontKind::CosmacVip.to_string(), "vip");

        match "superchip-big".parse::<FontKind>() {
            Err(Chip8Error::InvalidConfig { field, reason }) => {
                assert_eq!(field, "font");
                assert!(reason.contains("superchip-big"));
            }
            other => panic!("expected invalid config, got {other:?}"),
        }
    }
}
