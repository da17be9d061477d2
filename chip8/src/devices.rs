//! IO devices shared with the host.
use std::sync::{
    atomic::{AtomicU16, Ordering},
    Arc,
};

use crate::constants::*;

/// Hexadecimal keyboard state.
///
/// Handles are cheap to clone and can be sent to the thread that
/// receives input events, while the VM reads the same state.
/// Pressed is a 1 bit, released is a 0 bit.
#[derive(Debug, Default, Clone)]
pub struct Keypad(Arc<AtomicU16>);

impl Keypad {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set(&self, key: KeyCode, pressed: bool) {
        let mask = 1 << key.as_u8();
        if pressed {
            self.0.fetch_or(mask, Ordering::AcqRel);
        } else {
            self.0.fetch_and(!mask, Ordering::AcqRel);
        }
    }

    #[inline]
    pub fn press(&self, key: KeyCode) {
        self.set(key, true)
    }

    #[inline]
    pub fn release(&self, key: KeyCode) {
        self.set(key, false)
    }

    /// Snapshot of all keys.
    #[inline(always)]
    pub fn state(&self) -> u16 {
        self.0.load(Ordering::Acquire)
    }

    /// Whether the key with the given id is pressed.
    ///
    /// Ids outside of the keyboard are never pressed.
    #[inline]
    pub fn is_pressed(&self, key_id: u8) -> bool {
        key_id < KEY_COUNT && self.state() & (1 << key_id) != 0
    }

    /// Check whether any key is pressed down.
    #[inline(always)]
    pub fn any_key(&self) -> bool {
        self.state() != 0
    }

    /// Retrieve the lowest key that is pressed down.
    #[inline]
    pub fn first_key(&self) -> Option<u8> {
        let state = self.state();
        if state == 0 {
            None
        } else {
            Some(state.trailing_zeros() as u8)
        }
    }

    /// Clear the keyboard input state, setting all keys to up.
    pub fn clear(&self) {
        self.0.store(0, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8"))]
#[repr(u8)]
pub enum KeyCode {
    Key0 = 0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF = 0xF,
}

impl KeyCode {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let key_id = self.as_u8();
        write!(f, "k{key_id:x}")
    }
}

impl From<KeyCode> for u8 {
    fn from(keycode: KeyCode) -> Self {
        keycode.as_u8()
    }
}

impl TryFrom<u8> for KeyCode {
    type Error = InvalidKeyCode;

    fn try_from(key_id: u8) -> Result<Self, Self::Error> {
        match key_id {
            0 => Ok(Self::Key0),
            1 => Ok(Self::Key1),
            2 => Ok(Self::Key2),
            3 => Ok(Self::Key3),
            4 => Ok(Self::Key4),
            5 => Ok(Self::Key5),
            6 => Ok(Self::Key6),
            7 => Ok(Self::Key7),
            8 => Ok(Self::Key8),
            9 => Ok(Self::Key9),
            10 => Ok(Self::KeyA),
            11 => Ok(Self::KeyB),
            12 => Ok(Self::KeyC),
            13 => Ok(Self::KeyD),
            14 => Ok(Self::KeyE),
            15 => Ok(Self::KeyF),
            _ => Err(InvalidKeyCode),
        }
    }
}

#[derive(Debug)]
pub struct InvalidKeyCode;

impl std::error::Error for InvalidKeyCode {}

impl std::fmt::Display for InvalidKeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "keycode must be in range 0 <= keycode < 16")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_key_state() {
        let keypad = Keypad::new();

        keypad.press(KeyCode::Key0);
        assert_eq!(keypad.state(), 0b00000000_00000001);
        assert!(keypad.is_pressed(0));
        assert!(!keypad.is_pressed(1));
        assert!(!keypad.is_pressed(7));

        keypad.press(KeyCode::Key7);
        assert_eq!(keypad.state(), 0b00000000_10000001);
        assert_eq!(keypad.first_key(), Some(0));

        keypad.release(KeyCode::Key0);
        assert_eq!(keypad.state(), 0b00000000_10000000);
        assert!(!keypad.is_pressed(0));
        assert!(keypad.is_pressed(7));
        assert_eq!(keypad.first_key(), Some(7));

        keypad.press(KeyCode::KeyF);
        assert_eq!(keypad.state(), 0b10000000_10000000);
        assert!(keypad.is_pressed(15));
        assert!(!keypad.is_pressed(16));
        assert!(!keypad.is_pressed(0xFF));

        keypad.clear();
        assert!(!keypad.any_key());
        assert_eq!(keypad.first_key(), None);
    }

    #[test]
    fn test_shared_between_threads() {
        let keypad = Keypad::new();
        let input = keypad.clone();

        std::thread::spawn(move || input.press(KeyCode::KeyA))
            .join()
            .unwrap();

        assert!(keypad.is_pressed(0xA));
    }

    #[test]
    fn test_keycode_conversion() {
        assert_eq!(KeyCode::try_from(0xB).unwrap(), KeyCode::KeyB);
        assert!(KeyCode::try_from(16).is_err());
        assert_eq!(u8::from(KeyCode::KeyF), 15);
        assert_eq!(KeyCode::Key5.to_string(), "k5");
    }
}
