//! Delay and sound timers.

/// Countdown timers, decremented once per frame.
#[derive(Debug, Default, Clone)]
pub struct Timers {
    /// (DT) Delay timer that counts down to 0.
    pub delay: u8,
    /// (ST) Sound timer that counts down to 0. When it has a non-zero value, a beep is played.
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn reset(&mut self) {
        self.delay = 0;
        self.sound = 0;
    }

    /// Count down both timers, stopping at zero.
    #[inline]
    pub fn decrement(&mut self) {
        // The checked_sub implementation uses `unlikely!()` which degrades performance.
        let (val, underflow) = self.delay.overflowing_sub(1);
        if !underflow {
            self.delay = val;
        }

        let (val, underflow) = self.sound.overflowing_sub(1);
        if !underflow {
            self.sound = val;
        }
    }

    /// Whether the buzzer should be sounding.
    #[inline(always)]
    pub fn is_buzzing(&self) -> bool {
        self.sound > 0
    }
}
