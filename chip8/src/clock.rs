//! Frame clock.
use std::{
    thread,
    time::{Duration, Instant},
};

use crate::{conf::Hz, constants::*};

/// Timer to synchronize the host thread with the frame rate.
///
/// It is designed to work with the update pattern of the
/// interpreter. Between frames the VM is idle, and the time that
/// elapsed is handed to the next update so it can execute the
/// matching number of instructions.
pub struct Clock {
    last: Instant,
    interval: Duration,
}

impl Clock {
    /// Creates a new clock with the current time as internal state.
    pub fn new(frequency: Hz) -> Self {
        Self {
            last: Instant::now(),
            interval: frequency.into(),
        }
    }

    /// Set the clock state back to zero.
    pub fn reset(&mut self) {
        self.last = Instant::now()
    }

    /// Time elapsed since the previous frame, in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.last.elapsed().as_secs_f64() * MILLIS_IN_SECOND
    }

    /// Block the current thread until the next frame, and return the
    /// length of the frame in milliseconds.
    ///
    /// Time lost to a stalled host is dropped, so the result is at most
    /// one interval. Use [`Clock::lap`] for the raw elapsed time.
    pub fn wait(&mut self) -> f64 {
        loop {
            let elapsed = self.last.elapsed();
            if elapsed < self.interval {
                // Sleep does not have enough resolution, and causes
                // the clock to run at 30 FPS.
                //
                // Spinning a loop causes high CPU usage and fan madness.
                //
                // Yielding in a loop is the best alternative.
                thread::yield_now();
            } else {
                // Reset back to zero, rather than trying to catch up.
                //
                // If the host was paused for debugging, and a large
                // amount of time has elapsed until it is resumed,
                // it should simply continue at the next frame. The
                // frame never reports more than one interval.
                self.reset();
                return elapsed.min(self.interval).as_secs_f64() * MILLIS_IN_SECOND;
            }
        }
    }

    /// Start the next frame without waiting, returning the
    /// milliseconds since the previous one.
    pub fn lap(&mut self) -> f64 {
        let elapsed = self.elapsed_ms();
        self.reset();
        elapsed
    }
}
