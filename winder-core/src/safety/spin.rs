//! No-spin detection
//!
//! While the motor is off the encoder can still pick up noise or a drum
//! coasting to a halt. Once a full window passes without a single pulse
//! the shaft is judged stationary and the caller stops counting edges
//! until the motor is energized again.

use super::window::SampleWindow;

/// Detects a stationary shaft while the motor is off
#[derive(Debug, Clone, Default)]
pub struct NoSpinDetector {
    window: SampleWindow,
}

impl NoSpinDetector {
    /// Create a new detector
    pub const fn new() -> Self {
        Self {
            window: SampleWindow::new(),
        }
    }

    /// Sample the pulse count
    ///
    /// Returns `true` when a window of `timeout_ms` expired with no change
    /// in `count`. The baseline is refreshed on every expiry regardless of
    /// the outcome.
    pub fn check(&mut self, now: u32, count: u32, timeout_ms: u32) -> bool {
        match self.window.poll(now, count, timeout_ms) {
            Some(last_count) => {
                self.window.rearm(now, count);
                last_count == count
            }
            None => false,
        }
    }
}
