//! Stall detection
//!
//! The principal safety check: if the motor is energized but the encoder
//! reports no pulses for a whole stall window, the winder is jammed and
//! the caller must cut the drive.

use super::window::SampleWindow;

/// Detects a jammed shaft while the motor is on
#[derive(Debug, Clone, Default)]
pub struct StallDetector {
    window: SampleWindow,
}

impl StallDetector {
    /// Create a new detector
    pub const fn new() -> Self {
        Self {
            window: SampleWindow::new(),
        }
    }

    /// Sample the pulse count
    ///
    /// Returns `true` when a window of `timeout_ms` expired with no change
    /// in `count`. On a stall the baseline count is zeroed; otherwise it
    /// is refreshed to `count`.
    pub fn check(&mut self, now: u32, count: u32, timeout_ms: u16) -> bool {
        match self.window.poll(now, count, u32::from(timeout_ms)) {
            Some(last_count) if last_count == count => {
                self.window.rearm(now, 0);
                true
            }
            Some(_) => {
                self.window.rearm(now, count);
                false
            }
            None => false,
        }
    }

    /// Start a fresh window on the next check
    ///
    /// Called when the motor is energized so a baseline left over from an
    /// earlier run cannot trip the detector on the first tick.
    pub fn restart(&mut self) {
        self.window.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: u16 = 500;

    #[test]
    fn test_stall_after_window() {
        let mut detector = StallDetector::new();
        assert!(!detector.check(0, 40, TIMEOUT));
        assert!(!detector.check(499, 40, TIMEOUT));
        assert!(detector.check(500, 40, TIMEOUT));
    }

    #[test]
    fn test_progress_refreshes_baseline() {
        let mut detector = StallDetector::new();
        detector.check(0, 40, TIMEOUT);
        assert!(!detector.check(500, 41, TIMEOUT));
        assert!(!detector.check(999, 41, TIMEOUT));
        assert!(detector.check(1000, 41, TIMEOUT));
    }

    #[test]
    fn test_baseline_zeroed_after_stall() {
        let mut detector = StallDetector::new();
        detector.check(0, 40, TIMEOUT);
        assert!(detector.check(500, 40, TIMEOUT));
        // Baseline is now 0, so an unchanged non-zero count is not a stall
        assert!(!detector.check(1000, 40, TIMEOUT));
        assert!(detector.check(1500, 40, TIMEOUT));
    }

    #[test]
    fn test_restart_discards_stale_baseline() {
        let mut detector = StallDetector::new();
        detector.check(0, 40, TIMEOUT);
        detector.restart();
        assert!(!detector.check(10_000, 40, TIMEOUT));
        assert!(detector.check(10_500, 40, TIMEOUT));
    }
}
