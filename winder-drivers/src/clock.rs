//! Interrupt-fed millisecond clock
//!
//! For boards without a free-running timer the core can read: a 1 kHz
//! timer interrupt calls [`TickClock::tick`] and the control loop reads
//! it through [`MonotonicClock`].
//!
//! ```ignore
//! static CLOCK: TickClock = TickClock::new();
//!
//! #[exception]
//! fn SysTick() {
//!     CLOCK.tick();
//! }
//! ```

use portable_atomic::{AtomicU32, Ordering};
use winder_hal::MonotonicClock;

/// Millisecond counter advanced from a timer interrupt
#[derive(Debug, Default)]
pub struct TickClock {
    ms: AtomicU32,
}

impl TickClock {
    /// Create a clock at zero
    pub const fn new() -> Self {
        Self {
            ms: AtomicU32::new(0),
        }
    }

    /// Advance by one millisecond, wrapping at `u32::MAX`
    #[inline]
    pub fn tick(&self) {
        self.ms.fetch_add(1, Ordering::Relaxed);
    }

    /// Advance by `ms` milliseconds (coarser timer periods)
    pub fn advance(&self, ms: u32) {
        self.ms.fetch_add(ms, Ordering::Relaxed);
    }
}

impl MonotonicClock for TickClock {
    fn now_ms(&self) -> u32 {
        self.ms.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_accumulate() {
        let clock = TickClock::new();
        assert_eq!(clock.now_ms(), 0);
        clock.tick();
        clock.tick();
        clock.advance(10);
        assert_eq!(clock.now_ms(), 12);
    }

    #[test]
    fn test_wraps() {
        let clock = TickClock::new();
        clock.advance(u32::MAX);
        clock.tick();
        assert_eq!(clock.now_ms(), 0);
    }
}
