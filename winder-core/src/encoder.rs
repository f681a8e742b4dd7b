//! Encoder pulse counter shared with the edge interrupt
//!
//! The interrupt handler and the control loop share exactly one
//! [`PulseCounter`]. The handler only calls [`PulseCounter::on_edge`]; the
//! control loop owns every other operation. All fields are atomics so a
//! 32-bit count can never be observed half-written, even on 8/16-bit or
//! thumbv6m targets (enable the `critical-section` feature there).
//!
//! ```ignore
//! static COUNTER: PulseCounter = PulseCounter::new();
//!
//! #[interrupt]
//! fn IO_IRQ_BANK0() {
//!     COUNTER.on_edge();
//! }
//!
//! let winder = Winder::new(config, drive, clock, store, &COUNTER)?;
//! ```

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// Interrupt-safe rotation pulse counter
#[derive(Debug)]
pub struct PulseCounter {
    /// Pulses since the last reset, wrapping at `u32::MAX`
    count: AtomicU32,
    /// Shaft judged stationary while the motor is off
    no_spin: AtomicBool,
    /// Edge handler is live
    attached: AtomicBool,
}

impl Default for PulseCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseCounter {
    /// Create a detached counter at zero
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
            no_spin: AtomicBool::new(false),
            attached: AtomicBool::new(false),
        }
    }

    /// Edge interrupt entry point
    ///
    /// Counts one pulse unless the counter is detached or the shaft has
    /// been judged stationary.
    #[inline]
    pub fn on_edge(&self) {
        if self.attached.load(Ordering::Relaxed) && self.is_rotating() {
            self.count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Current pulse count
    #[inline]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Check if edges are currently counted
    #[inline]
    pub fn is_rotating(&self) -> bool {
        !self.no_spin.load(Ordering::Relaxed)
    }

    /// Check if the edge handler is live
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Relaxed)
    }

    pub(crate) fn set_count(&self, count: u32) {
        self.count.store(count, Ordering::Relaxed);
    }

    pub(crate) fn set_no_spin(&self, no_spin: bool) {
        self.no_spin.store(no_spin, Ordering::Relaxed);
    }

    pub(crate) fn attach(&self) {
        self.attached.store(true, Ordering::Relaxed);
    }

    pub(crate) fn detach(&self) {
        self.attached.store(false, Ordering::Relaxed);
    }
}
