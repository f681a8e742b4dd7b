//! Count-over-time sampling window

use crate::period::elapsed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sample {
    tick: u32,
    count: u32,
}

/// Baseline sample of the pulse count, refreshed on a fixed cadence
///
/// The baseline is taken on the first poll after construction or
/// [`disarm`](Self::disarm), independent of how often the caller polls.
#[derive(Debug, Clone, Default)]
pub struct SampleWindow {
    baseline: Option<Sample>,
}

impl SampleWindow {
    /// Create an unarmed window
    pub const fn new() -> Self {
        Self { baseline: None }
    }

    /// Check whether `period` has passed since the baseline
    ///
    /// Returns the baseline count once the window has expired. The
    /// baseline is left untouched; the caller re-arms it with
    /// [`rearm`](Self::rearm).
    pub fn poll(&mut self, now: u32, count: u32, period: u32) -> Option<u32> {
        let baseline = *self.baseline.get_or_insert(Sample { tick: now, count });
        if elapsed(baseline.tick, now) >= period {
            Some(baseline.count)
        } else {
            None
        }
    }

    /// Start a new window at `now` with the given baseline count
    pub fn rearm(&mut self, now: u32, count: u32) {
        self.baseline = Some(Sample { tick: now, count });
    }

    /// Drop the baseline; the next poll starts a fresh window
    pub fn disarm(&mut self) {
        self.baseline = None;
    }
}
