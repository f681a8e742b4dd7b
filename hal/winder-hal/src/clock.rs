//! Monotonic clock abstraction
//!
//! The control core only ever looks at differences between two samples,
//! so a free-running 32-bit millisecond counter is enough. It is expected
//! to wrap back to zero after `u32::MAX`.

/// Free-running millisecond clock
pub trait MonotonicClock {
    /// Milliseconds since an arbitrary epoch, wrapping at `u32::MAX`
    fn now_ms(&self) -> u32;
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
