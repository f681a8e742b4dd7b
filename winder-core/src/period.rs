//! Elapsed time over a wrapping millisecond clock

/// Milliseconds between two clock samples
///
/// `now` is taken after `last`. If `now` is smaller the clock has wrapped
/// once in between and the result is `(u32::MAX - last) + now`. More than
/// one wrap between samples is not detected; at 1 kHz the counter takes
/// about 49 days to wrap.
pub fn elapsed(last: u32, now: u32) -> u32 {
    if last > now {
        (u32::MAX - last) + now
    } else {
        now - last
    }
}
