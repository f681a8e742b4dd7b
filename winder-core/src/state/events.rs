//! Events reported by the cycle dispatcher

/// Forced stops made by the control core during a cycle
///
/// These are notifications, not errors: the motor has already been
/// stopped when the event is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// No encoder pulses within the stall timeout while energized
    Stalled,
    /// Winding target reached; rotation count snapped to the target
    TargetReached,
}
