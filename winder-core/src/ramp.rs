//! Speed ramping toward a winding target
//!
//! The ramp controller never touches the drive itself. Each call looks at
//! the remaining pulse count and returns the [`RampAction`] the dispatcher
//! should apply, so the speed bookkeeping stays in one place.
//!
//! ```text
//!  remaining pulses   spin_up (Auto)         spin_down (Semi, Auto)
//!  > 2·evolution      +1 step per interval   -
//!  ≤ 2·evolution      -                      -1 step per interval
//!  ≤ evolution        -                      hold min_speed
//!  ≤ offset           -                      stop, snap count to target
//! ```

use crate::config::WinderConfig;
use crate::period::elapsed;

/// Speed change requested by the ramp controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampAction {
    /// Cut the drive and snap the count to the target
    Stop,
    /// Final approach: pin the speed to `min_speed`
    HoldMinimum,
    /// Deceleration zone: one step slower
    StepDown,
    /// Acceleration zone: one step faster
    StepUp,
}

/// Cadence bookkeeping for automatic speed steps
///
/// Each direction keeps its own last-step timestamp, taken on the first
/// call in that direction.
#[derive(Debug, Clone, Default)]
pub struct RampController {
    last_step_up: Option<u32>,
    last_step_down: Option<u32>,
}

impl RampController {
    /// Create a new ramp controller
    pub const fn new() -> Self {
        Self {
            last_step_up: None,
            last_step_down: None,
        }
    }

    /// Deceleration and stop near the target
    ///
    /// `remaining` is in pulses, `speed` is the current raw duty.
    pub fn spin_down(
        &mut self,
        config: &WinderConfig,
        now: u32,
        remaining: u32,
        speed: u8,
    ) -> Option<RampAction> {
        let last = *self.last_step_down.get_or_insert(now);

        if remaining <= config.evolution_offset {
            Some(RampAction::Stop)
        } else if remaining <= config.evolution {
            Some(RampAction::HoldMinimum)
        } else if remaining <= config.evolution.saturating_mul(2)
            && elapsed(last, now) >= config.spin_down_interval_ms
        {
            self.last_step_down = Some(now);
            // A step that would land at or below min_speed would stop the motor
            if speed.saturating_sub(config.step_speed) > config.min_speed {
                Some(RampAction::StepDown)
            } else {
                None
            }
        } else {
            None
        }
    }

    /// Acceleration at the start of an automatic run
    pub fn spin_up(&mut self, config: &WinderConfig, now: u32, remaining: u32) -> Option<RampAction> {
        let last = *self.last_step_up.get_or_insert(now);

        if remaining > config.evolution.saturating_mul(2)
            && elapsed(last, now) >= config.spin_up_timeout_ms
        {
            self.last_step_up = Some(now);
            Some(RampAction::StepUp)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WinderConfig {
        WinderConfig::default()
    }

    #[test]
    fn test_stop_inside_offset() {
        let mut ramp = RampController::new();
        assert_eq!(ramp.spin_down(&config(), 0, 10, 120), Some(RampAction::Stop));
        assert_eq!(ramp.spin_down(&config(), 0, 0, 120), Some(RampAction::Stop));
    }

    #[test]
    fn test_hold_minimum_on_final_approach() {
        let mut ramp = RampController::new();
        assert_eq!(
            ramp.spin_down(&config(), 0, 11, 200),
            Some(RampAction::HoldMinimum)
        );
        assert_eq!(
            ramp.spin_down(&config(), 0, 100, 200),
            Some(RampAction::HoldMinimum)
        );
    }

    #[test]
    fn test_step_down_on_cadence() {
        let cfg = config();
        let mut ramp = RampController::new();
        // First call only takes the timestamp
        assert_eq!(ramp.spin_down(&cfg, 1000, 150, 200), None);
        assert_eq!(ramp.spin_down(&cfg, 1019, 150, 200), None);
        assert_eq!(
            ramp.spin_down(&cfg, 1020, 150, 200),
            Some(RampAction::StepDown)
        );
        assert_eq!(ramp.spin_down(&cfg, 1030, 150, 195), None);
        assert_eq!(
            ramp.spin_down(&cfg, 1040, 150, 195),
            Some(RampAction::StepDown)
        );
    }

    #[test]
    fn test_no_step_down_near_minimum() {
        let cfg = config();
        let mut ramp = RampController::new();
        ramp.spin_down(&cfg, 0, 150, 55);
        // 55 - 5 = 50 is not above min_speed
        assert_eq!(ramp.spin_down(&cfg, 20, 150, 55), None);
        assert_eq!(ramp.spin_down(&cfg, 40, 150, 56), Some(RampAction::StepDown));
    }

    #[test]
    fn test_spin_down_idle_far_from_target() {
        let mut ramp = RampController::new();
        ramp.spin_down(&config(), 0, 201, 200);
        assert_eq!(ramp.spin_down(&config(), 100, 201, 200), None);
    }

    #[test]
    fn test_spin_up_on_cadence() {
        let cfg = config();
        let mut ramp = RampController::new();
        assert_eq!(ramp.spin_up(&cfg, 0, 1000), None);
        assert_eq!(ramp.spin_up(&cfg, 99, 1000), None);
        assert_eq!(ramp.spin_up(&cfg, 100, 1000), Some(RampAction::StepUp));
        assert_eq!(ramp.spin_up(&cfg, 150, 1000), None);
        assert_eq!(ramp.spin_up(&cfg, 200, 1000), Some(RampAction::StepUp));
    }

    #[test]
    fn test_spin_up_stops_in_deceleration_zone() {
        let cfg = config();
        let mut ramp = RampController::new();
        ramp.spin_up(&cfg, 0, 1000);
        assert_eq!(ramp.spin_up(&cfg, 500, 200), None);
        assert_eq!(ramp.spin_up(&cfg, 600, 201), Some(RampAction::StepUp));
    }
}
