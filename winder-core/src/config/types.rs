//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor, encoder and timing parameters
///
/// Speeds are raw 8-bit PWM duty values. Counts are encoder pulses and
/// all durations are in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WinderConfig {
    /// Lowest duty that keeps the motor turning under load
    pub min_speed: u8,
    /// Highest duty the power stage accepts
    pub max_speed: u8,
    /// Duty change per speed step
    pub step_speed: u8,
    /// Encoder pulses per drum revolution ("evolution")
    pub evolution: u32,
    /// Pulses before the target at which the motor is cut
    pub evolution_offset: u32,
    /// No-spin sampling window while the motor is off
    pub spin_timeout_ms: u32,
    /// Interval between automatic speed steps while ramping up
    pub spin_up_timeout_ms: u32,
    /// Interval between automatic speed steps while ramping down
    pub spin_down_interval_ms: u32,
    /// Shortest non-zero stall timeout
    pub min_stall_ms: u16,
    /// Longest stall timeout
    pub max_stall_ms: u16,
    /// Stall timeout adjustment step
    pub step_stall_ms: u16,
}

impl Default for WinderConfig {
    fn default() -> Self {
        Self {
            min_speed: 50,
            max_speed: 255,
            step_speed: 5,
            evolution: 100,
            evolution_offset: 10,
            spin_timeout_ms: 1000,
            spin_up_timeout_ms: 100,
            spin_down_interval_ms: 20,
            min_stall_ms: 500,
            max_stall_ms: 5000,
            step_stall_ms: 100,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A step size is zero
    ZeroStep,
    /// `min_speed` must be above `step_speed` and not above `max_speed`
    SpeedRange,
    /// `evolution` must be non-zero and larger than `evolution_offset`
    EvolutionRange,
    /// `min_stall_ms` must be non-zero and not above `max_stall_ms`
    StallRange,
    /// A sampling window is zero
    ZeroTimeout,
}

impl WinderConfig {
    /// Check the relationships the control logic relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_speed == 0 || self.step_stall_ms == 0 {
            return Err(ConfigError::ZeroStep);
        }
        // The percentage scale starts one step below min_speed
        if self.min_speed <= self.step_speed || self.min_speed > self.max_speed {
            return Err(ConfigError::SpeedRange);
        }
        if self.evolution == 0 || self.evolution_offset >= self.evolution {
            return Err(ConfigError::EvolutionRange);
        }
        if self.min_stall_ms == 0 || self.min_stall_ms > self.max_stall_ms {
            return Err(ConfigError::StallRange);
        }
        if self.spin_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Pulse count at which a target of `evolutions` is reached
    pub fn target_count(&self, evolutions: u32) -> u32 {
        evolutions.saturating_mul(self.evolution)
    }
}
