//! Motor state and profile definitions

use winder_hal::StoreError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Electrical state of the motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorState {
    /// Drive at zero duty
    #[default]
    Off,
    /// Drive energized
    On,
}

impl MotorState {
    /// State for a raw drive speed
    pub fn from_speed(speed: u8) -> Self {
        if speed == 0 {
            MotorState::Off
        } else {
            MotorState::On
        }
    }

    /// Check if the motor is energized
    pub fn is_on(self) -> bool {
        self == MotorState::On
    }
}

/// Winding automation profile
///
/// Ordered from least to most automatic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Profile {
    /// No automatic speed or stop control
    #[default]
    Manual = 0,
    /// Automatic deceleration and stop at the target
    Semi = 1,
    /// Automatic acceleration, deceleration and stop
    Auto = 2,
}

impl Profile {
    /// Next more automatic profile, staying at `Auto`
    pub fn next(self) -> Self {
        match self {
            Profile::Manual => Profile::Semi,
            Profile::Semi | Profile::Auto => Profile::Auto,
        }
    }

    /// Next less automatic profile, staying at `Manual`
    pub fn prev(self) -> Self {
        match self {
            Profile::Auto => Profile::Semi,
            Profile::Semi | Profile::Manual => Profile::Manual,
        }
    }

    /// Check if the ramp controller decelerates and stops at the target
    pub fn stops_at_target(self) -> bool {
        self >= Profile::Semi
    }
}

impl From<Profile> for u16 {
    fn from(profile: Profile) -> Self {
        profile as u16
    }
}

impl TryFrom<u16> for Profile {
    type Error = StoreError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Profile::Manual),
            1 => Ok(Profile::Semi),
            2 => Ok(Profile::Auto),
            _ => Err(StoreError::Invalid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_speed() {
        assert_eq!(MotorState::from_speed(0), MotorState::Off);
        assert_eq!(MotorState::from_speed(1), MotorState::On);
        assert!(MotorState::from_speed(255).is_on());
    }

    #[test]
    fn test_profile_steps_clamp() {
        assert_eq!(Profile::Manual.prev(), Profile::Manual);
        assert_eq!(Profile::Manual.next(), Profile::Semi);
        assert_eq!(Profile::Semi.next(), Profile::Auto);
        assert_eq!(Profile::Auto.next(), Profile::Auto);
        assert_eq!(Profile::Auto.prev(), Profile::Semi);
    }

    #[test]
    fn test_profile_ordering() {
        assert!(Profile::Manual < Profile::Semi);
        assert!(Profile::Semi < Profile::Auto);
        assert!(!Profile::Manual.stops_at_target());
        assert!(Profile::Semi.stops_at_target());
        assert!(Profile::Auto.stops_at_target());
    }

    #[test]
    fn test_profile_word_conversion() {
        for profile in [Profile::Manual, Profile::Semi, Profile::Auto] {
            assert_eq!(Profile::try_from(u16::from(profile)), Ok(profile));
        }
        assert_eq!(Profile::try_from(3), Err(StoreError::Invalid));
        assert_eq!(Profile::try_from(0xFFFF), Err(StoreError::Invalid));
    }
}
