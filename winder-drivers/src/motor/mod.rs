//! Motor drive implementations
//!
//! - PWM: single MOSFET gate driven from an `embedded-hal` PWM channel

pub mod pwm;

pub use pwm::PwmDrive;
