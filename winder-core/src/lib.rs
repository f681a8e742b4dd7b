//! Board-agnostic motor control core for the yarn winder
//!
//! This crate contains all control logic that does not depend on
//! specific hardware implementations:
//!
//! - Wraparound-safe period arithmetic
//! - Interrupt-shared encoder pulse counter
//! - No-spin and stall detection
//! - Profile-driven speed ramping toward a winding target
//! - The periodic cycle dispatcher ([`Winder`])
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod encoder;
pub mod period;
pub mod ramp;
pub mod safety;
pub mod state;
pub mod winder;

#[cfg(test)]
mod mock;

pub use config::{ConfigError, WinderConfig};
pub use encoder::PulseCounter;
pub use state::{Event, MotorState, Profile};
pub use winder::Winder;
