//! Yarn winder Hardware Abstraction Layer
//!
//! This crate defines the traits the motor core uses to reach the outside
//! world. Chip-specific code (or the adapters in `winder-drivers`) implements
//! them, so the same control logic runs on any board and on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  winder-core (cycle, detectors, ramp)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  winder-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ winder-drivers│       │  board glue   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`pwm::DutyCycleOutput`] - Motor drive duty cycle
//! - [`clock::MonotonicClock`] - Wrapping millisecond clock
//! - [`store::SettingsStore`] - Persistent key/value settings

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod pwm;
pub mod store;

// Re-export key traits at crate root for convenience
pub use clock::MonotonicClock;
pub use pwm::DutyCycleOutput;
pub use store::{NoStore, SettingsStore, StorageKey, StoreError};
