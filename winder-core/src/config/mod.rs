//! Configuration types
//!
//! Gear geometry and timing constants for the winder. Stock values come
//! from [`WinderConfig::default`]; boards with a different drum or sensor
//! override individual fields.

pub mod types;

pub use types::*;
