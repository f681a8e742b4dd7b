//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in winder-hal:
//!
//! - Motor drive over any `embedded-hal` PWM channel
//! - Millisecond clock fed from a periodic timer interrupt
//! - RAM-backed settings store

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod motor;
pub mod store;

pub use clock::TickClock;
pub use motor::PwmDrive;
pub use store::MemoryStore;
