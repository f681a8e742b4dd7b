//! Settings store implementations
//!
//! - Memory: RAM-backed map, for boards without EEPROM and for host tests

pub mod memory;

pub use memory::MemoryStore;
