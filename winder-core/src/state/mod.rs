//! Motor state and automation profile
//!
//! The motor state is derived from the drive speed alone; there is no
//! stored state variable and no entry/exit action table.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{MotorState, Profile};
