//! Motion monitoring
//!
//! Two "no progress over a window" checks share the same sampling
//! discipline:
//!
//! - [`NoSpinDetector`]: motor off and shaft still. Expected; used to stop
//!   counting encoder noise.
//! - [`StallDetector`]: motor on and shaft still. A fault; the motor is cut.

pub mod spin;
pub mod stall;
pub mod window;

pub use spin::NoSpinDetector;
pub use stall::StallDetector;
pub use window::SampleWindow;
