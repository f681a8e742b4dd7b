//! Motor drive output abstraction
//!
//! The power stage is a single PWM-gated MOSFET. The core speaks in raw
//! 8-bit duty values where `0` is off and `255` is full power.

/// Single-channel duty cycle output
pub trait DutyCycleOutput {
    /// Apply a duty cycle (0 = off, 255 = fully on)
    fn set_duty(&mut self, duty: u8);

    /// Turn the output fully off
    fn off(&mut self) {
        self.set_duty(0);
    }
}

impl<T: DutyCycleOutput + ?Sized> DutyCycleOutput for &mut T {
    fn set_duty(&mut self, duty: u8) {
        (**self).set_duty(duty);
    }
}
