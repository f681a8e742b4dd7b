//! PWM motor drive
//!
//! Adapts any `embedded-hal` 1.0 PWM channel to the 8-bit duty scale used
//! by the control core. The raw duty `0..=255` is scaled onto
//! `0..=max_duty_cycle()` of the channel, so the PWM top value (and thus
//! the switching frequency) can be chosen freely by the board.
//!
//! ```ignore
//! let mut drive = PwmDrive::new(pwm_channel);
//! drive.set_duty(128); // ~50%
//! drive.off();
//! ```

use embedded_hal::pwm::SetDutyCycle;
use winder_hal::DutyCycleOutput;

/// Motor drive over an `embedded-hal` PWM channel
#[derive(Debug)]
pub struct PwmDrive<P> {
    pwm: P,
    /// Last duty written (0-255)
    duty: u8,
    /// Writes rejected by the channel
    errors: u32,
}

impl<P: SetDutyCycle> PwmDrive<P> {
    /// Wrap a PWM channel; the output starts off
    pub fn new(mut pwm: P) -> Self {
        let errors = u32::from(pwm.set_duty_cycle_fully_off().is_err());
        Self {
            pwm,
            duty: 0,
            errors,
        }
    }

    /// Last duty written
    pub fn duty(&self) -> u8 {
        self.duty
    }

    /// Number of duty writes the channel rejected
    pub fn error_count(&self) -> u32 {
        self.errors
    }

    /// Get access to the underlying channel
    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    /// Release the underlying channel
    pub fn free(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> DutyCycleOutput for PwmDrive<P> {
    fn set_duty(&mut self, duty: u8) {
        self.duty = duty;

        let result = match duty {
            0 => self.pwm.set_duty_cycle_fully_off(),
            u8::MAX => self.pwm.set_duty_cycle_fully_on(),
            _ => self
                .pwm
                .set_duty_cycle_fraction(u16::from(duty), u16::from(u8::MAX)),
        };

        if result.is_err() {
            self.errors = self.errors.saturating_add(1);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use embedded_hal::pwm::{ErrorKind, ErrorType};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct MockPwmError;

    impl embedded_hal::pwm::Error for MockPwmError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// PWM channel that stores the compare value
    pub(crate) struct MockPwm {
        pub(crate) max: u16,
        pub(crate) duty: u16,
        pub(crate) fail: bool,
    }

    impl MockPwm {
        pub(crate) fn new(max: u16) -> Self {
            Self {
                max,
                duty: 0xFFFF,
                fail: false,
            }
        }
    }

    impl ErrorType for MockPwm {
        type Error = MockPwmError;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockPwmError);
            }
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_starts_off() {
        let drive = PwmDrive::new(MockPwm::new(1000));
        assert_eq!(drive.pwm().duty, 0);
        assert_eq!(drive.duty(), 0);
    }

    #[test]
    fn test_duty_scaling() {
        let mut drive = PwmDrive::new(MockPwm::new(1000));

        drive.set_duty(255);
        assert_eq!(drive.pwm().duty, 1000);

        // 128 * 1000 / 255
        drive.set_duty(128);
        assert_eq!(drive.pwm().duty, 501);
        assert_eq!(drive.duty(), 128);

        drive.set_duty(50);
        assert_eq!(drive.pwm().duty, 196);

        drive.off();
        assert_eq!(drive.pwm().duty, 0);
    }

    #[test]
    fn test_rejected_writes_counted() {
        let mut pwm = MockPwm::new(255);
        pwm.fail = true;
        let mut drive = PwmDrive::new(pwm);
        assert_eq!(drive.error_count(), 1);

        drive.set_duty(100);
        assert_eq!(drive.error_count(), 2);
        assert_eq!(drive.duty(), 100);
    }

    #[test]
    fn test_free_returns_channel() {
        let mut drive = PwmDrive::new(MockPwm::new(400));
        drive.set_duty(255);
        let pwm = drive.free();
        assert_eq!(pwm.duty, 400);
    }
}
