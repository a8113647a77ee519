//! Pulse-width output abstractions
//!
//! Hobby servos are driven by a fixed-period pulse train where the pulse
//! width encodes the commanded position. Chip HALs expose one channel per
//! servo through [`PwmOutput`]; the angle to pulse mapping lives in the
//! servo driver.

/// A single PWM channel with microsecond pulse resolution
pub trait PwmOutput {
    /// Error type for PWM operations
    type Error;

    /// Set the high time of each period in microseconds
    ///
    /// Values larger than the period are an error for implementations
    /// that cannot represent them.
    fn set_pulse_us(&mut self, pulse_us: u16) -> Result<(), Self::Error>;

    /// Length of one PWM period in microseconds
    fn period_us(&self) -> u32;
}

/// Errors common to PWM implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Requested pulse is longer than the period
    PulseTooLong,
}

/// Check a pulse against a period, for implementations without a wider check
pub fn check_pulse(pulse_us: u16, period_us: u32) -> Result<(), PwmError> {
    if u32::from(pulse_us) > period_us {
        Err(PwmError::PulseTooLong)
    } else {
        Ok(())
    }
}
