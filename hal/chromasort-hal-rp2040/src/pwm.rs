//! Servo PWM on RP2040 PWM slices
//!
//! Each of the eight PWM slices drives two GPIOs (channel A on the even
//! pin, channel B on the odd one). A servo channel runs the slice from the
//! 125 MHz system clock divided down to a 1 MHz tick, so compare values are
//! pulse widths in microseconds and `top` sets the period.

use embassy_rp::pwm::{Config, Pwm};

use chromasort_hal::pwm::{check_pulse, PwmError};
use chromasort_hal::PwmOutput;

/// System clock divider for a 1 µs tick at 125 MHz
const TICK_DIVIDER: u8 = 125;

/// Longest period the 16-bit counter can count at 1 µs per tick
const MAX_PERIOD_US: u32 = 1 << 16;

/// PWM channel within a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmChannel {
    A,
    B,
}

/// PWM slice and channel driven by a GPIO
pub const fn gpio_to_pwm(gpio: u8) -> (u8, PwmChannel) {
    let slice = (gpio / 2) % 8;
    let channel = if gpio % 2 == 0 {
        PwmChannel::A
    } else {
        PwmChannel::B
    };
    (slice, channel)
}

/// One servo output on a PWM slice channel
pub struct RpServoPwm<'d> {
    pwm: Pwm<'d>,
    config: Config,
    channel: PwmChannel,
    period_us: u32,
}

impl<'d> RpServoPwm<'d> {
    /// Take over `pwm` and configure its slice for `period_us`
    ///
    /// Periods longer than the 16-bit counter allows are cut to 65.536 ms.
    /// The output stays low until the first pulse is set.
    pub fn new(mut pwm: Pwm<'d>, channel: PwmChannel, period_us: u32) -> Self {
        let period_us = period_us.clamp(1, MAX_PERIOD_US);
        let mut config = Config::default();
        config.divider = TICK_DIVIDER.into();
        config.top = (period_us - 1) as u16;
        config.compare_a = 0;
        config.compare_b = 0;
        pwm.set_config(&config);
        Self {
            pwm,
            config,
            channel,
            period_us,
        }
    }
}

impl PwmOutput for RpServoPwm<'_> {
    type Error = PwmError;

    fn set_pulse_us(&mut self, pulse_us: u16) -> Result<(), PwmError> {
        check_pulse(pulse_us, self.period_us)?;
        match self.channel {
            PwmChannel::A => self.config.compare_a = pulse_us,
            PwmChannel::B => self.config.compare_b = pulse_us,
        }
        self.pwm.set_config(&self.config);
        Ok(())
    }

    fn period_us(&self) -> u32 {
        self.period_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_to_pwm() {
        assert_eq!(gpio_to_pwm(0), (0, PwmChannel::A));
        assert_eq!(gpio_to_pwm(8), (4, PwmChannel::A));
        assert_eq!(gpio_to_pwm(11), (5, PwmChannel::B));
        assert_eq!(gpio_to_pwm(16), (0, PwmChannel::A));
        assert_eq!(gpio_to_pwm(29), (6, PwmChannel::B));
    }
}
