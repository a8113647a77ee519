//! Hobby servo driver
//!
//! Maps an angle to a pulse width linearly between the configured minimum
//! and maximum pulse, using integer arithmetic that truncates the same way
//! common microcontroller servo libraries do. Angles past the end of travel
//! are clamped.
//!
//! # Usage
//!
//! ```ignore
//! let mut servo = Servo::new(pwm, ServoConfig::DEFAULT);
//! servo.set_angle(Angle::degrees(90))?; // 1472 µs
//! ```

use chromasort_core::config::ServoConfig;
use chromasort_core::motion::Angle;
use chromasort_core::traits::{ActuatorError, AngleActuator};
use chromasort_hal::PwmOutput;

/// Pulse width for `angle` under `config`, after clamping to travel
pub fn pulse_for(angle: Angle, config: &ServoConfig) -> u16 {
    let deg = u32::from(angle.clamp_to(config.max_angle_deg).get());
    let span = u32::from(config.max_pulse_us.saturating_sub(config.min_pulse_us));
    let offset = deg * span / u32::from(config.max_angle_deg.max(1));
    config.min_pulse_us + offset as u16
}

/// Servo on one PWM channel
pub struct Servo<P> {
    pwm: P,
    config: ServoConfig,
    last: Option<Angle>,
}

impl<P: PwmOutput> Servo<P> {
    /// Create a servo driver; nothing is written until the first angle
    pub fn new(pwm: P, config: ServoConfig) -> Self {
        Self {
            pwm,
            config,
            last: None,
        }
    }

    pub fn config(&self) -> &ServoConfig {
        &self.config
    }

    /// Pulse this servo would be driven with for `angle`
    pub fn pulse_for(&self, angle: Angle) -> u16 {
        pulse_for(angle, &self.config)
    }

    /// Give back the PWM channel
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: PwmOutput> AngleActuator for Servo<P> {
    fn set_angle(&mut self, angle: Angle) -> Result<(), ActuatorError> {
        let clamped = angle.clamp_to(self.config.max_angle_deg);
        let pulse = pulse_for(clamped, &self.config);
        if u32::from(pulse) > self.pwm.period_us() {
            return Err(ActuatorError::InvalidPulse);
        }
        self.pwm
            .set_pulse_us(pulse)
            .map_err(|_| ActuatorError::WriteFailed)?;
        self.last = Some(clamped);
        Ok(())
    }

    fn last_commanded(&self) -> Option<Angle> {
        self.last
    }
}
