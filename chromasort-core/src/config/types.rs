//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::motion::Angle;

/// Hold times between sequence steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequenceTiming {
    /// After the positioning servo returns home
    pub home_hold_ms: u32,
    /// After the positioning servo reaches the bin angle
    pub position_hold_ms: u32,
    /// While the drop gate is open
    pub drop_hold_ms: u32,
}

impl SequenceTiming {
    pub const DEFAULT: Self = Self {
        home_hold_ms: 500,
        position_hold_ms: 500,
        drop_hold_ms: 1000,
    };

    /// Sum of all holds in one sequence
    pub const fn total_ms(&self) -> u32 {
        self.home_hold_ms + self.position_hold_ms + self.drop_hold_ms
    }
}

impl Default for SequenceTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Drop gate positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropConfig {
    pub open: Angle,
    pub closed: Angle,
}

impl DropConfig {
    pub const DEFAULT: Self = Self {
        open: Angle::degrees(30),
        closed: Angle::degrees(80),
    };
}

impl Default for DropConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything the sort sequence needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionConfig {
    /// Positioning servo home angle
    pub home: Angle,
    pub drop: DropConfig,
    pub timing: SequenceTiming,
}

impl MotionConfig {
    pub const DEFAULT: Self = Self {
        home: Angle::ZERO,
        drop: DropConfig::DEFAULT,
        timing: SequenceTiming::DEFAULT,
    };
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Hobby servo pulse mapping
///
/// Defaults match the common 544–2400 µs convention over 0–180°.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoConfig {
    /// Pulse width at 0°
    pub min_pulse_us: u16,
    /// Pulse width at `max_angle_deg`
    pub max_pulse_us: u16,
    /// End of travel
    pub max_angle_deg: u16,
    /// PWM period
    pub period_us: u32,
}

impl ServoConfig {
    pub const DEFAULT: Self = Self {
        min_pulse_us: 544,
        max_pulse_us: 2400,
        max_angle_deg: 180,
        period_us: 20_000,
    };

    /// Check the mapping is usable
    pub const fn is_valid(&self) -> bool {
        self.min_pulse_us < self.max_pulse_us
            && self.max_angle_deg > 0
            && self.max_angle_deg < crate::motion::FULL_TURN_DEG
            && (self.max_pulse_us as u32) <= self.period_us
    }
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Character LCD geometry and bus address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// 7-bit I2C address of the PCF8574 backpack
    pub i2c_address: u8,
    pub columns: u8,
    pub rows: u8,
}

impl DisplayConfig {
    pub const DEFAULT: Self = Self {
        i2c_address: 0x27,
        columns: 16,
        rows: 2,
    };
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Command link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    pub baudrate: u32,
}

impl LinkConfig {
    pub const DEFAULT: Self = Self { baudrate: 9600 };
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete rig configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RigConfig {
    pub motion: MotionConfig,
    pub positioning_servo: ServoConfig,
    pub drop_servo: ServoConfig,
    pub display: DisplayConfig,
    pub link: LinkConfig,
}

impl RigConfig {
    pub const DEFAULT: Self = Self {
        motion: MotionConfig::DEFAULT,
        positioning_servo: ServoConfig::DEFAULT,
        drop_servo: ServoConfig::DEFAULT,
        display: DisplayConfig::DEFAULT,
        link: LinkConfig::DEFAULT,
    };
}

impl Default for RigConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = SequenceTiming::default();
        assert_eq!(timing.home_hold_ms, 500);
        assert_eq!(timing.position_hold_ms, 500);
        assert_eq!(timing.drop_hold_ms, 1000);
        assert_eq!(timing.total_ms(), 2000);
    }

    #[test]
    fn test_default_drop() {
        let drop = DropConfig::default();
        assert_eq!(drop.open.get(), 30);
        assert_eq!(drop.closed.get(), 80);
    }

    #[test]
    fn test_default_rig() {
        let cfg = RigConfig::default();
        assert_eq!(cfg, RigConfig::DEFAULT);
        assert_eq!(cfg.motion.home, Angle::ZERO);
        assert_eq!(cfg.display.i2c_address, 0x27);
        assert_eq!(cfg.display.columns, 16);
        assert_eq!(cfg.display.rows, 2);
        assert_eq!(cfg.link.baudrate, 9600);
    }

    #[test]
    fn test_servo_validity() {
        assert!(ServoConfig::DEFAULT.is_valid());
        assert!(RigConfig::DEFAULT.positioning_servo.is_valid());
        assert!(RigConfig::DEFAULT.drop_servo.is_valid());

        let inverted = ServoConfig {
            min_pulse_us: 2400,
            max_pulse_us: 544,
            ..ServoConfig::DEFAULT
        };
        assert!(!inverted.is_valid());

        let too_long = ServoConfig {
            period_us: 2000,
            ..ServoConfig::DEFAULT
        };
        assert!(!too_long.is_valid());
    }
}
