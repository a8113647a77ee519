//! Angle type for actuator targets

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Exclusive upper bound for angles, in degrees
pub const FULL_TURN_DEG: u16 = 360;

/// An angle in whole degrees, always in `0..360`
///
/// There is no negative angle: "no target" is expressed with `Option<Angle>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Angle(u16);

impl Angle {
    /// Zero degrees
    pub const ZERO: Self = Self(0);

    /// Checked constructor
    pub const fn new(degrees: u16) -> Option<Self> {
        if degrees < FULL_TURN_DEG {
            Some(Self(degrees))
        } else {
            None
        }
    }

    /// Constructor for constants
    ///
    /// Panics if `degrees` is 360 or more.
    pub const fn degrees(degrees: u16) -> Self {
        assert!(degrees < FULL_TURN_DEG, "angle out of range");
        Self(degrees)
    }

    /// Value in degrees
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Limit to `0..=max_deg`
    pub const fn clamp_to(self, max_deg: u16) -> Self {
        if self.0 > max_deg {
            Self(max_deg)
        } else {
            self
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
