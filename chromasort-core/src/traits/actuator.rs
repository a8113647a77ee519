//! Angle actuator trait
//!
//! Open-loop position outputs (hobby servos). A write only commands the
//! target; nothing reports whether the horn actually got there.

use core::fmt;

use crate::motion::Angle;

/// Errors from an actuator write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// The output peripheral rejected the write
    WriteFailed,
    /// The computed pulse cannot be produced by the output
    InvalidPulse,
}

/// Logical role of an actuator in the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorRole {
    /// Rotates the chute to the bin for the current colour
    Positioning,
    /// Gate that releases the item into the chute
    Drop,
}

impl ActuatorRole {
    /// Lower-case name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            ActuatorRole::Positioning => "positioning",
            ActuatorRole::Drop => "drop",
        }
    }
}

impl fmt::Display for ActuatorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An output that can be commanded to an angle
pub trait AngleActuator {
    /// Command the output to `angle`
    ///
    /// Returns once the command is issued, not once the motion completes.
    /// Implementations may clamp the angle to their travel range.
    fn set_angle(&mut self, angle: Angle) -> Result<(), ActuatorError>;

    /// Last angle successfully commanded, after any clamping
    fn last_commanded(&self) -> Option<Angle>;
}
