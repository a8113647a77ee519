//! State machine definition

use super::events::Event;

/// Rig states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RigState {
    /// Power-on, servos not yet parked
    Boot,
    /// Waiting for the next command line
    Idle,
    /// Timed motion sequence running; input is not read
    Sequencing(SequencePhase),
    /// Outputs frozen until reset
    Fault(FaultKind),
}

/// Phase of the four-step sort sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencePhase {
    /// Positioning servo returning to home
    Homing,
    /// Positioning servo moving to the bin angle
    Positioning,
    /// Drop gate open
    Dropping,
    /// Drop gate closing
    Closing,
}

impl SequencePhase {
    /// Phase for a 0-based step index in the sequence
    pub const fn for_step(index: usize) -> Option<Self> {
        match index {
            0 => Some(SequencePhase::Homing),
            1 => Some(SequencePhase::Positioning),
            2 => Some(SequencePhase::Dropping),
            3 => Some(SequencePhase::Closing),
            _ => None,
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            SequencePhase::Homing => Some(SequencePhase::Positioning),
            SequencePhase::Positioning => Some(SequencePhase::Dropping),
            SequencePhase::Dropping => Some(SequencePhase::Closing),
            SequencePhase::Closing => None,
        }
    }
}

/// Types of faults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// A servo write failed
    ActuatorWrite,
}

impl FaultKind {
    /// Short description for the fault screen
    pub const fn description(self) -> &'static str {
        match self {
            FaultKind::ActuatorWrite => "Servo write",
        }
    }
}

/// Status LED blink timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedPattern {
    pub on_ms: u32,
    pub off_ms: u32,
}

impl RigState {
    /// Check if a new command line may be read
    pub fn accepts_input(&self) -> bool {
        matches!(self, RigState::Idle)
    }

    /// Check if this is a fault state
    pub fn is_fault(&self) -> bool {
        matches!(self, RigState::Fault(_))
    }

    /// Status LED pattern for this state
    pub fn led_pattern(&self) -> LedPattern {
        match self {
            RigState::Boot => LedPattern {
                on_ms: 100,
                off_ms: 100,
            },
            RigState::Idle => LedPattern {
                on_ms: 100,
                off_ms: 1900,
            },
            RigState::Sequencing(_) => LedPattern {
                on_ms: 250,
                off_ms: 250,
            },
            RigState::Fault(_) => LedPattern {
                on_ms: 50,
                off_ms: 50,
            },
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use RigState::*;

        match (self, event) {
            // Fault is terminal
            (Fault(_), _) => self,
            (_, FaultDetected(kind)) => Fault(kind),

            (Boot, BootComplete) => Idle,

            (Idle, MotionStarted) => Sequencing(SequencePhase::Homing),

            (Sequencing(phase), StepComplete) => match phase.next() {
                Some(next) => Sequencing(next),
                None => self,
            },
            (Sequencing(_), SequenceFinished) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
