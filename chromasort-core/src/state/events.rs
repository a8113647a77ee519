//! Events that trigger state transitions

use super::machine::FaultKind;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Rest pose reached, ready for the first command
    BootComplete,
    /// An accepted command with a bin started its sequence
    MotionStarted,
    /// Current timed step finished its hold
    StepComplete,
    /// Last step of the sequence issued
    SequenceFinished,
    /// Unrecoverable fault
    FaultDetected(FaultKind),
}
