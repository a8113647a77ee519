//! Diagnostic reports
//!
//! Every decision the controller makes about an input line produces one
//! [`Diagnostic`]. Its `Display` output is the line written to the
//! diagnostic console, e.g.:
//!
//! ```text
//! Received: Y
//! Invalid ASCII character received: [RG] ASCII code: 82
//! Empty data received.
//! ```

use core::fmt;

use chromasort_protocol::{Command, DecodeError, RawLine};

use crate::traits::ActuatorRole;

/// How loud a diagnostic is when mirrored to the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// A single diagnostic line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic<'a> {
    /// A valid command was decoded
    Received(Command),
    /// Line was not a single printable byte
    Invalid {
        /// Trimmed line contents
        raw: &'a [u8],
        /// First trimmed byte
        code: u8,
    },
    /// Line was empty after trimming
    Empty,
    /// Same command as the previous accepted one
    Duplicate(Command),
    /// Code has no bin; shown but not sorted
    Unmapped(Command),
    /// An actuator write failed during a sequence
    ActuatorFault {
        role: ActuatorRole,
        /// 1-based sequence step, 0 for the rest pose
        step: usize,
    },
}

impl<'a> Diagnostic<'a> {
    /// Diagnostic for a line that failed to decode
    pub fn rejected(line: &'a RawLine, error: DecodeError) -> Self {
        match error {
            DecodeError::EmptyInput => Diagnostic::Empty,
            DecodeError::OutOfRange { byte } => Diagnostic::Invalid {
                raw: line.trimmed(),
                code: byte,
            },
            DecodeError::WrongLength { .. } => {
                let raw = line.trimmed();
                Diagnostic::Invalid {
                    raw,
                    code: raw.first().copied().unwrap_or(0),
                }
            }
        }
    }

    /// Log level for this diagnostic
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::Received(_) | Diagnostic::Duplicate(_) => Severity::Info,
            Diagnostic::Invalid { .. } | Diagnostic::Empty | Diagnostic::Unmapped(_) => {
                Severity::Warn
            }
            Diagnostic::ActuatorFault { .. } => Severity::Error,
        }
    }
}

/// Writes bytes with non-printable ones escaped as `\xNN`
struct Escaped<'a>(&'a [u8]);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.0 {
            if (0x20..=0x7E).contains(&byte) {
                fmt::Write::write_char(f, byte as char)?;
            } else {
                write!(f, "\\x{:02X}", byte)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Received(cmd) => write!(f, "Received: {}", cmd),
            Diagnostic::Invalid { raw, code } => write!(
                f,
                "Invalid ASCII character received: [{}] ASCII code: {}",
                Escaped(*raw),
                code
            ),
            Diagnostic::Empty => f.write_str("Empty data received."),
            Diagnostic::Duplicate(cmd) => write!(f, "Duplicate command ignored: {}", cmd),
            Diagnostic::Unmapped(cmd) => write!(f, "Unmapped code {}: display only", cmd),
            Diagnostic::ActuatorFault { role, step } => {
                write!(f, "Actuator fault: {} at step {}", role, step)
            }
        }
    }
}
