//! Command validation.
//!
//! A command is exactly one printable ASCII byte after trimming. Length is
//! counted in bytes as received, so a multi-byte UTF-8 character is a
//! length error rather than an out-of-range one.

use core::fmt;

/// Lowest printable ASCII byte (space)
pub const PRINTABLE_MIN: u8 = 32;

/// Highest printable ASCII byte (`~`)
pub const PRINTABLE_MAX: u8 = 126;

/// Reasons a line is not a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Nothing left after trimming
    EmptyInput,
    /// Trimmed line is not exactly one byte
    WrongLength {
        /// Trimmed length in bytes
        len: usize,
    },
    /// Single byte outside 32..=126
    OutOfRange {
        /// The offending byte
        byte: u8,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::EmptyInput => f.write_str("empty input"),
            DecodeError::WrongLength { len } => write!(f, "expected 1 byte, got {}", len),
            DecodeError::OutOfRange { byte } => write!(f, "byte {} is not printable", byte),
        }
    }
}

/// A validated single printable ASCII character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command(u8);

impl Command {
    /// Build a command from a literal known to be printable
    ///
    /// Panics (at compile time in const context) if `byte` is not printable.
    pub const fn literal(byte: u8) -> Self {
        assert!(is_printable(byte), "command byte must be printable ASCII");
        Self(byte)
    }

    /// The raw byte
    pub const fn byte(self) -> u8 {
        self.0
    }

    /// The command as a `char`
    pub const fn as_char(self) -> char {
        self.0 as char
    }
}

impl TryFrom<u8> for Command {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        if is_printable(byte) {
            Ok(Self(byte))
        } else {
            Err(DecodeError::OutOfRange { byte })
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.as_char())
    }
}

/// Whether a byte is in the printable ASCII range
pub const fn is_printable(byte: u8) -> bool {
    byte >= PRINTABLE_MIN && byte <= PRINTABLE_MAX
}

/// Whitespace stripped from both ends of a line
pub const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Remove leading and trailing whitespace
pub fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| !is_whitespace(b))
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|&b| !is_whitespace(b))
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Validate a raw line as a single command
pub fn decode(raw: &[u8]) -> Result<Command, DecodeError> {
    match trim(raw) {
        [] => Err(DecodeError::EmptyInput),
        [byte] => Command::try_from(*byte),
        longer => Err(DecodeError::WrongLength { len: longer.len() }),
    }
}
