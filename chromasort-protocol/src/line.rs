//! Newline-delimited line assembly.
//!
//! Bytes are buffered up to [`MAX_LINE_LEN`]. Leading whitespace is not
//! stored, and once the buffer is full further bytes are only counted, so a
//! runaway line still decodes as too long instead of being cut down to a
//! valid-looking prefix.

use heapless::Vec;

use crate::command::{self, is_whitespace, Command, DecodeError};

/// Maximum number of bytes stored per line
pub const MAX_LINE_LEN: usize = 32;

/// Byte that terminates a line
pub const LINE_TERMINATOR: u8 = b'\n';

/// Bytes received up to (not including) a line terminator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLine {
    bytes: Vec<u8, MAX_LINE_LEN>,
    /// Bytes past the full buffer, up to the last non-whitespace one
    overflow: usize,
    /// Whitespace past the full buffer not yet followed by anything else
    trailing: usize,
}

impl RawLine {
    /// Build a line from bytes that are already split off the stream
    ///
    /// Applies the same storage rules as [`LineAssembler`].
    pub fn new(bytes: &[u8]) -> Self {
        let mut line = Self::default();
        for &byte in bytes {
            line.push(byte);
        }
        line
    }

    fn push(&mut self, byte: u8) {
        if self.bytes.is_empty() && is_whitespace(byte) {
            return;
        }
        if self.bytes.push(byte).is_ok() {
            return;
        }
        if is_whitespace(byte) {
            self.trailing = self.trailing.saturating_add(1);
        } else {
            self.overflow = self.overflow.saturating_add(self.trailing).saturating_add(1);
            self.trailing = 0;
        }
    }

    /// Stored bytes, untrimmed at the end
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes that did not fit in the buffer, not counting
    /// trailing whitespace
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// Stored bytes with surrounding whitespace removed
    pub fn trimmed(&self) -> &[u8] {
        command::trim(&self.bytes)
    }

    /// Trimmed length including bytes that did not fit
    pub fn trimmed_len(&self) -> usize {
        if self.overflow == 0 {
            return self.trimmed().len();
        }
        // Leading whitespace is never stored, and the overflow ends on a
        // non-whitespace byte
        self.bytes.len() + self.overflow
    }

    /// Validate this line as a single command
    pub fn decode(&self) -> Result<Command, DecodeError> {
        if self.overflow > 0 {
            return Err(DecodeError::WrongLength {
                len: self.trimmed_len(),
            });
        }
        command::decode(&self.bytes)
    }
}

/// Accumulates stream bytes into [`RawLine`]s
#[derive(Debug, Default)]
pub struct LineAssembler {
    current: RawLine,
}

impl LineAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a byte; returns a complete line when the terminator arrives
    pub fn feed(&mut self, byte: u8) -> Option<RawLine> {
        if byte == LINE_TERMINATOR {
            return Some(core::mem::take(&mut self.current));
        }
        self.current.push(byte);
        None
    }

    /// Whether a partial line is buffered
    pub fn pending(&self) -> bool {
        !self.current.bytes.is_empty()
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.current = RawLine::default();
    }
}
