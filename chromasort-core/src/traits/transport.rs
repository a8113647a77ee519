//! Line source trait for the inbound command link

use chromasort_protocol::RawLine;

/// Errors from the serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Receive buffer overran; bytes were lost
    Overrun,
    /// Stop bit missing
    Framing,
    /// Parity mismatch
    Parity,
    /// Line held low (break condition)
    Break,
}

/// Source of newline-delimited lines
pub trait LineSource {
    /// Whether a complete line is waiting to be read
    ///
    /// Never waits for input. Bytes of an unterminated line may be taken in,
    /// but this only reports true once the terminator has arrived.
    fn line_available(&mut self) -> Result<bool, TransportError>;

    /// Read one line
    ///
    /// Returns at once after `line_available` reported true; otherwise
    /// blocks until a terminator arrives.
    fn read_line(&mut self) -> Result<RawLine, TransportError>;

    /// Drop all input that is currently buffered
    ///
    /// Called after a rejected line so stale bytes are not decoded.
    fn discard_pending(&mut self) -> Result<(), TransportError>;
}
