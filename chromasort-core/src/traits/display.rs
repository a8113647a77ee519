//! Text display trait for the character LCD

/// Errors that can occur writing to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer to the display failed
    Bus,
    /// Row index past the last row
    InvalidRow,
}

/// A write-only character display
///
/// The display is a sink: nothing is read back, and a failed write leaves
/// the rig's behavior unchanged.
pub trait TextDisplay {
    /// Characters per row
    fn columns(&self) -> u8;

    /// Number of rows
    fn rows(&self) -> u8;

    /// Write `text` at the start of `row`
    ///
    /// Text past the last column is dropped. Existing characters after the
    /// end of `text` are left alone; callers pad to erase them.
    fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError>;
}
