//! Status screen rendering
//!
//! Builds the two text lines shown on the character LCD. Lines are padded
//! with spaces to the display width so a shorter name fully overwrites a
//! longer one, and cut at the width so nothing wraps.

use core::fmt::{self, Write};

use heapless::String;

use crate::registry::ColorEntry;
use crate::state::FaultKind;
use crate::traits::{DisplayError, TextDisplay};

/// Widest line the screen buffers hold
pub const MAX_COLUMNS: usize = 20;

/// Number of lines on the status screen
pub const STATUS_ROWS: usize = 2;

/// `fmt::Write` adapter that silently drops text past `width`
struct Clipped<'a> {
    buf: &'a mut String<MAX_COLUMNS>,
    width: usize,
}

impl Write for Clipped<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.buf.len() + c.len_utf8() > self.width {
                break;
            }
            // Cannot fail: width is at most MAX_COLUMNS
            let _ = self.buf.push(c);
        }
        Ok(())
    }
}

/// Format `args` into a line exactly `width` bytes long
fn padded_line(args: fmt::Arguments<'_>, width: usize) -> String<MAX_COLUMNS> {
    let width = width.min(MAX_COLUMNS);
    let mut buf = String::new();
    let _ = Clipped {
        buf: &mut buf,
        width,
    }
    .write_fmt(args);
    while buf.len() < width {
        let _ = buf.push(' ');
    }
    buf
}

/// Content for both display lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusScreen {
    lines: [String<MAX_COLUMNS>; STATUS_ROWS],
}

impl StatusScreen {
    /// Screen for an accepted command
    ///
    /// ```text
    /// Color: Yellow
    /// Code: Y  Deg: 80
    /// ```
    ///
    /// Unknown codes show `Deg: -1`.
    pub fn accepted(entry: &ColorEntry, width: usize) -> Self {
        Self {
            lines: [
                padded_line(format_args!("Color: {}", entry.name), width),
                padded_line(
                    format_args!("Code: {}  Deg: {}", entry.code, entry.display_angle()),
                    width,
                ),
            ],
        }
    }

    /// Screen shown until the first command arrives
    pub fn boot(width: usize) -> Self {
        Self {
            lines: [
                padded_line(format_args!("Chromasort"), width),
                padded_line(format_args!("Waiting..."), width),
            ],
        }
    }

    /// Screen shown once the rig has stopped on a fault
    pub fn fault(kind: FaultKind, width: usize) -> Self {
        Self {
            lines: [
                padded_line(format_args!("FAULT"), width),
                padded_line(format_args!("{}", kind.description()), width),
            ],
        }
    }

    /// Text for `row`
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", |line| line.as_str())
    }

    /// Write every line that fits on `display`
    pub fn show<D: TextDisplay>(&self, display: &mut D) -> Result<(), DisplayError> {
        let rows = usize::from(display.rows()).min(STATUS_ROWS);
        for (row, line) in self.lines.iter().take(rows).enumerate() {
            display.write_line(row as u8, line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::lookup;
    use crate::testing::MockDisplay;
    use chromasort_protocol::Command;

    #[test]
    fn test_accepted_yellow() {
        let screen = StatusScreen::accepted(&lookup(Command::literal(b'Y')), 16);
        assert_eq!(screen.line(0), "Color: Yellow   ");
        assert_eq!(screen.line(1), "Code: Y  Deg: 80");
    }

    #[test]
    fn test_accepted_unknown() {
        let screen = StatusScreen::accepted(&lookup(Command::literal(b'Q')), 16);
        assert_eq!(screen.line(0), "Color: Unknown  ");
        assert_eq!(screen.line(1), "Code: Q  Deg: -1");
    }

    #[test]
    fn test_lines_truncated_to_width() {
        let screen = StatusScreen::accepted(&lookup(Command::literal(b'O')), 16);
        assert_eq!(screen.line(1), "Code: O  Deg: 11");
        assert_eq!(screen.line(1).len(), 16);
    }

    #[test]
    fn test_wider_display() {
        let screen = StatusScreen::accepted(&lookup(Command::literal(b'M')), 20);
        assert_eq!(screen.line(0), "Color: Non-MM       ");
        assert_eq!(screen.line(1), "Code: M  Deg: 195   ");
    }

    #[test]
    fn test_boot_and_fault() {
        let boot = StatusScreen::boot(16);
        assert_eq!(boot.line(0), "Chromasort      ");
        assert_eq!(boot.line(1), "Waiting...      ");

        let fault = StatusScreen::fault(FaultKind::ActuatorWrite, 16);
        assert_eq!(fault.line(0), "FAULT           ");
        assert_eq!(fault.line(1), "Servo write     ");
    }

    #[test]
    fn test_show_writes_both_rows() {
        let mut display = MockDisplay::new();
        let screen = StatusScreen::accepted(&lookup(Command::literal(b'R')), 16);
        screen.show(&mut display).unwrap();
        assert_eq!(display.writes, 2);
        assert_eq!(display.lines[0].as_str(), "Color: Red      ");
        assert_eq!(display.lines[1].as_str(), "Code: R  Deg: 0 ");
    }

    #[test]
    fn test_show_propagates_error() {
        let mut display = MockDisplay::new();
        display.fail = true;
        let screen = StatusScreen::boot(16);
        assert_eq!(screen.show(&mut display), Err(DisplayError::Bus));
    }

    #[test]
    fn test_line_out_of_range() {
        assert_eq!(StatusScreen::boot(16).line(5), "");
    }
}
