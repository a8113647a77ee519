//! Colour registry
//!
//! Fixed mapping from colour code to positioning angle and display name.
//! The bin angles are measured from the positioning servo's home position.
//! Codes outside the table resolve to an "Unknown" entry with no angle,
//! which the rig displays but never moves for.

use chromasort_protocol::Command;

use crate::motion::Angle;

/// Name shown for codes that are not in the table
pub const UNKNOWN_NAME: &str = "Unknown";

/// Value shown on the display for an entry without an angle
pub const UNMAPPED_DISPLAY_ANGLE: i16 = -1;

/// One row of the colour table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorEntry {
    /// Colour code
    pub code: Command,
    /// Positioning angle, `None` for unknown codes
    pub angle: Option<Angle>,
    /// Human readable colour name
    pub name: &'static str,
}

impl ColorEntry {
    const fn mapped(code: u8, degrees: u16, name: &'static str) -> Self {
        Self {
            code: Command::literal(code),
            angle: Some(Angle::degrees(degrees)),
            name,
        }
    }

    /// Entry for a code that is not in the table
    pub const fn unknown(code: Command) -> Self {
        Self {
            code,
            angle: None,
            name: UNKNOWN_NAME,
        }
    }

    /// Whether this entry has a bin to sort into
    pub const fn is_mapped(&self) -> bool {
        self.angle.is_some()
    }

    /// Angle as shown to the operator, `-1` when unmapped
    pub fn display_angle(&self) -> i16 {
        self.angle
            .map_or(UNMAPPED_DISPLAY_ANGLE, |angle| angle.get() as i16)
    }
}

const TABLE: [ColorEntry; 7] = [
    ColorEntry::mapped(b'R', 0, "Red"),
    ColorEntry::mapped(b'G', 25, "Green"),
    ColorEntry::mapped(b'B', 50, "Blue"),
    ColorEntry::mapped(b'Y', 80, "Yellow"),
    ColorEntry::mapped(b'O', 115, "Orange"),
    ColorEntry::mapped(b'N', 140, "Brown"),
    ColorEntry::mapped(b'M', 195, "Non-MM"),
];

/// Detector class labels and the code sent for each
const CLASS_LABELS: [(&str, u8); 7] = [
    ("red", b'R'),
    ("green", b'G'),
    ("blue", b'B'),
    ("yellow", b'Y'),
    ("orange", b'O'),
    ("brown", b'N'),
    ("non-mm", b'M'),
];

/// Resolve a command to its table entry
///
/// Total: codes outside the table yield [`ColorEntry::unknown`]. Matching is
/// case-sensitive.
pub fn lookup(command: Command) -> ColorEntry {
    TABLE
        .iter()
        .find(|entry| entry.code == command)
        .copied()
        .unwrap_or(ColorEntry::unknown(command))
}

/// All mapped entries in table order
pub fn entries() -> &'static [ColorEntry] {
    &TABLE
}

/// Code the detector sends for a class label, if the label is known
pub fn class_to_command(label: &str) -> Option<Command> {
    CLASS_LABELS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|&(_, code)| Command::literal(code))
}
