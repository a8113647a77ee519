//! Chromasort Command Link Protocol
//!
//! The PC-side detector sends one colour code per line over a Bluetooth
//! serial link:
//! ```text
//! ┌──────────────┬──────┐
//! │ CODE         │ '\n' │
//! │ 1B (32..126) │ 1B   │
//! └──────────────┴──────┘
//! ```
//!
//! There is no framing byte and no checksum. Surrounding whitespace is
//! tolerated (a `\r\n` terminator decodes the same as `\n`), anything else
//! that is not exactly one printable ASCII byte is rejected.
//!
//! - [`line`] assembles bytes into bounded [`RawLine`]s
//! - [`command`] validates a line into a [`Command`]

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;

pub use command::{decode, trim, Command, DecodeError, PRINTABLE_MAX, PRINTABLE_MIN};
pub use line::{LineAssembler, RawLine, LINE_TERMINATOR, MAX_LINE_LEN};
