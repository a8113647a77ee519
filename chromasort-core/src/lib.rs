//! Board-agnostic core logic for the colour sorting rig
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (actuator, text display, line source)
//! - Colour registry mapping codes to bin angles
//! - Dedup gate and rig state machine
//! - Timed motion sequencing for the positioning and drop servos
//! - Status screen rendering and diagnostic reports
//! - The controller tying one decode/sort cycle together
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod motion;
pub mod registry;
pub mod report;
pub mod state;
pub mod status;
pub mod traits;

pub use chromasort_protocol::{Command, DecodeError, RawLine};

#[cfg(test)]
mod testing;
