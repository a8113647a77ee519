//! Configuration types
//!
//! The rig has no configuration file; the firmware builds everything from
//! [`RigConfig::DEFAULT`]. The types are `const`-constructible and
//! optionally serde-serializable so alternative builds can override them.

pub mod types;

pub use types::*;
