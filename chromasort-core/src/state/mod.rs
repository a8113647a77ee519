//! Rig state machine and command deduplication
//!
//! The state machine is explicit, finite, and deterministic. Whether a new
//! line may be read, and which sequence phase is active, is a function of
//! the current state only.

pub mod dedup;
pub mod events;
pub mod machine;

pub use dedup::DedupGate;
pub use events::Event;
pub use machine::{FaultKind, LedPattern, RigState, SequencePhase};
