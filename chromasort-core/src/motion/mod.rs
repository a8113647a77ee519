//! Motion primitives and the timed servo sequence

pub mod angle;
pub mod sequence;

pub use angle::*;
pub use sequence::*;
