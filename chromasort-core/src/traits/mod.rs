//! Hardware abstraction traits
//!
//! These traits decouple the rig logic from specific hardware
//! implementations. Drivers implement them against the chip HAL; tests
//! implement them with mocks.

pub mod actuator;
pub mod diagnostics;
pub mod display;
pub mod transport;

pub use actuator::*;
pub use diagnostics::*;
pub use display::*;
pub use transport::*;
