//! Chromasort Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs (RP2040 today). Drivers in `chromasort-drivers`
//! are written against these traits only, so they can be exercised on the
//! host with mock peripherals.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (chromasort-firmware)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chromasort-drivers (servo, lcd, link)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chromasort-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ chromasort-hal- │
//!            │     rp2040      │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`pwm::PwmOutput`] - Pulse-width outputs for hobby servos

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod pwm;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use i2c::I2cBus;
pub use pwm::PwmOutput;
pub use uart::{UartConfig, UartError, UartRx, UartTx};
