//! RP2040-specific HAL for the sorting rig firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `chromasort-hal` traits on top of `embassy-rp`, plus the board pin map:
//!
//! - Buffered UART receiver for the Bluetooth command link
//! - Blocking UART transmitter for the diagnostic console
//! - PWM slice channels configured for 50 Hz servo pulses
//! - Blocking I2C master for the LCD backpack
//! - Pin assignments and GPIO to peripheral mapping

#![no_std]

pub mod i2c;
pub mod pins;
pub mod pwm;
pub mod uart;

// Re-export shared traits from chromasort-hal for convenience
pub use chromasort_hal::{I2cBus, PwmOutput, UartRx, UartTx};
