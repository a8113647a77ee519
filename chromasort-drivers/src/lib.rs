//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in chromasort-core, written against the chromasort-hal peripheral
//! traits:
//!
//! - Hobby servo (angle to pulse width over a PWM channel)
//! - HD44780 character LCD behind a PCF8574 I2C backpack
//! - Serial command link (line source) and diagnostic console

#![no_std]
#![deny(unsafe_code)]

pub mod lcd;
pub mod link;
pub mod servo;
