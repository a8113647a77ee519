//! Blocking I2C master

use embassy_rp::i2c::{Blocking, I2c, Instance};

use chromasort_hal::I2cBus;

/// I2C peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cId {
    I2c0,
    I2c1,
}

/// Signal a GPIO carries when muxed to I2C
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cSignal {
    Sda,
    Scl,
}

/// Determine which I2C function a given GPIO pin has
pub const fn gpio_to_i2c(gpio: u8) -> Option<(I2cId, I2cSignal)> {
    if gpio > 29 {
        return None;
    }
    // Pairs alternate between I2C0 and I2C1 every two pins
    let id = if (gpio / 2) % 2 == 0 {
        I2cId::I2c0
    } else {
        I2cId::I2c1
    };
    let signal = if gpio % 2 == 0 {
        I2cSignal::Sda
    } else {
        I2cSignal::Scl
    };
    Some((id, signal))
}

/// Build an embassy-rp I2C config from the shared settings
pub fn config(cfg: &chromasort_hal::i2c::I2cConfig) -> embassy_rp::i2c::Config {
    let mut out = embassy_rp::i2c::Config::default();
    out.frequency = cfg.frequency;
    out
}

/// Error from an RP2040 I2C transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RpI2cError {
    /// Device did not acknowledge its address
    NoAcknowledge,
    /// Bus arbitration lost or other transfer abort
    Abort,
    /// Transfer refused before it started (bad length or address)
    Rejected,
}

fn map_error(e: embassy_rp::i2c::Error) -> RpI2cError {
    use embassy_rp::i2c::{AbortReason, Error};
    match e {
        Error::Abort(AbortReason::NoAcknowledge) => RpI2cError::NoAcknowledge,
        Error::Abort(_) => RpI2cError::Abort,
        _ => RpI2cError::Rejected,
    }
}

/// Blocking I2C bus
pub struct RpI2c<'d, T: Instance> {
    i2c: I2c<'d, T, Blocking>,
}

impl<'d, T: Instance> RpI2c<'d, T> {
    pub fn new(i2c: I2c<'d, T, Blocking>) -> Self {
        Self { i2c }
    }
}

impl<T: Instance> I2cBus for RpI2c<'_, T> {
    type Error = RpI2cError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), RpI2cError> {
        self.i2c.blocking_write(address, data).map_err(map_error)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), RpI2cError> {
        self.i2c.blocking_read(address, buf).map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_to_i2c() {
        assert_eq!(gpio_to_i2c(0), Some((I2cId::I2c0, I2cSignal::Sda)));
        assert_eq!(gpio_to_i2c(3), Some((I2cId::I2c1, I2cSignal::Scl)));
        assert_eq!(gpio_to_i2c(20), Some((I2cId::I2c0, I2cSignal::Sda)));
        assert_eq!(gpio_to_i2c(21), Some((I2cId::I2c0, I2cSignal::Scl)));
        assert_eq!(gpio_to_i2c(30), None);
    }
}
