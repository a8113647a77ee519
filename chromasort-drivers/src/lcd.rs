//! HD44780 character LCD over a PCF8574 I2C backpack
//!
//! The backpack exposes the LCD's control lines and upper data nibble on
//! the expander's eight outputs:
//!
//! ```text
//! P7 P6 P5 P4 │ P3        P2  P1  P0
//! D7 D6 D5 D4 │ backlight EN  RW  RS
//! ```
//!
//! The controller runs in 4-bit mode, so every byte is sent as two nibbles,
//! each latched by pulsing EN. RW is always low (write-only).
//!
//! # Usage
//!
//! ```ignore
//! let mut lcd = Hd44780I2c::new(i2c, Delay, DisplayConfig::DEFAULT);
//! lcd.init()?;
//! lcd.write_line(0, "Color: Red")?;
//! ```

use embedded_hal::delay::DelayNs;

use chromasort_core::config::DisplayConfig;
use chromasort_core::traits::{DisplayError, TextDisplay};
use chromasort_hal::I2cBus;

/// Register select: data when set, command when clear
const RS: u8 = 0x01;
/// Enable strobe
const EN: u8 = 0x04;
/// Backlight transistor
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_HOME: u8 = 0x02;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM: u8 = 0x80;

/// Entry mode: cursor moves right, no display shift
const ENTRY_LEFT: u8 = 0x02;
/// Display control: display on, cursor and blink off
const DISPLAY_ON: u8 = 0x04;
/// Function set: two lines, 5x8 font, 4-bit bus
const TWO_LINES: u8 = 0x08;

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Shown in place of bytes the character ROM cannot display
const REPLACEMENT: u8 = b'?';

/// HD44780 driver over an I2C port expander
pub struct Hd44780I2c<B, D> {
    bus: B,
    delay: D,
    config: DisplayConfig,
    backlight: bool,
}

impl<B, D> Hd44780I2c<B, D>
where
    B: I2cBus,
    D: DelayNs,
{
    /// Create the driver; call [`init`](Self::init) before writing
    pub fn new(bus: B, delay: D, config: DisplayConfig) -> Self {
        Self {
            bus,
            delay,
            config,
            backlight: true,
        }
    }

    /// Run the 4-bit initialization sequence and clear the screen
    ///
    /// The first three nibbles force 8-bit mode whatever state the
    /// controller powered up in, then the fourth switches to 4-bit mode.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);
        self.expander_write(0)?;

        self.write_nibble(0x30)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20)?;

        self.command(CMD_FUNCTION_SET | TWO_LINES)?;
        self.command(CMD_DISPLAY_CONTROL | DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE | ENTRY_LEFT)?;
        self.command(CMD_HOME)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    /// Clear the screen and return the cursor home
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    /// Switch the backlight
    pub fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        self.expander_write(0)
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if row >= self.config.rows {
            return Err(DisplayError::InvalidRow);
        }
        let offset = ROW_OFFSETS[usize::from(row).min(ROW_OFFSETS.len() - 1)];
        self.command(CMD_SET_DDRAM | (offset + col))
    }

    /// Give back the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, 0)
    }

    fn data(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, RS)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble((value & 0xF0) | mode)?;
        self.write_nibble(((value << 4) & 0xF0) | mode)
    }

    fn write_nibble(&mut self, bits: u8) -> Result<(), DisplayError> {
        self.expander_write(bits)?;
        self.expander_write(bits | EN)?;
        self.delay.delay_us(1);
        self.expander_write(bits & !EN)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, bits: u8) -> Result<(), DisplayError> {
        let bits = if self.backlight { bits | BACKLIGHT } else { bits };
        self.bus
            .write(self.config.i2c_address, &[bits])
            .map_err(|_| DisplayError::Bus)
    }
}

impl<B, D> TextDisplay for Hd44780I2c<B, D>
where
    B: I2cBus,
    D: DelayNs,
{
    fn columns(&self) -> u8 {
        self.config.columns
    }

    fn rows(&self) -> u8 {
        self.config.rows
    }

    fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(0, row)?;
        for &byte in text.as_bytes().iter().take(usize::from(self.config.columns)) {
            let byte = if byte.is_ascii() && !byte.is_ascii_control() {
                byte
            } else {
                REPLACEMENT
            };
            self.data(byte)?;
        }
        Ok(())
    }
}
