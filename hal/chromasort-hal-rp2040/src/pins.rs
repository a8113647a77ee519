//! Board pin map
//!
//! GPIO numbers for a Raspberry Pi Pico wired to the sorting rig. The
//! firmware takes the matching `PIN_n` peripherals; the const checks below
//! keep this table consistent with the peripheral each pin is routed to.

use crate::i2c::{gpio_to_i2c, I2cId, I2cSignal};
use crate::pwm::{gpio_to_pwm, PwmChannel};
use crate::uart::{gpio_to_uart, UartId, UartSignal};

/// Bluetooth module RXD (UART0 TX)
pub const LINK_TX: u8 = 0;
/// Bluetooth module TXD (UART0 RX)
pub const LINK_RX: u8 = 1;
/// Diagnostic console (UART1 TX)
pub const CONSOLE_TX: u8 = 4;
/// Drop gate servo signal
pub const DROP_SERVO: u8 = 8;
/// Positioning servo signal
pub const POSITIONING_SERVO: u8 = 11;
/// LCD backpack SDA
pub const LCD_SDA: u8 = 20;
/// LCD backpack SCL
pub const LCD_SCL: u8 = 21;
/// On-board LED
pub const STATUS_LED: u8 = 25;

const _: () = {
    assert!(matches!(
        gpio_to_uart(LINK_TX),
        Some((UartId::Uart0, UartSignal::Tx))
    ));
    assert!(matches!(
        gpio_to_uart(LINK_RX),
        Some((UartId::Uart0, UartSignal::Rx))
    ));
    assert!(matches!(
        gpio_to_uart(CONSOLE_TX),
        Some((UartId::Uart1, UartSignal::Tx))
    ));
    assert!(matches!(gpio_to_pwm(DROP_SERVO), (4, PwmChannel::A)));
    assert!(matches!(gpio_to_pwm(POSITIONING_SERVO), (5, PwmChannel::B)));
    assert!(matches!(
        gpio_to_i2c(LCD_SDA),
        Some((I2cId::I2c0, I2cSignal::Sda))
    ));
    assert!(matches!(
        gpio_to_i2c(LCD_SCL),
        Some((I2cId::I2c0, I2cSignal::Scl))
    ));
};

/// Check that no GPIO is assigned twice
pub const fn assignments_unique() -> bool {
    let pins = [
        LINK_TX,
        LINK_RX,
        CONSOLE_TX,
        DROP_SERVO,
        POSITIONING_SERVO,
        LCD_SDA,
        LCD_SCL,
        STATUS_LED,
    ];
    let mut i = 0;
    while i < pins.len() {
        let mut j = i + 1;
        while j < pins.len() {
            if pins[i] == pins[j] {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(assignments_unique());
