//! UART implementations
//!
//! RP2040 has two UART peripherals (UART0 and UART1). The command link
//! uses a buffered, interrupt-driven receiver so bytes arriving during a
//! sort sequence are kept until the controller reads them. The console
//! transmitter is blocking.

use embassy_rp::uart::{self, Blocking, BufferedUartRx};
use embedded_io::{Read, ReadReady};

use chromasort_hal::{UartError, UartRx, UartTx};

/// UART peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    Uart0,
    Uart1,
}

/// Signal a GPIO carries when muxed to a UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartSignal {
    Tx,
    Rx,
}

/// Determine which UART function a given GPIO pin has
///
/// Only TX/RX are mapped; CTS/RTS pins return `None`.
pub const fn gpio_to_uart(gpio: u8) -> Option<(UartId, UartSignal)> {
    // UART0: GPIO 0/1, 12/13, 16/17, 28/29
    // UART1: GPIO 4/5, 8/9, 20/21, 24/25
    let id = match gpio {
        0 | 1 | 12 | 13 | 16 | 17 | 28 | 29 => UartId::Uart0,
        4 | 5 | 8 | 9 | 20 | 21 | 24 | 25 => UartId::Uart1,
        _ => return None,
    };
    let signal = if gpio % 2 == 0 {
        UartSignal::Tx
    } else {
        UartSignal::Rx
    };
    Some((id, signal))
}

fn map_error(e: uart::Error) -> UartError {
    match e {
        uart::Error::Overrun => UartError::Overrun,
        uart::Error::Break => UartError::Break,
        uart::Error::Parity => UartError::Parity,
        _ => UartError::Framing,
    }
}

/// Build an embassy-rp UART config from the shared settings
pub fn config(cfg: &chromasort_hal::UartConfig) -> uart::Config {
    let mut out = uart::Config::default();
    out.baudrate = cfg.baudrate;
    out.data_bits = match cfg.data_bits {
        chromasort_hal::uart::DataBits::Seven => uart::DataBits::DataBits7,
        chromasort_hal::uart::DataBits::Eight => uart::DataBits::DataBits8,
    };
    out.parity = match cfg.parity {
        chromasort_hal::uart::Parity::None => uart::Parity::ParityNone,
        chromasort_hal::uart::Parity::Even => uart::Parity::ParityEven,
        chromasort_hal::uart::Parity::Odd => uart::Parity::ParityOdd,
    };
    out.stop_bits = match cfg.stop_bits {
        chromasort_hal::uart::StopBits::One => uart::StopBits::STOP1,
        chromasort_hal::uart::StopBits::Two => uart::StopBits::STOP2,
    };
    out
}

/// Receive half of the buffered command link UART
pub struct RpLinkRx {
    rx: BufferedUartRx,
}

impl RpLinkRx {
    pub fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }
}

impl UartRx for RpLinkRx {
    type Error = UartError;

    fn bytes_available(&mut self) -> Result<bool, UartError> {
        self.rx.read_ready().map_err(map_error)
    }

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, UartError> {
        self.rx.read(buf).map_err(map_error)
    }
}

/// Blocking console transmitter
pub struct RpConsoleTx<'d> {
    tx: uart::UartTx<'d, Blocking>,
}

impl<'d> RpConsoleTx<'d> {
    pub fn new(tx: uart::UartTx<'d, Blocking>) -> Self {
        Self { tx }
    }
}

impl UartTx for RpConsoleTx<'_> {
    type Error = UartError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartError> {
        self.tx.blocking_write(data).map_err(map_error)
    }

    fn flush(&mut self) -> Result<(), UartError> {
        self.tx.blocking_flush().map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_to_uart() {
        assert_eq!(gpio_to_uart(0), Some((UartId::Uart0, UartSignal::Tx)));
        assert_eq!(gpio_to_uart(1), Some((UartId::Uart0, UartSignal::Rx)));
        assert_eq!(gpio_to_uart(4), Some((UartId::Uart1, UartSignal::Tx)));
        assert_eq!(gpio_to_uart(21), Some((UartId::Uart1, UartSignal::Rx)));
        assert_eq!(gpio_to_uart(2), None);
        assert_eq!(gpio_to_uart(11), None);
    }
}
