//! Chromasort - Colour Sorting Rig Firmware
//!
//! Main firmware binary for an RP2040 driving the sorting rig: a Bluetooth
//! serial link delivers one colour code per line, a 16x2 LCD shows what was
//! received, and two hobby servos route and drop each item.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::I2c;
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Uart, UartTx};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use chromasort_core::config::RigConfig;
use chromasort_core::controller::Controller;
use chromasort_core::motion::Sequencer;
use chromasort_drivers::lcd::Hd44780I2c;
use chromasort_drivers::link::{SerialLineSource, UartDiagnostics};
use chromasort_drivers::servo::Servo;
use chromasort_hal::i2c::I2cConfig;
use chromasort_hal::UartConfig;
use chromasort_hal_rp2040::i2c::{self as rp_i2c, RpI2c};
use chromasort_hal_rp2040::pwm::{PwmChannel, RpServoPwm};
use chromasort_hal_rp2040::uart::{self as rp_uart, RpConsoleTx, RpLinkRx};

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Rig configuration; there is no config file
const RIG: RigConfig = RigConfig::DEFAULT;

const _: () = assert!(RIG.positioning_servo.is_valid());
const _: () = assert!(RIG.drop_servo.is_valid());

// Static cells for UART buffers (must live forever)
// The link is receive-only, TX just needs a minimal ring
static LINK_TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static LINK_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Chromasort firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Bluetooth command link on UART0 (GPIO0 TX, GPIO1 RX)
    let link_config = rp_uart::config(&UartConfig::BLUETOOTH.with_baudrate(RIG.link.baudrate));
    let tx_buf = LINK_TX_BUF.init([0u8; 16]);
    let rx_buf = LINK_RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, link_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_link_tx, link_rx) = uart.split();
    let link = SerialLineSource::new(RpLinkRx::new(link_rx));
    info!("Command link on UART0 at {} baud", RIG.link.baudrate);

    // Diagnostic console on UART1 (GPIO4 TX)
    let console = UartTx::new_blocking(p.UART1, p.PIN_4, rp_uart::config(&UartConfig::CONSOLE));
    let console = UartDiagnostics::new(RpConsoleTx::new(console));

    // LCD backpack on I2C0 (GPIO21 SCL, GPIO20 SDA)
    let i2c = I2c::new_blocking(
        p.I2C0,
        p.PIN_21,
        p.PIN_20,
        rp_i2c::config(&I2cConfig::STANDARD),
    );
    let mut lcd = Hd44780I2c::new(RpI2c::new(i2c), Delay, RIG.display);
    match lcd.init() {
        Ok(()) => info!("LCD initialized at {:#x}", RIG.display.i2c_address),
        Err(e) => warn!("LCD init failed: {}", e),
    }

    // Servos: drop gate on GPIO8 (slice 4 A), positioning on GPIO11 (slice 5 B)
    let drop_pwm = Pwm::new_output_a(p.PWM_SLICE4, p.PIN_8, PwmConfig::default());
    let positioning_pwm = Pwm::new_output_b(p.PWM_SLICE5, p.PIN_11, PwmConfig::default());
    let drop = Servo::new(
        RpServoPwm::new(drop_pwm, PwmChannel::A, RIG.drop_servo.period_us),
        RIG.drop_servo,
    );
    let positioning = Servo::new(
        RpServoPwm::new(positioning_pwm, PwmChannel::B, RIG.positioning_servo.period_us),
        RIG.positioning_servo,
    );
    let controller = Controller::new(Sequencer::new(positioning, drop, Delay, RIG.motion));
    info!("Servos configured");

    let led = Output::new(p.PIN_25, Level::Low);

    spawner.spawn(tasks::status_led_task(led)).unwrap();
    spawner
        .spawn(tasks::controller_task(controller, link, lcd, console))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
