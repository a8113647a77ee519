//! Controller task
//!
//! Owns the rig controller and every peripheral it talks to, and runs the
//! poll loop. Sort sequences block this task (and the executor) for their
//! full duration; between lines the task sleeps so other tasks can run.
//! Before a sequence starts the new state is published and the task yields
//! once, so the status LED enters its sequencing pattern and holds it.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Timer};

use chromasort_core::controller::{Controller, CycleError, Outcome};
use chromasort_core::report::{Diagnostic, Severity};
use chromasort_core::state::{RigState, SequencePhase};
use chromasort_core::traits::{DiagnosticSink, LineSource};
use chromasort_drivers::lcd::Hd44780I2c;
use chromasort_drivers::link::{SerialLineSource, UartDiagnostics};
use chromasort_drivers::servo::Servo;
use chromasort_hal_rp2040::i2c::RpI2c;
use chromasort_hal_rp2040::pwm::RpServoPwm;
use chromasort_hal_rp2040::uart::{RpConsoleTx, RpLinkRx};

use crate::channels::RIG_STATE;

/// Sleep between polls when no input is waiting
const POLL_INTERVAL_MS: u64 = 10;

pub type RigServo = Servo<RpServoPwm<'static>>;
pub type RigController = Controller<RigServo, RigServo, Delay>;
pub type Lcd = Hd44780I2c<RpI2c<'static, I2C0>, Delay>;
pub type Link = SerialLineSource<RpLinkRx>;
pub type Console = UartDiagnostics<RpConsoleTx<'static>>;

/// Mirrors every diagnostic to the defmt log before the console
struct LoggedDiagnostics<S> {
    inner: S,
}

impl<S: DiagnosticSink> DiagnosticSink for LoggedDiagnostics<S> {
    fn report(&mut self, diagnostic: &Diagnostic<'_>) {
        let text = Display2Format(diagnostic);
        match diagnostic.severity() {
            Severity::Info => info!("{}", text),
            Severity::Warn => warn!("{}", text),
            Severity::Error => error!("{}", text),
        }
        self.inner.report(diagnostic);
    }
}

#[embassy_executor::task]
pub async fn controller_task(
    mut controller: RigController,
    mut link: Link,
    mut lcd: Lcd,
    console: Console,
) {
    info!("Controller task started");
    let mut diag = LoggedDiagnostics { inner: console };

    if let Err(e) = controller.start(&mut lcd, &mut diag) {
        error!("Failed to reach rest pose: {}", e);
        halt(controller.state()).await;
    }
    RIG_STATE.signal(controller.state());
    info!("Rig idle, waiting for commands");

    loop {
        match run_cycle(&mut controller, &mut link, &mut lcd, &mut diag).await {
            Ok(Some(outcome)) => {
                debug!("Cycle finished: {}", outcome);
                RIG_STATE.signal(controller.state());
            }
            Ok(None) => Timer::after_millis(POLL_INTERVAL_MS).await,
            Err(CycleError::Transport(e)) => {
                warn!("Command link error: {}", e);
                if let Err(e) = link.discard_pending() {
                    warn!("Discard after link error failed: {}", e);
                }
            }
            Err(e) => {
                error!("Controller stopped: {}", e);
                break;
            }
        }
    }

    if controller.display_errors() > 0 {
        warn!("{} display updates failed", controller.display_errors());
    }
    halt(controller.state()).await;
}

/// One poll of the controller, announcing a sort before it blocks
async fn run_cycle<S: DiagnosticSink>(
    controller: &mut RigController,
    link: &mut Link,
    lcd: &mut Lcd,
    diag: &mut S,
) -> Result<Option<Outcome>, CycleError> {
    let Some(line) = controller.next_line(link)? else {
        return Ok(None);
    };
    if controller.will_sort(&line) {
        RIG_STATE.signal(RigState::Sequencing(SequencePhase::Homing));
        yield_now().await;
    }
    controller.finish_line(&line, link, lcd, diag).map(Some)
}

/// Publish the final state and never return
async fn halt(state: RigState) -> ! {
    RIG_STATE.signal(state);
    warn!("Rig halted in {}; reset required", state);
    loop {
        Timer::after_secs(60).await;
    }
}
