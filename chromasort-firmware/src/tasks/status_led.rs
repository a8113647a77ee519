//! Status LED task
//!
//! Blinks the on-board LED with the pattern for the current rig state.
//! A new state cuts the current blink short.

use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::Timer;

use chromasort_core::state::RigState;

use crate::channels::RIG_STATE;

#[embassy_executor::task]
pub async fn status_led_task(mut led: Output<'static>) {
    let mut state = RigState::Boot;

    loop {
        let pattern = state.led_pattern();

        led.set_high();
        let on = select(
            Timer::after_millis(u64::from(pattern.on_ms)),
            RIG_STATE.wait(),
        )
        .await;
        led.set_low();
        if let Either::Second(next) = on {
            state = next;
            continue;
        }

        if let Either::Second(next) = select(
            Timer::after_millis(u64::from(pattern.off_ms)),
            RIG_STATE.wait(),
        )
        .await
        {
            state = next;
        }
    }
}
