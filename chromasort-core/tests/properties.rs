//! Property tests for the registry and the controller cycle.

use std::cell::RefCell;

use chromasort_core::config::MotionConfig;
use chromasort_core::controller::{Controller, Outcome};
use chromasort_core::motion::{Angle, Sequencer};
use chromasort_core::registry::{entries, lookup, UNKNOWN_NAME};
use chromasort_core::report::Diagnostic;
use chromasort_core::traits::{
    ActuatorError, AngleActuator, DiagnosticSink, DisplayError, TextDisplay,
};
use chromasort_core::{Command, RawLine};
use embedded_hal::delay::DelayNs;
use proptest::prelude::*;

struct Servo<'a> {
    drop: bool,
    writes: &'a RefCell<Vec<(bool, u16)>>,
    last: Option<Angle>,
}

impl AngleActuator for Servo<'_> {
    fn set_angle(&mut self, angle: Angle) -> Result<(), ActuatorError> {
        self.writes.borrow_mut().push((self.drop, angle.get()));
        self.last = Some(angle);
        Ok(())
    }

    fn last_commanded(&self) -> Option<Angle> {
        self.last
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

struct Lcd;

impl TextDisplay for Lcd {
    fn columns(&self) -> u8 {
        16
    }

    fn rows(&self) -> u8 {
        2
    }

    fn write_line(&mut self, _row: u8, _text: &str) -> Result<(), DisplayError> {
        Ok(())
    }
}

struct Quiet;

impl DiagnosticSink for Quiet {
    fn report(&mut self, _diagnostic: &Diagnostic<'_>) {}
}

type Rig<'a> = Controller<Servo<'a>, Servo<'a>, NoDelay>;

fn rig(writes: &RefCell<Vec<(bool, u16)>>) -> Rig<'_> {
    let mut ctrl = Controller::new(Sequencer::new(
        Servo {
            drop: false,
            writes,
            last: None,
        },
        Servo {
            drop: true,
            writes,
            last: None,
        },
        NoDelay,
        MotionConfig::DEFAULT,
    ));
    ctrl.start(&mut Lcd, &mut Quiet).unwrap();
    writes.borrow_mut().clear();
    ctrl
}

fn opened_gates(writes: &RefCell<Vec<(bool, u16)>>) -> usize {
    writes
        .borrow()
        .iter()
        .filter(|&&(drop, deg)| drop && deg == 30)
        .count()
}

proptest! {
    #[test]
    fn lookup_is_total_over_printable_bytes(byte in 32u8..=126) {
        let cmd = Command::try_from(byte).unwrap();
        let entry = lookup(cmd);
        prop_assert_eq!(entry.code, cmd);

        let in_table = entries().iter().any(|e| e.code == cmd);
        prop_assert_eq!(entry.is_mapped(), in_table);
        if in_table {
            prop_assert!(entry.display_angle() >= 0);
            prop_assert!(entry.display_angle() < 360);
        } else {
            prop_assert_eq!(entry.name, UNKNOWN_NAME);
            prop_assert_eq!(entry.display_angle(), -1);
        }
    }

    #[test]
    fn invalid_lines_never_move_or_touch_last_command(
        prefix in prop::sample::select(vec![b'R', b'G', b'B']),
        body in prop::collection::vec(any::<u8>(), 0..48),
    ) {
        let line = RawLine::new(&body);
        prop_assume!(line.decode().is_err());

        let writes = RefCell::new(Vec::new());
        let mut ctrl = rig(&writes);
        ctrl.process_line(&RawLine::new(&[prefix]), &mut Lcd, &mut Quiet).unwrap();
        writes.borrow_mut().clear();

        let outcome = ctrl.process_line(&line, &mut Lcd, &mut Quiet).unwrap();
        prop_assert!(matches!(outcome, Outcome::Rejected(_)));
        prop_assert!(writes.borrow().is_empty());
        prop_assert_eq!(ctrl.last_command(), Some(Command::try_from(prefix).unwrap()));
    }

    #[test]
    fn one_sequence_per_change_of_mapped_code(
        codes in prop::collection::vec(prop::sample::select(b"RGBYONM".to_vec()), 1..20),
    ) {
        let writes = RefCell::new(Vec::new());
        let mut ctrl = rig(&writes);
        for &code in &codes {
            ctrl.process_line(&RawLine::new(&[code]), &mut Lcd, &mut Quiet).unwrap();
        }
        let changes = 1 + codes.windows(2).filter(|w| w[0] != w[1]).count();
        prop_assert_eq!(opened_gates(&writes), changes);
    }
}
