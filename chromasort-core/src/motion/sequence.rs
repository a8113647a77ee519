//! Timed sort sequence
//!
//! Every accepted, mapped command runs the same four steps, strictly in
//! order, each one a servo write followed by a blocking hold:
//!
//! | # | Actuator    | Target      | Hold      |
//! |---|-------------|-------------|-----------|
//! | 1 | positioning | home (0°)   | 500 ms    |
//! | 2 | positioning | bin angle   | 500 ms    |
//! | 3 | drop        | open (30°)  | 1000 ms   |
//! | 4 | drop        | closed (80°)| none      |
//!
//! There is no position feedback; the holds are what give the servos time
//! to arrive. A failed write aborts the remaining steps.

use embedded_hal::delay::DelayNs;

use crate::config::MotionConfig;
use crate::registry::ColorEntry;
use crate::traits::{ActuatorError, ActuatorRole, AngleActuator};

use super::angle::Angle;

/// Number of steps in a sort sequence
pub const SEQUENCE_STEPS: usize = 4;

/// Step number reported for faults while moving to the rest pose
pub const PARK_STEP: usize = 0;

/// One actuator write followed by a fixed hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimedStep {
    pub role: ActuatorRole,
    pub angle: Angle,
    /// Hold after the write; zero means no wait
    pub hold_ms: u32,
}

/// Target for one sort sequence
///
/// Only built from a mapped registry entry, so a sequence always has a
/// real bin to go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionRequest {
    target: Angle,
}

impl MotionRequest {
    pub const fn new(target: Angle) -> Self {
        Self { target }
    }

    /// Request for `entry`, or `None` if the entry has no angle
    pub fn from_entry(entry: &ColorEntry) -> Option<Self> {
        entry.angle.map(Self::new)
    }

    pub const fn target(&self) -> Angle {
        self.target
    }
}

/// A servo write failed during a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionError {
    /// 1-based step number, [`PARK_STEP`] for the rest pose
    pub step: usize,
    pub role: ActuatorRole,
    pub source: ActuatorError,
}

/// Build the four timed steps for `request`
pub fn plan(request: MotionRequest, config: &MotionConfig) -> [TimedStep; SEQUENCE_STEPS] {
    let timing = &config.timing;
    [
        TimedStep {
            role: ActuatorRole::Positioning,
            angle: config.home,
            hold_ms: timing.home_hold_ms,
        },
        TimedStep {
            role: ActuatorRole::Positioning,
            angle: request.target(),
            hold_ms: timing.position_hold_ms,
        },
        TimedStep {
            role: ActuatorRole::Drop,
            angle: config.drop.open,
            hold_ms: timing.drop_hold_ms,
        },
        TimedStep {
            role: ActuatorRole::Drop,
            angle: config.drop.closed,
            hold_ms: 0,
        },
    ]
}

/// Owns both servos and the delay used for holds
pub struct Sequencer<P, D, T> {
    positioning: P,
    drop: D,
    delay: T,
    config: MotionConfig,
}

impl<P, D, T> Sequencer<P, D, T>
where
    P: AngleActuator,
    D: AngleActuator,
    T: DelayNs,
{
    pub fn new(positioning: P, drop: D, delay: T, config: MotionConfig) -> Self {
        Self {
            positioning,
            drop,
            delay,
            config,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Steps that [`execute`](Self::execute) would run for `request`
    pub fn plan(&self, request: MotionRequest) -> [TimedStep; SEQUENCE_STEPS] {
        plan(request, &self.config)
    }

    /// Move to the rest pose: positioning home, drop closed, no holds
    pub fn park(&mut self) -> Result<(), MotionError> {
        let home = self.config.home;
        let closed = self.config.drop.closed;
        self.write(ActuatorRole::Positioning, home)
            .map_err(|source| MotionError {
                step: PARK_STEP,
                role: ActuatorRole::Positioning,
                source,
            })?;
        self.write(ActuatorRole::Drop, closed)
            .map_err(|source| MotionError {
                step: PARK_STEP,
                role: ActuatorRole::Drop,
                source,
            })
    }

    /// Issue one step's write, then block for its hold
    ///
    /// `index` is the 0-based position of the step in its plan.
    pub fn run_step(&mut self, index: usize, step: &TimedStep) -> Result<(), MotionError> {
        self.write(step.role, step.angle)
            .map_err(|source| MotionError {
                step: index + 1,
                role: step.role,
                source,
            })?;
        if step.hold_ms > 0 {
            self.delay.delay_ms(step.hold_ms);
        }
        Ok(())
    }

    /// Run the full sequence for `request`
    pub fn execute(&mut self, request: MotionRequest) -> Result<(), MotionError> {
        let steps = self.plan(request);
        for (index, step) in steps.iter().enumerate() {
            self.run_step(index, step)?;
        }
        Ok(())
    }

    fn write(&mut self, role: ActuatorRole, angle: Angle) -> Result<(), ActuatorError> {
        match role {
            ActuatorRole::Positioning => self.positioning.set_angle(angle),
            ActuatorRole::Drop => self.drop.set_angle(angle),
        }
    }

    pub fn positioning(&self) -> &P {
        &self.positioning
    }

    pub fn drop_actuator(&self) -> &D {
        &self.drop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::lookup;
    use crate::testing::{MockActuator, MockDelay, Op, OpLog};
    use chromasort_protocol::Command;

    fn sequencer<'a>(
        log: &'a OpLog,
    ) -> Sequencer<MockActuator<'a>, MockActuator<'a>, MockDelay<'a>> {
        Sequencer::new(
            MockActuator::new(ActuatorRole::Positioning, log),
            MockActuator::new(ActuatorRole::Drop, log),
            MockDelay::new(log),
            MotionConfig::DEFAULT,
        )
    }

    #[test]
    fn test_plan_default() {
        let steps = plan(MotionRequest::new(Angle::degrees(80)), &MotionConfig::DEFAULT);
        assert_eq!(steps[0].role, ActuatorRole::Positioning);
        assert_eq!(steps[0].angle, Angle::degrees(0));
        assert_eq!(steps[0].hold_ms, 500);
        assert_eq!(steps[1].role, ActuatorRole::Positioning);
        assert_eq!(steps[1].angle, Angle::degrees(80));
        assert_eq!(steps[1].hold_ms, 500);
        assert_eq!(steps[2].role, ActuatorRole::Drop);
        assert_eq!(steps[2].angle, Angle::degrees(30));
        assert_eq!(steps[2].hold_ms, 1000);
        assert_eq!(steps[3].role, ActuatorRole::Drop);
        assert_eq!(steps[3].angle, Angle::degrees(80));
        assert_eq!(steps[3].hold_ms, 0);
    }

    #[test]
    fn test_request_from_entry() {
        let yellow = lookup(Command::literal(b'Y'));
        let request = MotionRequest::from_entry(&yellow).unwrap();
        assert_eq!(request.target(), Angle::degrees(80));

        let unknown = lookup(Command::literal(b'?'));
        assert!(MotionRequest::from_entry(&unknown).is_none());
    }

    #[test]
    fn test_execute_order_and_holds() {
        let log = OpLog::default();
        let mut seq = sequencer(&log);
        seq.execute(MotionRequest::new(Angle::degrees(50))).unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            &[
                Op::Write(ActuatorRole::Positioning, 0),
                Op::Hold(500),
                Op::Write(ActuatorRole::Positioning, 50),
                Op::Hold(500),
                Op::Write(ActuatorRole::Drop, 30),
                Op::Hold(1000),
                Op::Write(ActuatorRole::Drop, 80),
            ]
        );
        assert_eq!(seq.positioning().last_commanded(), Some(Angle::degrees(50)));
        assert_eq!(seq.drop_actuator().last_commanded(), Some(Angle::degrees(80)));
    }

    #[test]
    fn test_park() {
        let log = OpLog::default();
        let mut seq = sequencer(&log);
        seq.park().unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Op::Write(ActuatorRole::Positioning, 0),
                Op::Write(ActuatorRole::Drop, 80),
            ]
        );
    }

    #[test]
    fn test_failure_aborts_remaining_steps() {
        let log = OpLog::default();
        let mut seq = Sequencer::new(
            MockActuator::new(ActuatorRole::Positioning, &log),
            MockActuator::new(ActuatorRole::Drop, &log).failing_at(0),
            MockDelay::new(&log),
            MotionConfig::DEFAULT,
        );

        let err = seq
            .execute(MotionRequest::new(Angle::degrees(25)))
            .unwrap_err();
        assert_eq!(
            err,
            MotionError {
                step: 3,
                role: ActuatorRole::Drop,
                source: ActuatorError::WriteFailed,
            }
        );
        // Nothing after the failed write, not even its hold
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Op::Write(ActuatorRole::Positioning, 0),
                Op::Hold(500),
                Op::Write(ActuatorRole::Positioning, 25),
                Op::Hold(500),
            ]
        );
    }

    #[test]
    fn test_park_failure_reports_park_step() {
        let log = OpLog::default();
        let mut seq = Sequencer::new(
            MockActuator::new(ActuatorRole::Positioning, &log).failing_at(0),
            MockActuator::new(ActuatorRole::Drop, &log),
            MockDelay::new(&log),
            MotionConfig::DEFAULT,
        );
        let err = seq.park().unwrap_err();
        assert_eq!(err.step, PARK_STEP);
        assert_eq!(err.role, ActuatorRole::Positioning);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_custom_timing() {
        let log = OpLog::default();
        let mut config = MotionConfig::DEFAULT;
        config.timing.drop_hold_ms = 250;
        let mut seq = Sequencer::new(
            MockActuator::new(ActuatorRole::Positioning, &log),
            MockActuator::new(ActuatorRole::Drop, &log),
            MockDelay::new(&log),
            config,
        );
        seq.execute(MotionRequest::new(Angle::degrees(140))).unwrap();
        let holds: heapless::Vec<u32, 8> = log
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Hold(ms) => Some(*ms),
                _ => None,
            })
            .collect();
        assert_eq!(holds.as_slice(), &[500, 500, 250]);
    }
}
