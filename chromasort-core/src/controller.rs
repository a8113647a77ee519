//! Rig controller
//!
//! Runs one complete cycle per input line:
//!
//! ```text
//! line ─► decode ─► dedup gate ─► registry ─► status screen ─► sequence
//!           │           │                          │
//!           ▼           ▼                          ▼
//!        Rejected   Duplicate                 DisplayOnly (no bin)
//! ```
//!
//! A cycle runs to completion before the next line is read, so nothing
//! that arrives during a sequence can interrupt it. The display is a
//! best-effort sink: its failures are counted and otherwise ignored. A
//! servo write failure is fatal and leaves the rig in
//! [`RigState::Fault`].

use embedded_hal::delay::DelayNs;

use chromasort_protocol::{Command, DecodeError, RawLine};

use crate::motion::{MotionError, MotionRequest, Sequencer};
use crate::registry::{self, ColorEntry};
use crate::report::Diagnostic;
use crate::state::{DedupGate, Event, FaultKind, RigState};
use crate::status::StatusScreen;
use crate::traits::{AngleActuator, DiagnosticSink, LineSource, TextDisplay, TransportError};

/// What a processed line led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Line was not a valid command; pending input should be discarded
    Rejected(DecodeError),
    /// Same as the previous accepted command; nothing happened
    Duplicate(Command),
    /// Shown on the display, but the code has no bin
    DisplayOnly(ColorEntry),
    /// Shown and sorted
    Sorted(ColorEntry),
}

/// Errors that end a cycle early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleError {
    /// Servo write failed; the rig is now faulted
    Motion(MotionError),
    /// Serial link error while reading
    Transport(TransportError),
    /// Controller is not in a state that accepts this call
    NotReady(RigState),
}

impl From<TransportError> for CycleError {
    fn from(e: TransportError) -> Self {
        CycleError::Transport(e)
    }
}

/// Owns all rig state: dedup gate, state machine and sequencer
pub struct Controller<P, D, T> {
    sequencer: Sequencer<P, D, T>,
    gate: DedupGate,
    state: RigState,
    display_errors: u32,
}

impl<P, D, T> Controller<P, D, T>
where
    P: AngleActuator,
    D: AngleActuator,
    T: DelayNs,
{
    pub fn new(sequencer: Sequencer<P, D, T>) -> Self {
        Self {
            sequencer,
            gate: DedupGate::new(),
            state: RigState::Boot,
            display_errors: 0,
        }
    }

    /// Park the servos, show the boot screen and go idle
    pub fn start<X, S>(&mut self, display: &mut X, diag: &mut S) -> Result<(), CycleError>
    where
        X: TextDisplay,
        S: DiagnosticSink,
    {
        if self.state != RigState::Boot {
            return Err(CycleError::NotReady(self.state));
        }
        self.show(&StatusScreen::boot(display.columns().into()), display);
        if let Err(e) = self.sequencer.park() {
            return Err(self.fault(e, display, diag));
        }
        self.state = self.state.transition(Event::BootComplete);
        Ok(())
    }

    /// Run one full cycle for `line`
    pub fn process_line<X, S>(
        &mut self,
        line: &RawLine,
        display: &mut X,
        diag: &mut S,
    ) -> Result<Outcome, CycleError>
    where
        X: TextDisplay,
        S: DiagnosticSink,
    {
        if !self.state.accepts_input() {
            return Err(CycleError::NotReady(self.state));
        }

        let command = match line.decode() {
            Ok(command) => command,
            Err(e) => {
                diag.report(&Diagnostic::rejected(line, e));
                return Ok(Outcome::Rejected(e));
            }
        };
        diag.report(&Diagnostic::Received(command));

        if !self.gate.accept(command) {
            diag.report(&Diagnostic::Duplicate(command));
            return Ok(Outcome::Duplicate(command));
        }

        let entry = registry::lookup(command);
        self.show(
            &StatusScreen::accepted(&entry, display.columns().into()),
            display,
        );

        let Some(request) = MotionRequest::from_entry(&entry) else {
            diag.report(&Diagnostic::Unmapped(command));
            return Ok(Outcome::DisplayOnly(entry));
        };

        if let Err(e) = self.run_sequence(request) {
            return Err(self.fault(e, display, diag));
        }
        Ok(Outcome::Sorted(entry))
    }

    /// Loop body: read and process one line if any input is waiting
    ///
    /// Returns `Ok(None)` when there was nothing to read. After a rejected
    /// line all pending input is discarded.
    pub fn poll<L, X, S>(
        &mut self,
        source: &mut L,
        display: &mut X,
        diag: &mut S,
    ) -> Result<Option<Outcome>, CycleError>
    where
        L: LineSource,
        X: TextDisplay,
        S: DiagnosticSink,
    {
        match self.next_line(source)? {
            Some(line) => self.finish_line(&line, source, display, diag).map(Some),
            None => Ok(None),
        }
    }

    /// First half of [`poll`](Self::poll): fetch a complete line, if any
    pub fn next_line<L>(&self, source: &mut L) -> Result<Option<RawLine>, CycleError>
    where
        L: LineSource,
    {
        if !self.state.accepts_input() {
            return Err(CycleError::NotReady(self.state));
        }
        if !source.line_available()? {
            return Ok(None);
        }
        Ok(Some(source.read_line()?))
    }

    /// Second half of [`poll`](Self::poll): process `line`, then discard
    /// pending input if it was rejected
    pub fn finish_line<L, X, S>(
        &mut self,
        line: &RawLine,
        source: &mut L,
        display: &mut X,
        diag: &mut S,
    ) -> Result<Outcome, CycleError>
    where
        L: LineSource,
        X: TextDisplay,
        S: DiagnosticSink,
    {
        let outcome = self.process_line(line, display, diag)?;
        if let Outcome::Rejected(_) = outcome {
            source.discard_pending()?;
        }
        Ok(outcome)
    }

    /// Whether processing `line` now would run a sort sequence
    ///
    /// Changes nothing; lets a caller announce the sequence before
    /// [`process_line`](Self::process_line) blocks on it.
    pub fn will_sort(&self, line: &RawLine) -> bool {
        if !self.state.accepts_input() {
            return false;
        }
        match line.decode() {
            Ok(command) => {
                self.gate.last() != Some(command) && registry::lookup(command).is_mapped()
            }
            Err(_) => false,
        }
    }

    fn run_sequence(&mut self, request: MotionRequest) -> Result<(), MotionError> {
        let steps = self.sequencer.plan(request);
        self.state = self.state.transition(Event::MotionStarted);
        for (index, step) in steps.iter().enumerate() {
            if index > 0 {
                self.state = self.state.transition(Event::StepComplete);
            }
            self.sequencer.run_step(index, step)?;
        }
        self.state = self.state.transition(Event::SequenceFinished);
        Ok(())
    }

    fn fault<X, S>(&mut self, error: MotionError, display: &mut X, diag: &mut S) -> CycleError
    where
        X: TextDisplay,
        S: DiagnosticSink,
    {
        let kind = FaultKind::ActuatorWrite;
        self.state = self.state.transition(Event::FaultDetected(kind));
        diag.report(&Diagnostic::ActuatorFault {
            role: error.role,
            step: error.step,
        });
        self.show(&StatusScreen::fault(kind, display.columns().into()), display);
        CycleError::Motion(error)
    }

    fn show<X: TextDisplay>(&mut self, screen: &StatusScreen, display: &mut X) {
        if screen.show(display).is_err() {
            self.display_errors = self.display_errors.saturating_add(1);
        }
    }

    pub fn state(&self) -> RigState {
        self.state
    }

    /// Last accepted command, if any
    pub fn last_command(&self) -> Option<Command> {
        self.gate.last()
    }

    /// Number of screen updates that failed
    pub fn display_errors(&self) -> u32 {
        self.display_errors
    }

    pub fn sequencer(&self) -> &Sequencer<P, D, T> {
        &self.sequencer
    }
}
