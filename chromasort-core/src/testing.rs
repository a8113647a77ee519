//! Shared mocks for unit tests

use core::cell::RefCell;
use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use heapless::{String, Vec};

use chromasort_protocol::RawLine;

use crate::motion::Angle;
use crate::report::Diagnostic;
use crate::traits::{
    ActuatorError, ActuatorRole, AngleActuator, DiagnosticSink, DisplayError, LineSource,
    TextDisplay, TransportError,
};

/// Something observable the rig did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Write(ActuatorRole, u16),
    Hold(u32),
}

pub type OpLog = RefCell<Vec<Op, 64>>;

pub struct MockActuator<'a> {
    role: ActuatorRole,
    log: &'a OpLog,
    last: Option<Angle>,
    writes: usize,
    fail_at: Option<usize>,
}

impl<'a> MockActuator<'a> {
    pub fn new(role: ActuatorRole, log: &'a OpLog) -> Self {
        Self {
            role,
            log,
            last: None,
            writes: 0,
            fail_at: None,
        }
    }

    /// Fail the `n`th write (0-based) and every one after it
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }
}

impl AngleActuator for MockActuator<'_> {
    fn set_angle(&mut self, angle: Angle) -> Result<(), ActuatorError> {
        if self.fail_at.is_some_and(|n| self.writes >= n) {
            return Err(ActuatorError::WriteFailed);
        }
        self.writes += 1;
        self.last = Some(angle);
        self.log
            .borrow_mut()
            .push(Op::Write(self.role, angle.get()))
            .unwrap();
        Ok(())
    }

    fn last_commanded(&self) -> Option<Angle> {
        self.last
    }
}

pub struct MockDelay<'a> {
    log: &'a OpLog,
}

impl<'a> MockDelay<'a> {
    pub fn new(log: &'a OpLog) -> Self {
        Self { log }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Op::Hold(ns / 1_000_000)).unwrap();
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Op::Hold(ms)).unwrap();
    }
}

pub struct MockDisplay {
    pub lines: [String<32>; 2],
    pub writes: usize,
    pub fail: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            lines: [String::new(), String::new()],
            writes: 0,
            fail: false,
        }
    }
}

impl TextDisplay for MockDisplay {
    fn columns(&self) -> u8 {
        16
    }

    fn rows(&self) -> u8 {
        2
    }

    fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Bus);
        }
        let line = self
            .lines
            .get_mut(row as usize)
            .ok_or(DisplayError::InvalidRow)?;
        line.clear();
        line.push_str(text).unwrap();
        self.writes += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub lines: Vec<String<96>, 16>,
}

impl DiagnosticSink for RecordingSink {
    fn report(&mut self, diagnostic: &Diagnostic<'_>) {
        let mut line = String::new();
        write!(line, "{}", diagnostic).unwrap();
        self.lines.push(line).unwrap();
    }
}

/// Serves prepared lines; a discard drops everything not yet read
pub struct ScriptedSource {
    lines: Vec<RawLine, 8>,
    pos: usize,
    pub discards: usize,
}

impl ScriptedSource {
    pub fn new(lines: &[&[u8]]) -> Self {
        let mut out = Vec::new();
        for line in lines {
            out.push(RawLine::new(line)).unwrap();
        }
        Self {
            lines: out,
            pos: 0,
            discards: 0,
        }
    }
}

impl LineSource for ScriptedSource {
    fn line_available(&mut self) -> Result<bool, TransportError> {
        Ok(self.pos < self.lines.len())
    }

    fn read_line(&mut self) -> Result<RawLine, TransportError> {
        let line = self.lines.get(self.pos).cloned().ok_or(TransportError::Overrun)?;
        self.pos += 1;
        Ok(line)
    }

    fn discard_pending(&mut self) -> Result<(), TransportError> {
        self.discards += 1;
        self.pos = self.lines.len();
        Ok(())
    }
}
