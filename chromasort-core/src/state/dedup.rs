//! Consecutive duplicate suppression
//!
//! The detector resends the same code while an item sits in view, so only a
//! change of code triggers a sort. Comparison is exact (case-sensitive).

use chromasort_protocol::Command;

/// Remembers the last accepted command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupGate {
    last: Option<Command>,
}

impl DedupGate {
    /// Gate that accepts any first command
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Gate that treats `last` as the previously accepted command
    pub const fn with_last(last: Command) -> Self {
        Self { last: Some(last) }
    }

    /// Accept `command` if it differs from the last accepted one
    ///
    /// Records `command` on acceptance; a rejected duplicate changes nothing.
    pub fn accept(&mut self, command: Command) -> bool {
        if self.last == Some(command) {
            return false;
        }
        self.last = Some(command);
        true
    }

    /// Last accepted command
    pub fn last(&self) -> Option<Command> {
        self.last
    }
}
