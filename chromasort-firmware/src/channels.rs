//! Inter-task communication
//!
//! The controller task owns all rig state; other tasks only see snapshots.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use chromasort_core::state::RigState;

/// Latest rig state (updated by controller)
pub static RIG_STATE: Signal<CriticalSectionRawMutex, RigState> = Signal::new();
