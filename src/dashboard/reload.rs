//! Reload state machine
//!
//! At most one reload runs at a time, whichever kind it is. Entry is a
//! compare-and-set from `Idle`; the returned guard puts the state back to
//! `Idle` when dropped, on success, on error, and when the reload future is
//! dropped mid-flight.

use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
#[repr(u8)]
pub enum ReloadPhase {
    Idle = 0,
    LoadingDashboard = 1,
    LoadingLeads = 2,
}

impl ReloadPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ReloadPhase::LoadingDashboard,
            2 => ReloadPhase::LoadingLeads,
            _ => ReloadPhase::Idle,
        }
    }
}

/// Result of asking for a reload.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ReloadOutcome {
    /// The reload ran to completion.
    Completed,
    /// Another reload was in flight; nothing was done.
    Skipped,
}

#[derive(Debug)]
pub struct ReloadState {
    phase: AtomicU8,
}

impl Default for ReloadState {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadState {
    pub fn new() -> Self {
        Self {
            phase: AtomicU8::new(ReloadPhase::Idle as u8),
        }
    }

    pub fn phase(&self) -> ReloadPhase {
        ReloadPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn is_busy(&self) -> bool {
        self.phase() != ReloadPhase::Idle
    }

    /// Move from `Idle` to `phase`, or return `None` if a reload is running.
    pub fn try_begin(&self, phase: ReloadPhase) -> Option<ReloadGuard<'_>> {
        debug_assert_ne!(phase, ReloadPhase::Idle);
        self.phase
            .compare_exchange(
                ReloadPhase::Idle as u8,
                phase as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok()
            .map(|_| ReloadGuard { state: self })
    }
}

/// Holds the reload slot; releases it on drop.
#[derive(Debug)]
pub struct ReloadGuard<'a> {
    state: &'a ReloadState,
}

impl Drop for ReloadGuard<'_> {
    fn drop(&mut self) {
        self.state
            .phase
            .store(ReloadPhase::Idle as u8, Ordering::Release);
    }
}
