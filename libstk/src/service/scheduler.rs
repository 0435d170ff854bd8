// libstk-rs/libstk/src/service/scheduler.rs

//! Delayed continuations for the DTMF pause digit.
//!
//! The service never sleeps. It asks a [`Scheduler`] to call it back with a
//! continuation id after a delay and ignores ids it no longer waits for, so
//! a cancellation that loses the race with the timer is harmless.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Identifies one scheduled continuation.
pub type ContinuationId = u64;

/// Source of delayed continuations.
pub trait Scheduler: Send {
    /// Arrange for `id` to be handed back to the service after `delay`.
    fn schedule(&mut self, delay: Duration, id: ContinuationId);

    /// Best-effort cancellation of a scheduled continuation.
    fn cancel(&mut self, id: ContinuationId);
}

#[derive(Debug, Default)]
struct ManualState {
    pending: Vec<(Duration, ContinuationId)>,
    cancelled: Vec<ContinuationId>,
}

/// Scheduler that only records requests; the test decides when a
/// continuation fires. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    /// Scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Scheduled and not cancelled, oldest first.
    pub fn pending(&self) -> Vec<(Duration, ContinuationId)> {
        self.lock().pending.clone()
    }

    /// Ids cancelled so far.
    pub fn cancelled(&self) -> Vec<ContinuationId> {
        self.lock().cancelled.clone()
    }

    /// Remove and return the oldest pending continuation.
    pub fn take_next(&self) -> Option<ContinuationId> {
        let mut state = self.lock();
        if state.pending.is_empty() {
            None
        } else {
            Some(state.pending.remove(0).1)
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, id: ContinuationId) {
        self.lock().pending.push((delay, id));
    }

    fn cancel(&mut self, id: ContinuationId) {
        let mut state = self.lock();
        state.pending.retain(|(_, p)| *p != id);
        state.cancelled.push(id);
    }
}
