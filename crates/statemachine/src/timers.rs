// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delayable-timer bookkeeping: named one-shot tasks with `schedule(delay)`,
//! `cancel()`, and at-most-one pending fire per name.
//!
//! Modeled on `oj-engine::scheduler::Scheduler`
//! (`set_timer`/`cancel_timer`/prefix-cancel), generalized to be
//! `Clock`-generic. The state machine itself never polls these deadlines —
//! firing happens externally and arrives back as a `TIMER.EXPIRED_*`
//! message — so this module exists purely so entry/exit handlers can ask
//! "is a timer already pending for this name" and so tests can assert on
//! scheduled deadlines directly.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracker_core::{Effect, TimerId};

pub const TIMER_SAMPLE: TimerId = TimerId::new(1);
pub const TIMER_SEND: TimerId = TimerId::new(2);

#[derive(Debug, Default)]
pub struct TimerTable {
    pending: HashMap<TimerId, Instant>,
}

impl TimerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule (or re-schedule, replacing any pending fire) a timer.
    pub fn schedule(&mut self, id: TimerId, now: Instant, duration: Duration) -> Effect {
        self.pending.insert(id, now + duration);
        Effect::SetTimer { id, duration }
    }

    /// Cancel a timer. Always emits the cancel effect since
    /// `Effect::CancelTimer` is a no-op on the receiving end if nothing was
    /// actually pending there.
    pub fn cancel(&mut self, id: TimerId) -> Effect {
        self.pending.remove(&id);
        Effect::CancelTimer { id }
    }

    pub fn cancel_all(&mut self) -> Vec<Effect> {
        vec![self.cancel(TIMER_SAMPLE), self.cancel(TIMER_SEND)]
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn deadline(&self, id: TimerId) -> Option<Instant> {
        self.pending.get(&id).copied()
    }
}

#[cfg(test)]
#[path = "timers_tests.rs"]
mod tests;
