// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Liveness supervisor.
//!
//! Each long-running task registers a [`Budget`] and calls
//! [`TaskHandle::feed`] before every `bus.wait`. A background sweep
//! ([`Supervisor::check_now`], normally driven by [`Supervisor::run`])
//! compares the time since each task's last feed against its `budget_ms`
//! and invokes the fatal handler, naming the offending task, the moment a
//! task goes quiet for longer than its budget allows — this is what catches
//! a task wedged inside a single `bus.wait` call, not just one that never
//! gets back around to its next `feed()`.

use crate::budget::Budget;
use crate::error::SupervisorError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracker_core::Clock;
use tracing::error;

/// Invoked with the name of a task whose budget was exceeded.
pub trait FatalHandler: Send + Sync {
    fn on_fatal(&self, task: &str, budget: Budget);
}

impl<F> FatalHandler for F
where
    F: Fn(&str, Budget) + Send + Sync,
{
    fn on_fatal(&self, task: &str, budget: Budget) {
        self(task, budget)
    }
}

struct TaskState {
    budget: Budget,
    last_fed: Instant,
    /// Once a task has been reported fatal we don't re-report it every
    /// sweep; the fatal handler owns what happens next (typically a
    /// reboot).
    reported: bool,
}

struct SupervisorInner<C: Clock> {
    clock: C,
    tasks: Mutex<HashMap<String, TaskState>>,
    fatal_handler: Arc<dyn FatalHandler>,
}

/// Process-wide watchdog (`spec.md` §9: "process-wide singletons ... tests
/// construct a fresh instance per case").
#[derive(Clone)]
pub struct Supervisor<C: Clock> {
    inner: Arc<SupervisorInner<C>>,
}

impl<C: Clock + Clone> Supervisor<C> {
    pub fn new(clock: C, fatal_handler: Arc<dyn FatalHandler>) -> Self {
        Self {
            inner: Arc::new(SupervisorInner {
                clock,
                tasks: Mutex::new(HashMap::new()),
                fatal_handler,
            }),
        }
    }

    /// Register a task, returning a handle it uses to feed the watchdog.
    pub fn register(
        &self,
        name: impl Into<String>,
        budget: Budget,
    ) -> TaskHandle<C> {
        let name = name.into();
        let now = self.inner.clock.now();
        self.inner.tasks.lock().insert(
            name.clone(),
            TaskState {
                budget,
                last_fed: now,
                reported: false,
            },
        );
        TaskHandle {
            supervisor: self.clone(),
            name,
        }
    }

    fn feed(&self, name: &str) -> Result<(), SupervisorError> {
        let now = self.inner.clock.now();
        let mut tasks = self.inner.tasks.lock();
        let state = tasks
            .get_mut(name)
            .ok_or_else(|| SupervisorError::UnknownTask(name.to_string()))?;
        state.last_fed = now;
        state.reported = false;
        Ok(())
    }

    /// Run one sweep over all registered tasks, invoking the fatal handler
    /// for any whose budget has been exceeded since their last feed.
    pub fn check_now(&self) {
        let now = self.inner.clock.now();
        let mut tasks = self.inner.tasks.lock();
        for (name, state) in tasks.iter_mut() {
            if state.reported {
                continue;
            }
            let elapsed = now.saturating_duration_since(state.last_fed);
            if elapsed > state.budget.budget_ms {
                error!(task = %name, ?elapsed, budget_ms = ?state.budget.budget_ms, "watchdog budget exceeded");
                state.reported = true;
                self.inner.fatal_handler.on_fatal(name, state.budget);
            }
        }
    }

    /// Run the sweep loop forever, polling every `interval`. Spawned as a
    /// background task by the daemon; `check_now` is what tests call
    /// directly against a `FakeClock`.
    pub async fn run(&self, interval: std::time::Duration) -> ! {
        loop {
            tokio::time::sleep(interval).await;
            self.check_now();
        }
    }
}

/// A registered task's handle into the supervisor.
#[derive(Clone)]
pub struct TaskHandle<C: Clock> {
    supervisor: Supervisor<C>,
    name: String,
}

impl<C: Clock + Clone> TaskHandle<C> {
    /// Call before every `bus.wait`.
    pub fn feed(&self) {
        if let Err(e) = self.supervisor.feed(&self.name) {
            // Only reachable if the task outlived its own registration
            // bookkeeping being dropped, which never happens in practice
            // since the handle and the registry entry share a lifetime.
            error!(task = %self.name, error = %e, "feed on unregistered task");
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
