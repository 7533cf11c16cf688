// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monotonic clock abstraction.
//!
//! The state machine, supervisor, and storage engine all reason about
//! elapsed time in monotonic seconds. Going through this trait instead of
//! `Instant::now()` directly lets tests drive time deterministically with
//! `FakeClock`.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of monotonic time.
pub trait Clock: Send + Sync {
    /// Opaque monotonic instant, usable only for measuring elapsed `Duration`s.
    fn now(&self) -> Instant;

    /// Monotonic seconds since some fixed (clock-specific) epoch.
    ///
    /// Only differences between two calls are meaningful.
    fn now_secs(&self) -> u64 {
        duration_to_secs(self.now().duration_since(self.origin()))
    }

    /// The instant this clock treats as zero.
    fn origin(&self) -> Instant;
}

fn duration_to_secs(d: Duration) -> u64 {
    d.as_secs()
}

/// Real wall/monotonic clock backed by `std::time::Instant`.
#[derive(Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn origin(&self) -> Instant {
        self.origin
    }
}

/// Deterministic clock for tests: time only advances when told to.
#[derive(Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeClockInner>>,
}

struct FakeClockInner {
    origin: Instant,
    current: Instant,
}

impl FakeClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            inner: Arc::new(Mutex::new(FakeClockInner {
                origin: now,
                current: now,
            })),
        }
    }

    /// Advance the clock by `d`.
    pub fn advance(&self, d: Duration) {
        let mut inner = self.inner.lock();
        inner.current += d;
    }

    /// Advance the clock by a whole number of seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.inner.lock().current
    }

    fn origin(&self) -> Instant {
        self.inner.lock().origin
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
