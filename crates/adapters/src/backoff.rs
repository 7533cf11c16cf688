// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cloud connect backoff.
//!
//! `spec.md` leaves the exact curve a source-variant question; this picks
//! one configurable policy (`tracker_core::BackoffConfig`) rather than
//! hardcoding either shape, the same way `groblegark-coop`'s token refresh
//! doubles its delay with a cap (`crates/mux/src/credential/refresh.rs`).

use std::time::Duration;
use tracker_core::{BackoffConfig, BackoffStrategy};

/// Tracks the next retry delay for a single connect loop.
#[derive(Debug, Clone)]
pub struct BackoffSchedule {
    config: BackoffConfig,
    attempt: u32,
}

impl BackoffSchedule {
    pub fn new(config: BackoffConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Delay to wait before the next connect attempt, then advance the
    /// schedule. The first call after construction or [`reset`] always
    /// returns `initial_sec`.
    ///
    /// [`reset`]: Self::reset
    pub fn next_delay(&mut self) -> Duration {
        let secs = match self.config.strategy {
            BackoffStrategy::Linear => {
                let step = self.config.initial_sec.saturating_mul(self.attempt + 1);
                step.min(self.config.max_sec)
            }
            BackoffStrategy::Exponential => {
                let factor = 1u32.checked_shl(self.attempt).unwrap_or(u32::MAX);
                self.config
                    .initial_sec
                    .saturating_mul(factor)
                    .min(self.config.max_sec)
            }
        };
        self.attempt = self.attempt.saturating_add(1);
        Duration::from_secs(secs as u64)
    }

    /// Reset after a successful connect, so the next failure starts the
    /// schedule over from `initial_sec`.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
