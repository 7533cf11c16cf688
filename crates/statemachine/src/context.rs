// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State context: the mutable data threaded alongside the
//! current `AppState`.

use crate::state::AppState;
use tracker_core::{BatchSessionId, Channel, Message};

#[derive(Debug, Clone)]
pub struct StateContext {
    /// Last channel/message observed, consumed by the current state's run
    /// handler (also passed directly into `dispatch`, kept here too so
    /// handlers and tests can inspect what was last seen).
    pub last: Option<(Channel, Message)>,
    pub sample_interval_sec: u32,
    pub data_send_interval_sec: u32,
    /// Monotonic seconds; `0` means "no prior sample".
    pub sample_start_time: u64,
    /// The `RUNNING` leaf FOTA must resume to on failure/cancel/timeout.
    pub running_history: AppState,
    pub batch_session_id: BatchSessionId,
}

impl StateContext {
    pub fn new(sample_interval_sec: u32, data_send_interval_sec: u32, running_history: AppState) -> Self {
        Self {
            last: None,
            sample_interval_sec,
            data_send_interval_sec,
            sample_start_time: 0,
            running_history,
            batch_session_id: BatchSessionId::none(),
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
