// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Shared error type for every collaborator adapter.
///
/// Adapters recover locally (backoff, retry) and never surface an error
/// into the state machine's `dispatch`; this type exists for the daemon's
/// engine loop to log and, where the failure is unrecoverable, feed into
/// the supervisor's fatal path.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("peripheral not ready: {0}")]
    NotReady(String),
}
