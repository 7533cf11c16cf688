// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error kinds shared across crates.
//!
//! Crate-specific errors (bus, storage, supervisor, state machine) live in
//! their owning crate and wrap into this enum only at the daemon boundary,
//! the same layering the teacher uses (`oj-engine::RuntimeError` wraps
//! `ExecuteError` but storage/adapters keep their own error types).

use thiserror::Error;

/// An error severe enough to break an invariant (`spec.md` §7: "Invariant
/// violation ... the fatal handler is invoked ... the system transitions to
/// a reboot").
#[derive(Debug, Error, Clone, PartialEq)]
#[error("fatal error in task '{task}': {reason}")]
pub struct FatalError {
    pub task: String,
    pub reason: String,
}

impl FatalError {
    pub fn new(task: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            reason: reason.into(),
        }
    }
}
