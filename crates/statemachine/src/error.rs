// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateMachineError {
    /// Every enabled sensor must be messaged once per cycle; an empty list
    /// can never satisfy that, so construction rejects it rather than
    /// silently sampling nothing.
    #[error("at least one sensor must be enabled")]
    NoEnabledSensors,
}
