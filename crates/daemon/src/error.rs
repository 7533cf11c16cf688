// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level daemon error: wraps every crate-local error
//! type at the one boundary allowed to see all of them, the same layering
//! `tracker-core::error`'s doc comment describes for `FatalError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("config error: {0}")]
    Config(#[from] tracker_core::ConfigError),
    #[error("state machine construction failed: {0}")]
    StateMachine(#[from] tracker_statemachine::StateMachineError),
    #[error("supervisor budget invalid: {0}")]
    Supervisor(#[from] tracker_supervisor::SupervisorError),
    #[error("protocol error: {0}")]
    Protocol(#[from] crate::protocol::ProtocolError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
