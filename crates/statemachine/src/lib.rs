// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tracker-statemachine: the hierarchical application state machine
//! that decides what the tracker does in response to
//! every message on the bus.

mod context;
mod error;
mod machine;
mod shadow;
mod state;
mod timers;

pub use context::StateContext;
pub use error::StateMachineError;
pub use machine::StateMachine;
pub use shadow::{ShadowCommand, ShadowFields, ShadowParseError, ShadowParser};
pub use state::AppState;
pub use timers::{TimerTable, TIMER_SAMPLE, TIMER_SEND};
