// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tracker-core: shared data model for the asset tracker coordinator.
//!
//! Holds the types every other crate agrees on — channels and messages,
//! storage records, configuration, ids, the monotonic clock abstraction,
//! effects, and shared error types — but no behavior. Behavior lives in
//! `tracker-bus`, `tracker-supervisor`, `tracker-storage`,
//! `tracker-statemachine`, and `tracker-adapters`.

pub mod clock;
pub mod config;
pub mod effect;
pub mod error;
pub mod id;
pub mod ids;
pub mod message;
pub mod record;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{BackoffConfig, BackoffStrategy, Config, ConfigError, StorageInitialMode};
pub use effect::{Effect, Indicator};
pub use error::FatalError;
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use ids::{BatchSessionId, SubscriberId, TimerId};
pub use message::{
    ButtonMsg, Channel, CloudMsg, FotaMsg, LocationMsg, Message, ModeRejectReason, NetworkMsg,
    StorageMsg, TimerKind, TimerMsg,
};
pub use record::{BatteryRecord, DataType, EnvironmentalRecord, LocationRecord, Record};
