// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tracker-adapters: collaborator adapter traits plus
//! `Fake*`/`Noop*` implementations.
//!
//! Each adapter is a thin `async_trait` facade the core can call into;
//! `CONNECTED`/`SEARCH_DONE`/etc. events flow back onto the bus from the
//! adapter's own task, never as a direct return value — these traits only
//! cover the half of `spec.md` §4.5 the core drives (requests, not the
//! events the adapter's background task emits on its own schedule).

mod backoff;
mod button;
mod cloud;
mod environmental;
mod error;
mod fota;
mod led;
mod location;
mod network;
mod power;
mod shadow_json;

pub use backoff::BackoffSchedule;
pub use button::{ButtonAdapter, NoopButtonAdapter};
pub use cloud::{connect_with_backoff, CloudAdapter, NoopCloudAdapter};
pub use environmental::{EnvironmentalAdapter, NoopEnvironmentalAdapter};
pub use error::AdapterError;
pub use fota::{FotaAdapter, NoopFotaAdapter};
pub use led::{LedAdapter, NoopLedAdapter};
pub use location::{LocationAdapter, NoopLocationAdapter};
pub use network::{NetworkAdapter, NoopNetworkAdapter, SystemMode};
pub use power::persisted_state::PersistedFuelState;
pub use power::{NoopPowerAdapter, PowerAdapter};
pub use shadow_json::JsonShadowParser;

#[cfg(any(test, feature = "test-support"))]
pub use button::FakeButtonAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use cloud::{CloudCall, FakeCloudAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use environmental::FakeEnvironmentalAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use fota::{FakeFotaAdapter, FotaCall};
#[cfg(any(test, feature = "test-support"))]
pub use led::FakeLedAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use location::{FakeLocationAdapter, LocationCall};
#[cfg(any(test, feature = "test-support"))]
pub use network::{FakeNetworkAdapter, NetworkCall};
#[cfg(any(test, feature = "test-support"))]
pub use power::FakePowerAdapter;
