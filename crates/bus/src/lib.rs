// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tracker-bus: the typed in-process publish/subscribe bus.

mod bus;
mod error;
mod subscriber;

pub use bus::{Bus, PublishOutcome};
pub use error::BusError;
pub use subscriber::{Delivery, Subscriber, WaitResult};
