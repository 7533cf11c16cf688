// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;
use tracker_core::SubscriberId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BusError {
    /// The publish did not complete within its caller-chosen timeout
    /// (`spec.md` §4.1: "a publish completes within its caller-chosen
    /// timeout or fails").
    #[error("publish did not complete within the timeout")]
    Timeout,

    /// One or more subscribers' queues were full; everyone else still got
    /// the message (`spec.md` §4.1: "this is surfaced to the publisher as a
    /// partial-delivery error; other subscribers still receive the
    /// message").
    #[error("queue full for subscriber(s): {failed:?}")]
    QueueFull { failed: Vec<SubscriberId> },
}
