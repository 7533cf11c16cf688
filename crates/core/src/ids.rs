// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete id newtypes used across the workspace.

crate::define_id! {
    /// Identifies a batch read session.
    pub struct BatchSessionId;
}

crate::define_id! {
    /// Identifies a scheduled delayable timer.
    pub struct TimerId;
}

crate::define_id! {
    /// Identifies a bus subscriber.
    pub struct SubscriberId;
}
