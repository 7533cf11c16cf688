// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;
use tracker_core::message::ModeRejectReason;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A mode change is rejected while a batch session is active.
    #[error("mode change rejected: {reason:?}")]
    ModeChangeRejected { reason: ModeRejectReason },

    /// Clearing storage while a batch session is active is rejected
    /// outright rather than deferred until close.
    #[error("storage clear rejected: a batch session is active")]
    ClearRejected,
}
