// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The hierarchical state set.
//!
//! Rust has no subclassing, so "inheritance of state behavior" (§9) is
//! expressed as a flat enum plus a `path()` table giving each leaf's
//! ancestor chain from `Root`. Dispatch walks that chain child-first,
//! looking for the first level whose `run` handler claims the message.

use tracker_core::StorageInitialMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppState {
    Root,
    Running,
    BufferMode,
    BufferDisconnected,
    BdSampling,
    BdWaiting,
    BufferConnected,
    BcSampling,
    BcWaiting,
    PassthroughMode,
    PtDisconnected,
    PtConnectedSampling,
    PtConnectedWaiting,
    Fota,
    FotaDownloading,
    FotaWaitDisconnect,
    FotaWaitDisconnectToApply,
    FotaApplyingImage,
    FotaRebooting,
}

impl AppState {
    /// True for the 12 states that are actually dispatched to (the rest are
    /// composite/organizational nodes that only contribute entry/exit/run
    /// behavior along the path).
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            AppState::BdSampling
                | AppState::BdWaiting
                | AppState::BcSampling
                | AppState::BcWaiting
                | AppState::PtDisconnected
                | AppState::PtConnectedSampling
                | AppState::PtConnectedWaiting
                | AppState::FotaDownloading
                | AppState::FotaWaitDisconnect
                | AppState::FotaWaitDisconnectToApply
                | AppState::FotaApplyingImage
                | AppState::FotaRebooting
        )
    }

    /// Ancestor chain from `Root` down to (and including) this leaf.
    pub fn path(self) -> &'static [AppState] {
        use AppState::*;
        match self {
            Root => &[Root],
            Running => &[Root, Running],
            BufferMode => &[Root, Running, BufferMode],
            BufferDisconnected => &[Root, Running, BufferMode, BufferDisconnected],
            BdSampling => &[Root, Running, BufferMode, BufferDisconnected, BdSampling],
            BdWaiting => &[Root, Running, BufferMode, BufferDisconnected, BdWaiting],
            BufferConnected => &[Root, Running, BufferMode, BufferConnected],
            BcSampling => &[Root, Running, BufferMode, BufferConnected, BcSampling],
            BcWaiting => &[Root, Running, BufferMode, BufferConnected, BcWaiting],
            PassthroughMode => &[Root, Running, PassthroughMode],
            PtDisconnected => &[Root, Running, PassthroughMode, PtDisconnected],
            PtConnectedSampling => &[Root, Running, PassthroughMode, PtConnectedSampling],
            PtConnectedWaiting => &[Root, Running, PassthroughMode, PtConnectedWaiting],
            Fota => &[Root, Fota],
            FotaDownloading => &[Root, Fota, FotaDownloading],
            FotaWaitDisconnect => &[Root, Fota, FotaWaitDisconnect],
            FotaWaitDisconnectToApply => &[Root, Fota, FotaWaitDisconnectToApply],
            FotaApplyingImage => &[Root, Fota, FotaApplyingImage],
            FotaRebooting => &[Root, Fota, FotaRebooting],
        }
    }

    /// Resolve a (possibly composite) transition target down to the leaf
    /// that must actually be entered, following each level's initial child.
    pub fn resolve_leaf(self, initial_mode: StorageInitialMode) -> AppState {
        use AppState::*;
        match self {
            Running => match initial_mode {
                StorageInitialMode::Buffer => BufferMode.resolve_leaf(initial_mode),
                StorageInitialMode::Passthrough => PassthroughMode.resolve_leaf(initial_mode),
            },
            BufferMode => BufferDisconnected.resolve_leaf(initial_mode),
            BufferDisconnected => BdSampling,
            BufferConnected => BcSampling,
            PassthroughMode => PtDisconnected,
            Fota => FotaDownloading,
            leaf => leaf,
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
