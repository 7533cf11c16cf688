// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! FOTA adapter: the firmware-update side channel the
//! state machine drives via `POLL_REQUEST`/`IMAGE_APPLY`/`DOWNLOAD_CANCEL`.

use async_trait::async_trait;

use crate::error::AdapterError;

#[async_trait]
pub trait FotaAdapter: Send + Sync + 'static {
    async fn poll_request(&self) -> Result<(), AdapterError>;
    async fn image_apply(&self) -> Result<(), AdapterError>;
    async fn download_cancel(&self) -> Result<(), AdapterError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFotaAdapter;

#[async_trait]
impl FotaAdapter for NoopFotaAdapter {
    async fn poll_request(&self) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn image_apply(&self) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn download_cancel(&self) -> Result<(), AdapterError> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FotaCall {
        PollRequest,
        ImageApply,
        DownloadCancel,
    }

    #[derive(Clone, Default)]
    pub struct FakeFotaAdapter {
        calls: Arc<Mutex<Vec<FotaCall>>>,
    }

    impl FakeFotaAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<FotaCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl FotaAdapter for FakeFotaAdapter {
        async fn poll_request(&self) -> Result<(), AdapterError> {
            self.calls.lock().push(FotaCall::PollRequest);
            Ok(())
        }

        async fn image_apply(&self) -> Result<(), AdapterError> {
            self.calls.lock().push(FotaCall::ImageApply);
            Ok(())
        }

        async fn download_cancel(&self) -> Result<(), AdapterError> {
            self.calls.lock().push(FotaCall::DownloadCancel);
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeFotaAdapter, FotaCall};

#[cfg(test)]
#[path = "fota_tests.rs"]
mod tests;
