// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Network (modem) adapter: connect/disconnect, quality and
//! system-mode queries. Published events (`CONNECTED`, `SEARCH_DONE`,
//! `UICC_FAILURE`, ...) are the real adapter's own task's concern; this
//! trait covers only what the core can ask of it.

use async_trait::async_trait;

use crate::error::AdapterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemMode {
    Lte,
    NbIot,
    GnssOnly,
}

#[async_trait]
pub trait NetworkAdapter: Send + Sync + 'static {
    async fn connect(&self) -> Result<(), AdapterError>;
    async fn disconnect(&self) -> Result<(), AdapterError>;
    async fn request_quality_sample(&self) -> Result<(), AdapterError>;
    async fn request_system_mode(&self) -> Result<(), AdapterError>;
    async fn set_system_mode(&self, mode: SystemMode) -> Result<(), AdapterError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNetworkAdapter;

#[async_trait]
impl NetworkAdapter for NoopNetworkAdapter {
    async fn connect(&self) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn request_quality_sample(&self) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn request_system_mode(&self) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn set_system_mode(&self, _mode: SystemMode) -> Result<(), AdapterError> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    pub enum NetworkCall {
        Connect,
        Disconnect,
        RequestQualitySample,
        RequestSystemMode,
        SetSystemMode(SystemMode),
    }

    #[derive(Clone, Default)]
    pub struct FakeNetworkAdapter {
        calls: Arc<Mutex<Vec<NetworkCall>>>,
    }

    impl FakeNetworkAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<NetworkCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl NetworkAdapter for FakeNetworkAdapter {
        async fn connect(&self) -> Result<(), AdapterError> {
            self.calls.lock().push(NetworkCall::Connect);
            Ok(())
        }

        async fn disconnect(&self) -> Result<(), AdapterError> {
            self.calls.lock().push(NetworkCall::Disconnect);
            Ok(())
        }

        async fn request_quality_sample(&self) -> Result<(), AdapterError> {
            self.calls.lock().push(NetworkCall::RequestQualitySample);
            Ok(())
        }

        async fn request_system_mode(&self) -> Result<(), AdapterError> {
            self.calls.lock().push(NetworkCall::RequestSystemMode);
            Ok(())
        }

        async fn set_system_mode(&self, mode: SystemMode) -> Result<(), AdapterError> {
            self.calls.lock().push(NetworkCall::SetSystemMode(mode));
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNetworkAdapter, NetworkCall};

#[cfg(test)]
#[path = "network_tests.rs"]
mod tests;
