// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Location (GNSS) adapter: the core only ever triggers or
//! cancels a search and forwards assistance data; `SEARCH_DONE`/`GNSS_DATA`
//! arrive back on the bus from the adapter's own task.

use async_trait::async_trait;

use crate::error::AdapterError;

#[async_trait]
pub trait LocationAdapter: Send + Sync + 'static {
    async fn search_trigger(&self) -> Result<(), AdapterError>;
    async fn search_cancel(&self) -> Result<(), AdapterError>;
    async fn agnss_data(&self, data: Vec<u8>) -> Result<(), AdapterError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLocationAdapter;

#[async_trait]
impl LocationAdapter for NoopLocationAdapter {
    async fn search_trigger(&self) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn search_cancel(&self) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn agnss_data(&self, _data: Vec<u8>) -> Result<(), AdapterError> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    pub enum LocationCall {
        SearchTrigger,
        SearchCancel,
        AgnssData(Vec<u8>),
    }

    #[derive(Clone, Default)]
    pub struct FakeLocationAdapter {
        calls: Arc<Mutex<Vec<LocationCall>>>,
    }

    impl FakeLocationAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<LocationCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl LocationAdapter for FakeLocationAdapter {
        async fn search_trigger(&self) -> Result<(), AdapterError> {
            self.calls.lock().push(LocationCall::SearchTrigger);
            Ok(())
        }

        async fn search_cancel(&self) -> Result<(), AdapterError> {
            self.calls.lock().push(LocationCall::SearchCancel);
            Ok(())
        }

        async fn agnss_data(&self, data: Vec<u8>) -> Result<(), AdapterError> {
            self.calls.lock().push(LocationCall::AgnssData(data));
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLocationAdapter, LocationCall};

#[cfg(test)]
#[path = "location_tests.rs"]
mod tests;
