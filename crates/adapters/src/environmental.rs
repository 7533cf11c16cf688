// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environmental sensor adapter: request/response pair for
//! temperature/humidity/pressure. The core only ever requests a sample; the
//! response arrives on `SensorResponse(DataType::Environmental)`.

use async_trait::async_trait;

use crate::error::AdapterError;

#[async_trait]
pub trait EnvironmentalAdapter: Send + Sync + 'static {
    async fn sample_environmental(&self) -> Result<(), AdapterError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnvironmentalAdapter;

#[async_trait]
impl EnvironmentalAdapter for NoopEnvironmentalAdapter {
    async fn sample_environmental(&self) -> Result<(), AdapterError> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    pub struct FakeEnvironmentalAdapter {
        samples: Arc<AtomicUsize>,
    }

    impl FakeEnvironmentalAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn sample_count(&self) -> usize {
            self.samples.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EnvironmentalAdapter for FakeEnvironmentalAdapter {
        async fn sample_environmental(&self) -> Result<(), AdapterError> {
            self.samples.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeEnvironmentalAdapter;

#[cfg(test)]
#[path = "environmental_tests.rs"]
mod tests;
