// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Power (fuel gauge / PMIC) adapter. The core only
//! ever requests a sample; the response arrives on
//! `SensorResponse(DataType::Battery)`. Battery-drain detection is
//! adapter-local and out of scope here.

use async_trait::async_trait;

use crate::error::AdapterError;

pub mod persisted_state;

#[async_trait]
pub trait PowerAdapter: Send + Sync + 'static {
    /// `power sample` control-surface command and the state machine's
    /// periodic battery sample request both funnel through here.
    async fn sample_battery(&self) -> Result<(), AdapterError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPowerAdapter;

#[async_trait]
impl PowerAdapter for NoopPowerAdapter {
    async fn sample_battery(&self) -> Result<(), AdapterError> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    pub struct FakePowerAdapter {
        samples: Arc<AtomicUsize>,
    }

    impl FakePowerAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn sample_count(&self) -> usize {
            self.samples.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PowerAdapter for FakePowerAdapter {
        async fn sample_battery(&self) -> Result<(), AdapterError> {
            self.samples.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePowerAdapter;

#[cfg(test)]
#[path = "power_tests.rs"]
mod tests;
