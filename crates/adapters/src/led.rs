// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! LED indicator adapter: translates
//! an `Indicator` effect into whatever the board's LED driver needs.

use async_trait::async_trait;
use tracker_core::Indicator;

use crate::error::AdapterError;

#[async_trait]
pub trait LedAdapter: Send + Sync + 'static {
    async fn set_indicator(&self, indicator: Indicator) -> Result<(), AdapterError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLedAdapter;

#[async_trait]
impl LedAdapter for NoopLedAdapter {
    async fn set_indicator(&self, _indicator: Indicator) -> Result<(), AdapterError> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    pub struct FakeLedAdapter {
        last: Arc<Mutex<Option<Indicator>>>,
    }

    impl FakeLedAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn last(&self) -> Option<Indicator> {
            self.last.lock().clone()
        }
    }

    #[async_trait]
    impl LedAdapter for FakeLedAdapter {
        async fn set_indicator(&self, indicator: Indicator) -> Result<(), AdapterError> {
            *self.last.lock() = Some(indicator);
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLedAdapter;

#[cfg(test)]
#[path = "led_tests.rs"]
mod tests;
