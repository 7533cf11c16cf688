// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Button adapter: a pure event source. The real adapter
//! blocks on a GPIO edge interrupt; the fake lets tests script a sequence
//! of presses for the state machine to react to.

use async_trait::async_trait;
use tracker_core::ButtonMsg;

use crate::error::AdapterError;

#[async_trait]
pub trait ButtonAdapter: Send + Sync + 'static {
    /// Block until the next button press, short or long.
    async fn next_press(&self) -> Result<ButtonMsg, AdapterError>;
}

/// Never produces a press; used where no physical button is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopButtonAdapter;

#[async_trait]
impl ButtonAdapter for NoopButtonAdapter {
    async fn next_press(&self) -> Result<ButtonMsg, AdapterError> {
        std::future::pending().await
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::Arc;

    /// Scriptable press queue; `next_press` pops from the front and errors
    /// once the script runs dry, rather than hanging forever like the real
    /// adapter would — tests want a clear failure, not a timeout.
    #[derive(Clone, Default)]
    pub struct FakeButtonAdapter {
        queue: Arc<Mutex<VecDeque<ButtonMsg>>>,
    }

    impl FakeButtonAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(&self, press: ButtonMsg) {
            self.queue.lock().push_back(press);
        }
    }

    #[async_trait]
    impl ButtonAdapter for FakeButtonAdapter {
        async fn next_press(&self) -> Result<ButtonMsg, AdapterError> {
            self.queue
                .lock()
                .pop_front()
                .ok_or_else(|| AdapterError::NotReady("no scripted button press remaining".to_string()))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeButtonAdapter;

#[cfg(test)]
#[path = "button_tests.rs"]
mod tests;
