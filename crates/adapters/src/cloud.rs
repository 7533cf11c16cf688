// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cloud adapter: shadow polling, JSON payload delivery,
//! provisioning, and connect backoff on transport failures. `CONNECTED` /
//! `DISCONNECTED` / `SHADOW_RESPONSE{_DELTA}` are published back by the
//! real adapter's own task; this trait covers what the core can ask of it.

use async_trait::async_trait;

use crate::backoff::BackoffSchedule;
use crate::error::AdapterError;

#[async_trait]
pub trait CloudAdapter: Send + Sync + 'static {
    async fn poll_shadow(&self) -> Result<(), AdapterError>;
    async fn send_payload(&self, json: String) -> Result<(), AdapterError>;
    async fn provisioning_request(&self) -> Result<(), AdapterError>;
    /// Attempt one connect, returning the transport error on failure so the
    /// caller can drive [`BackoffSchedule`] around it.
    async fn connect(&self) -> Result<(), AdapterError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCloudAdapter;

#[async_trait]
impl CloudAdapter for NoopCloudAdapter {
    async fn poll_shadow(&self) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn send_payload(&self, _json: String) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn provisioning_request(&self) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn connect(&self) -> Result<(), AdapterError> {
        Ok(())
    }
}

/// Drives `adapter.connect()` with backoff until it succeeds, or forever if
/// it never does — the caller decides whether repeated failure ever
/// escalates past "transient".
pub async fn connect_with_backoff<A: CloudAdapter + ?Sized>(
    adapter: &A,
    schedule: &mut BackoffSchedule,
) {
    loop {
        match adapter.connect().await {
            Ok(()) => {
                schedule.reset();
                return;
            }
            Err(e) => {
                let delay = schedule.next_delay();
                tracing::warn!(error = %e, ?delay, attempt = schedule.attempt(), "cloud connect failed, backing off");
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    pub enum CloudCall {
        PollShadow,
        SendPayload(String),
        ProvisioningRequest,
        Connect,
    }

    /// Scriptable: fails `connect()` the first `fail_connects_remaining`
    /// times, then succeeds. Lets tests exercise
    /// [`super::connect_with_backoff`] without a real sleep-free clock hook.
    #[derive(Clone, Default)]
    pub struct FakeCloudAdapter {
        calls: Arc<Mutex<Vec<CloudCall>>>,
        fail_connects_remaining: Arc<AtomicUsize>,
    }

    impl FakeCloudAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_connects(self, times: usize) -> Self {
            self.fail_connects_remaining.store(times, Ordering::SeqCst);
            self
        }

        pub fn calls(&self) -> Vec<CloudCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl CloudAdapter for FakeCloudAdapter {
        async fn poll_shadow(&self) -> Result<(), AdapterError> {
            self.calls.lock().push(CloudCall::PollShadow);
            Ok(())
        }

        async fn send_payload(&self, json: String) -> Result<(), AdapterError> {
            self.calls.lock().push(CloudCall::SendPayload(json));
            Ok(())
        }

        async fn provisioning_request(&self) -> Result<(), AdapterError> {
            self.calls.lock().push(CloudCall::ProvisioningRequest);
            Ok(())
        }

        async fn connect(&self) -> Result<(), AdapterError> {
            self.calls.lock().push(CloudCall::Connect);
            let remaining = self.fail_connects_remaining.load(Ordering::SeqCst);
            if remaining > 0 {
                self.fail_connects_remaining
                    .store(remaining - 1, Ordering::SeqCst);
                return Err(AdapterError::Transport("simulated failure".to_string()));
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{CloudCall, FakeCloudAdapter};

#[cfg(test)]
#[path = "cloud_tests.rs"]
mod tests;
