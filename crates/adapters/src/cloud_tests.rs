// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tracker_core::{BackoffConfig, BackoffStrategy};

fn schedule() -> BackoffSchedule {
    BackoffSchedule::new(BackoffConfig {
        strategy: BackoffStrategy::Exponential,
        initial_sec: 0,
        max_sec: 0,
    })
}

#[tokio::test]
async fn noop_adapter_accepts_every_call() {
    let adapter = NoopCloudAdapter;
    assert!(adapter.poll_shadow().await.is_ok());
    assert!(adapter.connect().await.is_ok());
}

#[tokio::test]
async fn connect_with_backoff_retries_until_success_then_resets() {
    let adapter = FakeCloudAdapter::new().fail_connects(2);
    let mut backoff = schedule();
    connect_with_backoff(&adapter, &mut backoff).await;

    assert_eq!(backoff.attempt(), 0, "schedule resets after success");
    assert_eq!(
        adapter.calls(),
        vec![CloudCall::Connect, CloudCall::Connect, CloudCall::Connect]
    );
}

#[tokio::test]
async fn connect_with_backoff_succeeds_immediately_when_the_first_attempt_works() {
    let adapter = FakeCloudAdapter::new();
    let mut backoff = schedule();
    connect_with_backoff(&adapter, &mut backoff).await;
    assert_eq!(adapter.calls(), vec![CloudCall::Connect]);
}
