// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn an_inactive_cancel_is_still_recorded_as_a_no_op_call() {
    let adapter = FakeLocationAdapter::new();
    adapter.search_cancel().await.unwrap();
    assert_eq!(adapter.calls(), vec![LocationCall::SearchCancel]);
}

#[tokio::test]
async fn search_trigger_then_cancel_is_recorded_in_order() {
    let adapter = FakeLocationAdapter::new();
    adapter.search_trigger().await.unwrap();
    adapter.search_cancel().await.unwrap();
    assert_eq!(
        adapter.calls(),
        vec![LocationCall::SearchTrigger, LocationCall::SearchCancel]
    );
}
