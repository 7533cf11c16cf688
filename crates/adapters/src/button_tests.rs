// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn scripted_presses_are_returned_in_push_order() {
    let adapter = FakeButtonAdapter::new();
    adapter.push(ButtonMsg::PressShort);
    adapter.push(ButtonMsg::PressLong);

    assert_eq!(adapter.next_press().await.unwrap(), ButtonMsg::PressShort);
    assert_eq!(adapter.next_press().await.unwrap(), ButtonMsg::PressLong);
}

#[tokio::test]
async fn an_empty_script_reports_not_ready_instead_of_hanging() {
    let adapter = FakeButtonAdapter::new();
    assert!(adapter.next_press().await.is_err());
}
