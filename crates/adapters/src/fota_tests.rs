// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fake_adapter_records_image_apply() {
    let adapter = FakeFotaAdapter::new();
    adapter.poll_request().await.unwrap();
    adapter.image_apply().await.unwrap();
    assert_eq!(adapter.calls(), vec![FotaCall::PollRequest, FotaCall::ImageApply]);
}
