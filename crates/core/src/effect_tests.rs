// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::message::{FotaMsg, Message};

#[test]
fn name_is_stable_per_variant() {
    let effect = Effect::Publish {
        message: Message::Fota(FotaMsg::PollRequest),
        timeout: Duration::from_secs(1),
    };
    assert_eq!(effect.name(), "publish");

    let effect = Effect::Reboot {
        reason: "fatal".into(),
    };
    assert_eq!(effect.name(), "reboot");
}
