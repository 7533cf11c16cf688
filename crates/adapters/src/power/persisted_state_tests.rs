// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn encode_then_decode_round_trips() {
    let state = PersistedFuelState {
        millivolts: 3721,
        state_of_charge_pct: 64,
    };
    assert_eq!(PersistedFuelState::decode(&state.encode()), Some(state));
}

#[parameterized(
    wrong_size = { vec![0u8; 4] },
    wrong_magic = { { let mut b = PersistedFuelState { millivolts: 1, state_of_charge_pct: 1 }.encode().to_vec(); b[0] = 0; b } },
    charge_out_of_range = { { let mut b = PersistedFuelState { millivolts: 1, state_of_charge_pct: 1 }.encode().to_vec(); b[6] = 200; b } },
)]
fn invalid_blobs_decode_to_absent(bytes: Vec<u8>) {
    assert_eq!(PersistedFuelState::decode(&bytes), None);
}

#[test]
fn an_empty_region_is_absent() {
    assert_eq!(PersistedFuelState::decode(&[]), None);
}
