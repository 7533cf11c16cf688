// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn scheduling_a_timer_makes_it_pending() {
    let mut table = TimerTable::new();
    let now = Instant::now();
    table.schedule(TIMER_SAMPLE, now, Duration::from_secs(60));
    assert!(table.is_pending(TIMER_SAMPLE));
    assert_eq!(table.deadline(TIMER_SAMPLE), Some(now + Duration::from_secs(60)));
}

#[test]
fn rescheduling_replaces_the_pending_deadline() {
    let mut table = TimerTable::new();
    let now = Instant::now();
    table.schedule(TIMER_SAMPLE, now, Duration::from_secs(60));
    table.schedule(TIMER_SAMPLE, now, Duration::from_secs(30));
    assert_eq!(table.deadline(TIMER_SAMPLE), Some(now + Duration::from_secs(30)));
}

#[test]
fn cancel_clears_the_pending_entry_and_is_idempotent() {
    let mut table = TimerTable::new();
    let now = Instant::now();
    table.schedule(TIMER_SAMPLE, now, Duration::from_secs(60));
    table.cancel(TIMER_SAMPLE);
    assert!(!table.is_pending(TIMER_SAMPLE));
    // Cancelling again is harmless.
    table.cancel(TIMER_SAMPLE);
    assert!(!table.is_pending(TIMER_SAMPLE));
}

#[test]
fn cancel_all_clears_both_named_timers() {
    let mut table = TimerTable::new();
    let now = Instant::now();
    table.schedule(TIMER_SAMPLE, now, Duration::from_secs(60));
    table.schedule(TIMER_SEND, now, Duration::from_secs(1800));
    let effects = table.cancel_all();
    assert_eq!(effects.len(), 2);
    assert!(!table.is_pending(TIMER_SAMPLE));
    assert!(!table.is_pending(TIMER_SEND));
}
