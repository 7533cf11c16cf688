// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::shadow::{ShadowFields, ShadowParseError};
use std::time::Duration;
use tracker_core::{
    BatteryRecord, ButtonMsg, Channel, CloudMsg, DataType, Effect, FakeClock, FotaMsg, Indicator,
    LocationMsg, Message, NetworkMsg, Record, StorageInitialMode, StorageMsg, TimerKind, TimerMsg,
};

struct NoopParser;

impl ShadowParser for NoopParser {
    fn parse(&self, _buf: &[u8]) -> Result<ShadowFields, ShadowParseError> {
        Ok(ShadowFields::default())
    }
}

struct ScriptedParser(ShadowFields);

impl ShadowParser for ScriptedParser {
    fn parse(&self, _buf: &[u8]) -> Result<ShadowFields, ShadowParseError> {
        Ok(self.0)
    }
}

struct FailingParser;

impl ShadowParser for FailingParser {
    fn parse(&self, _buf: &[u8]) -> Result<ShadowFields, ShadowParseError> {
        Err(ShadowParseError)
    }
}

fn sensors() -> Vec<DataType> {
    vec![DataType::Battery, DataType::Environmental, DataType::Location]
}

fn machine(mode: StorageInitialMode) -> StateMachine<FakeClock> {
    StateMachine::new(FakeClock::new(), mode, 60, 1800, sensors(), Box::new(NoopParser))
        .expect("non-empty sensor list")
}

fn booted(mode: StorageInitialMode) -> StateMachine<FakeClock> {
    let mut m = machine(mode);
    m.boot();
    m
}

fn has_publish(effects: &[Effect], expected: &Message) -> bool {
    effects
        .iter()
        .any(|e| matches!(e, Effect::Publish { message, .. } if message == expected))
}

fn has_set_timer(effects: &[Effect]) -> bool {
    effects.iter().any(|e| matches!(e, Effect::SetTimer { .. }))
}

#[test]
fn constructing_with_no_enabled_sensors_is_rejected() {
    let err = StateMachine::new(FakeClock::new(), StorageInitialMode::Buffer, 60, 1800, vec![], Box::new(NoopParser));
    assert_eq!(err.unwrap_err(), StateMachineError::NoEnabledSensors);
}

#[test]
fn boot_resolves_to_the_buffer_disconnected_sampling_leaf_by_default() {
    let m = booted(StorageInitialMode::Buffer);
    assert_eq!(m.state(), AppState::BdSampling);
}

#[test]
fn boot_resolves_to_passthrough_disconnected_when_configured() {
    let m = booted(StorageInitialMode::Passthrough);
    assert_eq!(m.state(), AppState::PtDisconnected);
}

#[test]
fn boot_requests_a_location_search_and_sets_the_sampling_indicator() {
    let mut m = machine(StorageInitialMode::Buffer);
    let effects = m.boot();
    assert!(has_publish(&effects, &Message::Location(LocationMsg::SearchTrigger)));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::SetIndicator { indicator } if *indicator == Indicator::Sampling)));
}

/// Scenario 1: BD_SAMPLING -> search done -> sensor requests
/// published, transitions to BD_WAITING with the sample timer armed.
#[test]
fn search_done_in_buffer_disconnected_sampling_publishes_sensor_requests_and_arms_the_wait_timer() {
    let mut m = booted(StorageInitialMode::Buffer);
    let effects = m.dispatch(Channel::Location, Message::Location(LocationMsg::SearchDone));
    assert_eq!(m.state(), AppState::BdWaiting);
    for dt in sensors() {
        assert!(has_publish(&effects, &Message::SensorRequest { data_type: dt }));
    }
    assert!(has_set_timer(&effects));
}

/// Scenario 2: the sample timer firing while waiting (disconnected) moves
/// back into sampling.
#[test]
fn sample_timer_expiry_while_waiting_returns_to_sampling() {
    let mut m = booted(StorageInitialMode::Buffer);
    m.dispatch(Channel::Location, Message::Location(LocationMsg::SearchDone));
    assert_eq!(m.state(), AppState::BdWaiting);
    let effects = m.dispatch(Channel::Timer, Message::Timer(TimerMsg::Expired(TimerKind::SampleData)));
    assert_eq!(m.state(), AppState::BdSampling);
    assert!(has_publish(&effects, &Message::Location(LocationMsg::SearchTrigger)));
}

/// Scenario 3: CLOUD.CONNECTED while disconnected moves BUFFER_DISCONNECTED
/// -> BUFFER_CONNECTED and running_history follows.
#[test]
fn cloud_connected_moves_buffer_disconnected_to_buffer_connected() {
    let mut m = booted(StorageInitialMode::Buffer);
    let effects = m.dispatch(Channel::Cloud, Message::Cloud(CloudMsg::Connected));
    assert!(matches!(m.state(), AppState::BcSampling));
    assert_eq!(m.context().running_history, AppState::BcSampling);
    assert!(has_set_timer(&effects));
}

/// Scenario 4: a long button press while connected triggers an immediate
/// cloud send (batch request + poll triggers) without changing state.
#[test]
fn long_press_while_connected_and_waiting_triggers_an_immediate_send() {
    let mut m = booted(StorageInitialMode::Buffer);
    m.dispatch(Channel::Cloud, Message::Cloud(CloudMsg::Connected));
    m.dispatch(Channel::Location, Message::Location(LocationMsg::SearchDone));
    assert_eq!(m.state(), AppState::BcWaiting);

    let effects = m.dispatch(Channel::Button, Message::Button(ButtonMsg::PressLong));
    assert_eq!(m.state(), AppState::BcWaiting);
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::Publish { message: Message::Storage(StorageMsg::BatchRequest { .. }), .. })));
    assert!(has_publish(&effects, &Message::Cloud(CloudMsg::PollShadow)));
    assert!(has_publish(&effects, &Message::Fota(FotaMsg::PollRequest)));
}

/// Scenario 5: FOTA.DOWNLOADING_UPDATE is claimed once, at RUNNING, from any
/// RUNNING leaf, and timers are cancelled on entry.
#[test]
fn fota_downloading_update_preempts_from_any_running_leaf() {
    let mut m = booted(StorageInitialMode::Buffer);
    m.dispatch(Channel::Cloud, Message::Cloud(CloudMsg::Connected));
    assert_eq!(m.state(), AppState::BcSampling);

    let effects = m.dispatch(Channel::Fota, Message::Fota(FotaMsg::DownloadingUpdate));
    assert_eq!(m.state(), AppState::FotaDownloading);
    assert!(effects.iter().any(|e| matches!(e, Effect::CancelTimer { .. })));
}

/// Scenario 6: leaving FOTA (download canceled) resumes exactly the
/// RUNNING leaf recorded in `running_history`, not the default leaf.
#[test]
fn download_canceled_resumes_the_recorded_running_history() {
    let mut m = booted(StorageInitialMode::Buffer);
    m.dispatch(Channel::Cloud, Message::Cloud(CloudMsg::Connected));
    m.dispatch(Channel::Location, Message::Location(LocationMsg::SearchDone));
    assert_eq!(m.state(), AppState::BcWaiting);

    m.dispatch(Channel::Fota, Message::Fota(FotaMsg::DownloadingUpdate));
    assert_eq!(m.state(), AppState::FotaDownloading);

    m.dispatch(Channel::Fota, Message::Fota(FotaMsg::DownloadCanceled));
    assert_eq!(m.state(), AppState::BcWaiting);
}

#[test]
fn fota_tracks_connectivity_flips_in_running_history_while_downloading() {
    let mut m = booted(StorageInitialMode::Buffer);
    m.dispatch(Channel::Fota, Message::Fota(FotaMsg::DownloadingUpdate));
    assert_eq!(m.context().running_history, AppState::BdSampling);

    m.dispatch(Channel::Cloud, Message::Cloud(CloudMsg::Connected));
    assert_eq!(m.context().running_history, AppState::BcSampling);

    m.dispatch(Channel::Cloud, Message::Cloud(CloudMsg::Disconnected));
    assert_eq!(m.context().running_history, AppState::BdSampling);
}

#[test]
fn success_reboot_needed_while_downloading_waits_for_network_disconnect_before_rebooting() {
    let mut m = booted(StorageInitialMode::Buffer);
    m.dispatch(Channel::Fota, Message::Fota(FotaMsg::DownloadingUpdate));

    let effects = m.dispatch(Channel::Fota, Message::Fota(FotaMsg::SuccessRebootNeeded));
    assert_eq!(m.state(), AppState::FotaWaitDisconnect);
    assert!(has_publish(&effects, &Message::Network(NetworkMsg::Disconnect)));
    assert!(!effects.iter().any(|e| matches!(e, Effect::Reboot { .. })));

    let effects = m.dispatch(Channel::Network, Message::Network(NetworkMsg::Disconnected));
    assert_eq!(m.state(), AppState::FotaRebooting);
    assert!(effects.iter().any(|e| matches!(e, Effect::Reboot { .. })));
}

#[test]
fn image_apply_needed_publishes_apply_after_disconnecting() {
    let mut m = booted(StorageInitialMode::Buffer);
    m.dispatch(Channel::Fota, Message::Fota(FotaMsg::DownloadingUpdate));
    m.dispatch(Channel::Fota, Message::Fota(FotaMsg::ImageApplyNeeded));
    assert_eq!(m.state(), AppState::FotaWaitDisconnectToApply);

    let effects = m.dispatch(Channel::Network, Message::Network(NetworkMsg::Disconnected));
    assert_eq!(m.state(), AppState::FotaApplyingImage);
    assert!(has_publish(&effects, &Message::Fota(FotaMsg::ImageApply)));

    let effects = m.dispatch(Channel::Fota, Message::Fota(FotaMsg::SuccessRebootNeeded));
    assert_eq!(m.state(), AppState::FotaRebooting);
    assert!(effects.iter().any(|e| matches!(e, Effect::Reboot { .. })));
}

#[test]
fn passthrough_mode_forwards_poll_triggers_without_a_batch_request() {
    let mut m = booted(StorageInitialMode::Passthrough);
    m.dispatch(Channel::Cloud, Message::Cloud(CloudMsg::Connected));
    assert_eq!(m.state(), AppState::PtConnectedSampling);

    let effects = m.dispatch(Channel::Location, Message::Location(LocationMsg::SearchDone));
    assert_eq!(m.state(), AppState::PtConnectedWaiting);
    assert!(has_publish(&effects, &Message::Cloud(CloudMsg::PollShadow)));
    assert!(has_publish(&effects, &Message::Fota(FotaMsg::PollRequest)));
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::Publish { message: Message::Storage(StorageMsg::BatchRequest { .. }), .. })));
}

#[test]
fn mode_buffer_confirmation_is_claimed_once_at_the_running_level_from_passthrough() {
    let mut m = booted(StorageInitialMode::Passthrough);
    let effects = m.dispatch(Channel::Storage, Message::Storage(StorageMsg::ModeBuffer));
    assert_eq!(m.state(), AppState::BdSampling);
    assert!(has_publish(&effects, &Message::Location(LocationMsg::SearchTrigger)));
}

#[test]
fn short_press_while_sampling_is_swallowed_without_a_transition() {
    let mut m = booted(StorageInitialMode::Buffer);
    let effects = m.dispatch(Channel::Button, Message::Button(ButtonMsg::PressShort));
    assert_eq!(m.state(), AppState::BdSampling);
    assert!(effects.is_empty());
}

#[test]
fn short_press_while_waiting_resamples_immediately() {
    let mut m = booted(StorageInitialMode::Buffer);
    m.dispatch(Channel::Location, Message::Location(LocationMsg::SearchDone));
    assert_eq!(m.state(), AppState::BdWaiting);
    m.dispatch(Channel::Button, Message::Button(ButtonMsg::PressShort));
    assert_eq!(m.state(), AppState::BdSampling);
}

#[test]
fn unclaimed_messages_leave_state_and_context_untouched() {
    let mut m = booted(StorageInitialMode::Buffer);
    let before = m.state();
    let effects = m.dispatch(Channel::Network, Message::Network(NetworkMsg::Disconnected));
    assert_eq!(m.state(), before);
    assert!(effects.is_empty());
}

#[test]
fn a_shadow_delta_with_an_interval_reschedules_the_sample_timer() {
    let mut m = StateMachine::new(
        FakeClock::new(),
        StorageInitialMode::Buffer,
        60,
        1800,
        sensors(),
        Box::new(ScriptedParser(ShadowFields {
            interval_sec: Some(120),
            command: None,
        })),
    )
    .expect("non-empty sensor list");
    m.boot();
    m.dispatch(Channel::Cloud, Message::Cloud(CloudMsg::Connected));

    let effects = m.dispatch(
        Channel::Cloud,
        Message::Cloud(CloudMsg::ShadowResponseDelta { buf: vec![] }),
    );
    assert_eq!(m.context().sample_interval_sec, 120);
    assert!(has_set_timer(&effects));
}

#[test]
fn a_shadow_delta_reboot_command_is_only_honored_on_delta_not_plain_response() {
    let mut m = StateMachine::new(
        FakeClock::new(),
        StorageInitialMode::Buffer,
        60,
        1800,
        sensors(),
        Box::new(ScriptedParser(ShadowFields {
            interval_sec: None,
            command: Some(crate::shadow::ShadowCommand::Reboot),
        })),
    )
    .expect("non-empty sensor list");
    m.boot();
    m.dispatch(Channel::Cloud, Message::Cloud(CloudMsg::Connected));

    let effects = m.dispatch(Channel::Cloud, Message::Cloud(CloudMsg::ShadowResponse { buf: vec![] }));
    assert!(!effects.iter().any(|e| matches!(e, Effect::Reboot { .. })));

    let effects = m.dispatch(
        Channel::Cloud,
        Message::Cloud(CloudMsg::ShadowResponseDelta { buf: vec![] }),
    );
    assert!(effects.iter().any(|e| matches!(e, Effect::Reboot { .. })));
}

#[test]
fn a_failing_shadow_parse_leaves_the_sample_interval_unchanged() {
    let mut m = StateMachine::new(
        FakeClock::new(),
        StorageInitialMode::Buffer,
        60,
        1800,
        sensors(),
        Box::new(FailingParser),
    )
    .expect("non-empty sensor list");
    m.boot();
    m.dispatch(Channel::Cloud, Message::Cloud(CloudMsg::Connected));

    let effects = m.dispatch(
        Channel::Cloud,
        Message::Cloud(CloudMsg::ShadowResponseDelta { buf: vec![0xFF] }),
    );
    assert_eq!(m.context().sample_interval_sec, 60);
    assert!(effects.is_empty());
}

#[test]
fn battery_record_round_trips_through_storage_data_channel_shape() {
    // Sanity check that the sensor response shape this machine expects
    // still matches tracker-core's Record type.
    let record = Record::Battery(BatteryRecord {
        millivolts: 3700,
        state_of_charge_pct: 80,
        timestamp_secs: 42,
    });
    assert_eq!(record.data_type(), DataType::Battery);
}

#[test]
fn snapshot_reflects_current_state_and_context() {
    let m = booted(StorageInitialMode::Buffer);
    let (state, context) = m.snapshot();
    assert_eq!(state, AppState::BdSampling);
    assert_eq!(context.running_history, AppState::BdSampling);
}

#[test]
fn waiting_entry_accounts_for_time_already_elapsed_during_sampling() {
    let mut m = booted(StorageInitialMode::Buffer);
    // FakeClock doesn't advance automatically; simulate sampling having
    // taken a few seconds before SEARCH_DONE arrives.
    let effects = m.dispatch(Channel::Location, Message::Location(LocationMsg::SearchDone));
    let timer = effects.iter().find_map(|e| match e {
        Effect::SetTimer { duration, .. } => Some(*duration),
        _ => None,
    });
    assert_eq!(timer, Some(Duration::from_secs(60)));
}
