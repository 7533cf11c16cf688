// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The hierarchical state machine's dispatch.
//!
//! `dispatch` is pure with respect to I/O: every side effect it wants
//! carried out — a publish, a timer schedule/cancel, an indicator change,
//! a reboot — comes back as an [`Effect`] for the caller to execute. The
//! machine itself never blocks and never touches the bus directly, per
//! §5's "dispatch is run-to-completion" and §9's "no direct state
//! mutation from callback context".

use std::time::Duration;
use tracing::{debug, info, instrument};
use tracker_core::{
    BatchSessionId, ButtonMsg, Channel, Clock, CloudMsg, DataType, Effect, FotaMsg, IdGen,
    Indicator, LocationMsg, Message, NetworkMsg, SequentialIdGen, StorageInitialMode, StorageMsg,
    TimerKind, TimerMsg,
};

use crate::context::StateContext;
use crate::error::StateMachineError;
use crate::shadow::{ShadowCommand, ShadowParser};
use crate::state::AppState;
use crate::timers::{TimerTable, TIMER_SAMPLE, TIMER_SEND};

const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(1);

pub struct StateMachine<C: Clock> {
    clock: C,
    state: AppState,
    context: StateContext,
    timers: TimerTable,
    initial_mode: StorageInitialMode,
    enabled_sensors: Vec<DataType>,
    shadow_parser: Box<dyn ShadowParser>,
    id_gen: Box<dyn IdGen>,
    publish_timeout: Duration,
}

impl<C: Clock> StateMachine<C> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        clock: C,
        initial_mode: StorageInitialMode,
        sample_interval_sec: u32,
        data_send_interval_sec: u32,
        enabled_sensors: Vec<DataType>,
        shadow_parser: Box<dyn ShadowParser>,
    ) -> Result<Self, StateMachineError> {
        if enabled_sensors.is_empty() {
            return Err(StateMachineError::NoEnabledSensors);
        }
        let initial_leaf = AppState::Running.resolve_leaf(initial_mode);
        Ok(Self {
            clock,
            state: AppState::Root,
            context: StateContext::new(sample_interval_sec, data_send_interval_sec, initial_leaf),
            timers: TimerTable::new(),
            initial_mode,
            enabled_sensors,
            shadow_parser,
            id_gen: Box::new(SequentialIdGen::new()),
            publish_timeout: DEFAULT_PUBLISH_TIMEOUT,
        })
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn context(&self) -> &StateContext {
        &self.context
    }

    /// Debug/status snapshot for the control surface (supplemented
    /// observability, not new behavior).
    pub fn snapshot(&self) -> (AppState, StateContext) {
        (self.state, self.context.clone())
    }

    /// Run the initial ROOT → RUNNING → ... entry chain. Call once before
    /// the first `dispatch`.
    #[instrument(skip(self))]
    pub fn boot(&mut self) -> Vec<Effect> {
        self.transition_to(AppState::Running)
    }

    #[instrument(skip(self, message), fields(state = ?self.state))]
    pub fn dispatch(&mut self, channel: Channel, message: Message) -> Vec<Effect> {
        self.context.last = Some((channel, message.clone()));
        let path = self.state.path();
        for &level in path.iter().rev() {
            if let Some(effects) = self.run_at(level, &message) {
                debug!(?level, effect_count = effects.len(), "message claimed");
                return effects;
            }
        }
        debug!("message unclaimed by any level");
        Vec::new()
    }

    fn run_at(&mut self, level: AppState, message: &Message) -> Option<Vec<Effect>> {
        match level {
            AppState::BdSampling => self.sampling_run(message, AppState::BdWaiting),
            AppState::BcSampling => self.sampling_run(message, AppState::BcWaiting),
            AppState::PtConnectedSampling => self.pt_connected_sampling_run(message),
            AppState::BdWaiting => self.bd_waiting_run(message),
            AppState::BcWaiting => self.bc_waiting_run(message),
            AppState::PtConnectedWaiting => self.pt_connected_waiting_run(message),
            AppState::BufferDisconnected => self.buffer_disconnected_run(message),
            AppState::BufferConnected => self.buffer_connected_run(message),
            AppState::PassthroughMode => self.passthrough_mode_run(message),
            AppState::Running => self.running_run(message),
            AppState::FotaDownloading => self.fota_downloading_run(message),
            AppState::FotaWaitDisconnect => self.fota_wait_disconnect_run(message),
            AppState::FotaWaitDisconnectToApply => self.fota_wait_disconnect_to_apply_run(message),
            AppState::FotaApplyingImage => self.fota_applying_image_run(message),
            AppState::Fota => self.fota_run(message),
            AppState::BufferMode
            | AppState::PtDisconnected
            | AppState::FotaRebooting
            | AppState::Root => None,
        }
    }

    // ---- top-level (RUNNING.run) ----

    fn running_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Fota(FotaMsg::DownloadingUpdate) => Some(self.transition_to(AppState::Fota)),
            Message::Storage(StorageMsg::ModePassthrough) => {
                Some(self.transition_to(AppState::PassthroughMode))
            }
            Message::Storage(StorageMsg::ModeBuffer) => {
                Some(self.transition_to(AppState::BufferMode))
            }
            _ => None,
        }
    }

    // ---- BUFFER_MODE ----

    fn buffer_disconnected_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Cloud(CloudMsg::Connected) => {
                Some(self.transition_to(AppState::BufferConnected))
            }
            Message::Timer(TimerMsg::Expired(TimerKind::Cloud)) => {
                Some(vec![self.restart_send_timer()])
            }
            _ => None,
        }
    }

    fn buffer_connected_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Cloud(CloudMsg::Disconnected) => {
                Some(self.transition_to(AppState::BufferDisconnected))
            }
            Message::Cloud(CloudMsg::ShadowResponse { buf }) => Some(self.handle_shadow(buf, false)),
            Message::Cloud(CloudMsg::ShadowResponseDelta { buf }) => {
                Some(self.handle_shadow(buf, true))
            }
            Message::Timer(TimerMsg::Expired(TimerKind::Cloud)) | Message::Button(ButtonMsg::PressLong) => {
                let mut effects = self.cloud_send_now();
                effects.push(self.restart_send_timer());
                Some(effects)
            }
            _ => None,
        }
    }

    fn sampling_run(&mut self, message: &Message, waiting_target: AppState) -> Option<Vec<Effect>> {
        match message {
            Message::Location(LocationMsg::SearchDone) => {
                let mut effects = self.sensor_requests();
                effects.extend(self.transition_to(waiting_target));
                Some(effects)
            }
            Message::Button(ButtonMsg::PressShort) => {
                debug!("short press swallowed while sampling");
                Some(vec![])
            }
            _ => None,
        }
    }

    fn bd_waiting_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Timer(TimerMsg::Expired(TimerKind::SampleData)) | Message::Button(ButtonMsg::PressShort) => {
                Some(self.transition_to(AppState::BdSampling))
            }
            Message::Button(ButtonMsg::PressLong) => {
                info!("long press while disconnected; will send once connected");
                Some(vec![])
            }
            _ => None,
        }
    }

    fn bc_waiting_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Timer(TimerMsg::Expired(TimerKind::SampleData)) | Message::Button(ButtonMsg::PressShort) => {
                Some(self.transition_to(AppState::BcSampling))
            }
            Message::Timer(TimerMsg::Expired(TimerKind::Cloud)) => {
                let mut effects = self.cloud_send_now();
                effects.push(self.restart_send_timer());
                Some(effects)
            }
            Message::Button(ButtonMsg::PressLong) => Some(self.cloud_send_now()),
            _ => None,
        }
    }

    // ---- PASSTHROUGH_MODE ----

    fn passthrough_mode_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Cloud(CloudMsg::Disconnected) => Some(self.transition_to(AppState::PtDisconnected)),
            Message::Cloud(CloudMsg::Connected) => {
                Some(self.transition_to(AppState::PtConnectedSampling))
            }
            Message::Cloud(CloudMsg::ShadowResponse { buf }) => Some(self.handle_shadow(buf, false)),
            Message::Cloud(CloudMsg::ShadowResponseDelta { buf }) => {
                Some(self.handle_shadow(buf, true))
            }
            _ => None,
        }
    }

    fn pt_connected_sampling_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Location(LocationMsg::SearchDone) => {
                let mut effects = self.sensor_requests();
                effects.extend(self.poll_triggers());
                effects.extend(self.transition_to(AppState::PtConnectedWaiting));
                Some(effects)
            }
            Message::Button(ButtonMsg::PressShort) => Some(vec![]),
            _ => None,
        }
    }

    fn pt_connected_waiting_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Timer(TimerMsg::Expired(TimerKind::SampleData)) | Message::Button(ButtonMsg::PressShort) => {
                Some(self.transition_to(AppState::PtConnectedSampling))
            }
            Message::Button(ButtonMsg::PressLong) => Some(self.poll_triggers()),
            _ => None,
        }
    }

    // ---- FOTA ----

    fn fota_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Fota(FotaMsg::DownloadCanceled)
            | Message::Fota(FotaMsg::DownloadTimedOut)
            | Message::Fota(FotaMsg::DownloadFailed) => Some(self.transition_to(self.context.running_history)),
            Message::Cloud(CloudMsg::Disconnected) => {
                self.context.running_history = disconnected_counterpart(self.context.running_history);
                Some(vec![])
            }
            Message::Cloud(CloudMsg::Connected) => {
                self.context.running_history = connected_counterpart(self.context.running_history);
                Some(vec![])
            }
            _ => None,
        }
    }

    fn fota_downloading_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Fota(FotaMsg::SuccessRebootNeeded) => Some(self.transition_to(AppState::FotaWaitDisconnect)),
            Message::Fota(FotaMsg::ImageApplyNeeded) => {
                Some(self.transition_to(AppState::FotaWaitDisconnectToApply))
            }
            _ => None,
        }
    }

    fn fota_wait_disconnect_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Network(NetworkMsg::Disconnected) => Some(self.transition_to(AppState::FotaRebooting)),
            _ => None,
        }
    }

    fn fota_wait_disconnect_to_apply_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Network(NetworkMsg::Disconnected) => Some(self.transition_to(AppState::FotaApplyingImage)),
            _ => None,
        }
    }

    fn fota_applying_image_run(&mut self, message: &Message) -> Option<Vec<Effect>> {
        match message {
            Message::Fota(FotaMsg::SuccessRebootNeeded) => Some(self.transition_to(AppState::FotaRebooting)),
            _ => None,
        }
    }

    // ---- shared helpers ----

    fn sensor_requests(&self) -> Vec<Effect> {
        self.enabled_sensors
            .iter()
            .map(|&data_type| Effect::Publish {
                message: Message::SensorRequest { data_type },
                timeout: self.publish_timeout,
            })
            .collect()
    }

    fn poll_triggers(&self) -> Vec<Effect> {
        vec![
            Effect::Publish {
                message: Message::Cloud(CloudMsg::PollShadow),
                timeout: self.publish_timeout,
            },
            Effect::Publish {
                message: Message::Fota(FotaMsg::PollRequest),
                timeout: self.publish_timeout,
            },
        ]
    }

    fn cloud_send_now(&mut self) -> Vec<Effect> {
        let session_id = BatchSessionId::new(self.id_gen.next());
        self.context.batch_session_id = session_id;
        let mut effects = vec![Effect::Publish {
            message: Message::Storage(StorageMsg::BatchRequest { session_id }),
            timeout: self.publish_timeout,
        }];
        effects.extend(self.poll_triggers());
        effects
    }

    fn restart_send_timer(&mut self) -> Effect {
        let now = self.clock.now();
        self.timers.schedule(
            TIMER_SEND,
            now,
            Duration::from_secs(self.context.data_send_interval_sec as u64),
        )
    }

    fn handle_shadow(&mut self, buf: &[u8], is_delta: bool) -> Vec<Effect> {
        let mut effects = Vec::new();
        match self.shadow_parser.parse(buf) {
            Ok(fields) => {
                if let Some(interval) = fields.interval_sec {
                    self.context.sample_interval_sec = interval;
                    let now = self.clock.now();
                    effects.push(self.timers.schedule(TIMER_SAMPLE, now, Duration::from_secs(interval as u64)));
                }
                if is_delta {
                    if let Some(command) = fields.command {
                        match command {
                            ShadowCommand::Provision => effects.push(Effect::Publish {
                                message: Message::Cloud(CloudMsg::ProvisioningRequest),
                                timeout: self.publish_timeout,
                            }),
                            ShadowCommand::Reboot => effects.push(Effect::Reboot {
                                reason: "shadow_reboot_command".to_string(),
                            }),
                        }
                    }
                }
            }
            Err(_) => {
                tracing::warn!("shadow response parse failed; state unchanged");
            }
        }
        effects
    }

    /// Entry establishes side effects idempotently; exit cancels side
    /// effects that outlive the state (§4.3 Handler contract). Transitions
    /// to a composite state auto-enter its initial child chain (§9).
    fn transition_to(&mut self, target: AppState) -> Vec<Effect> {
        let leaf = target.resolve_leaf(self.initial_mode);
        let old_path = self.state.path();
        let new_path = leaf.path();
        let common = old_path
            .iter()
            .zip(new_path.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut effects = Vec::new();
        for &level in old_path[common..].iter().rev() {
            effects.extend(self.exit(level));
        }
        for &level in &new_path[common..] {
            effects.extend(self.entry(level));
        }
        self.state = leaf;
        if new_path.len() > 1 && new_path[1] == AppState::Running {
            self.context.running_history = leaf;
        }
        effects
    }

    fn entry(&mut self, state: AppState) -> Vec<Effect> {
        match state {
            AppState::BufferMode => {
                self.context.sample_start_time = 0;
                vec![self.restart_send_timer()]
            }
            AppState::PassthroughMode => {
                self.context.sample_start_time = 0;
                self.timers.cancel_all()
            }
            AppState::BdSampling | AppState::BcSampling => self.sampling_entry(),
            AppState::PtConnectedSampling => self.pt_sampling_entry(),
            AppState::BdWaiting | AppState::BcWaiting | AppState::PtConnectedWaiting => {
                self.waiting_entry()
            }
            AppState::Fota => self.timers.cancel_all(),
            AppState::FotaWaitDisconnect => vec![self.publish_network_disconnect()],
            AppState::FotaWaitDisconnectToApply => {
                let mut effects = vec![self.publish_network_disconnect()];
                effects.extend(self.timers.cancel_all());
                effects
            }
            AppState::FotaApplyingImage => vec![Effect::Publish {
                message: Message::Fota(FotaMsg::ImageApply),
                timeout: self.publish_timeout,
            }],
            AppState::FotaRebooting => vec![Effect::Reboot {
                reason: "fota_apply_complete".to_string(),
            }],
            _ => Vec::new(),
        }
    }

    fn exit(&mut self, state: AppState) -> Vec<Effect> {
        match state {
            AppState::BufferMode | AppState::PassthroughMode | AppState::Fota => self.timers.cancel_all(),
            AppState::BdSampling
            | AppState::BdWaiting
            | AppState::BcSampling
            | AppState::BcWaiting
            | AppState::PtConnectedSampling
            | AppState::PtConnectedWaiting => vec![self.timers.cancel(TIMER_SAMPLE)],
            _ => Vec::new(),
        }
    }

    fn sampling_entry(&mut self) -> Vec<Effect> {
        let now = self.clock.now_secs();
        let elapsed = now.saturating_sub(self.context.sample_start_time);
        if self.context.sample_start_time == 0 || elapsed >= self.context.sample_interval_sec as u64 {
            self.context.sample_start_time = now;
            vec![
                Effect::SetIndicator {
                    indicator: Indicator::Sampling,
                },
                Effect::Publish {
                    message: Message::Location(LocationMsg::SearchTrigger),
                    timeout: self.publish_timeout,
                },
            ]
        } else {
            Vec::new()
        }
    }

    /// Unlike `sampling_entry`, passthrough sampling always resamples
    /// unconditionally on entry: there
    /// is no buffered backlog to protect against over-sampling.
    fn pt_sampling_entry(&mut self) -> Vec<Effect> {
        self.context.sample_start_time = self.clock.now_secs();
        vec![Effect::Publish {
            message: Message::Location(LocationMsg::SearchTrigger),
            timeout: self.publish_timeout,
        }]
    }

    fn waiting_entry(&mut self) -> Vec<Effect> {
        let now = self.clock.now_secs();
        let elapsed = now.saturating_sub(self.context.sample_start_time);
        let remaining = (self.context.sample_interval_sec as u64).saturating_sub(elapsed);
        let set_timer = self
            .timers
            .schedule(TIMER_SAMPLE, self.clock.now(), Duration::from_secs(remaining));
        vec![
            set_timer,
            Effect::SetIndicator {
                indicator: Indicator::Waiting,
            },
        ]
    }

    fn publish_network_disconnect(&self) -> Effect {
        Effect::Publish {
            message: Message::Network(NetworkMsg::Disconnect),
            timeout: self.publish_timeout,
        }
    }
}

fn disconnected_counterpart(leaf: AppState) -> AppState {
    match leaf {
        AppState::BufferConnected | AppState::BcSampling | AppState::BcWaiting => AppState::BufferDisconnected,
        AppState::PtConnectedSampling | AppState::PtConnectedWaiting => AppState::PtDisconnected,
        other => other,
    }
}

fn connected_counterpart(leaf: AppState) -> AppState {
    match leaf {
        AppState::BufferDisconnected | AppState::BdSampling | AppState::BdWaiting => AppState::BufferConnected,
        AppState::PtDisconnected => AppState::PtConnectedSampling,
        other => other,
    }
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
