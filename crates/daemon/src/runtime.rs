// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process wiring: boots the bus, the supervisor, the storage engine, the
//! state machine, and one task per collaborator adapter, then lets them run
//! until a [`RebootHandle`] fires or the process receives a shutdown signal.
//!
//! Grounded on `oj-daemon::main`/`lifecycle`'s split (one task per concern,
//! `tokio::spawn`, a `Notify` for out-of-band shutdown) and
//! `oj-engine::Runtime<S, A, N, C: Clock>` (clock-generic engine owning the
//! dispatch loop).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use tracker_adapters::{
    ButtonAdapter, CloudAdapter, EnvironmentalAdapter, FotaAdapter, LedAdapter, LocationAdapter,
    NetworkAdapter, NoopButtonAdapter, NoopCloudAdapter, NoopEnvironmentalAdapter,
    NoopFotaAdapter, NoopLedAdapter, NoopLocationAdapter, NoopNetworkAdapter, NoopPowerAdapter,
    PowerAdapter,
};
use tracker_bus::{Bus, Subscriber, WaitResult};
use tracker_core::{
    BatteryRecord, ButtonMsg, Channel, Clock, CloudMsg, Config, DataType, Effect,
    EnvironmentalRecord, FotaMsg, LocationMsg, LocationRecord, Message, ModeRejectReason,
    NetworkMsg, Record, StorageMsg, SubscriberId, TimerId, TimerKind, TimerMsg,
};
use tracker_statemachine::{ShadowParser, StateMachine, TIMER_SAMPLE, TIMER_SEND};
use tracker_storage::{BatchRequestOutcome, StorageEngine};
use tracker_supervisor::{Budget, FatalHandler, Supervisor};

use crate::protocol::StatusResponse;

const PUBLISH_TIMEOUT: Duration = Duration::from_secs(1);

/// Every collaborator adapter the daemon drives, boxed as trait objects so
/// `main` can swap in real hardware drivers without touching this module.
pub struct Adapters {
    pub network: Arc<dyn NetworkAdapter>,
    pub cloud: Arc<dyn CloudAdapter>,
    pub fota: Arc<dyn FotaAdapter>,
    pub location: Arc<dyn LocationAdapter>,
    pub power: Arc<dyn PowerAdapter>,
    pub environmental: Arc<dyn EnvironmentalAdapter>,
    pub button: Arc<dyn ButtonAdapter>,
    pub led: Arc<dyn LedAdapter>,
}

impl Adapters {
    /// No physical peripherals wired up; the daemon still boots and the
    /// control surface still works end-to-end.
    pub fn noop() -> Self {
        Self {
            network: Arc::new(NoopNetworkAdapter),
            cloud: Arc::new(NoopCloudAdapter),
            fota: Arc::new(NoopFotaAdapter),
            location: Arc::new(NoopLocationAdapter),
            power: Arc::new(NoopPowerAdapter),
            environmental: Arc::new(NoopEnvironmentalAdapter),
            button: Arc::new(NoopButtonAdapter),
            led: Arc::new(NoopLedAdapter),
        }
    }
}

/// Fires a shared notification once, carrying the reason along with it.
/// Both a supervisor watchdog timeout and a FOTA `Effect::Reboot` drive the
/// same handle, so a reboot always has exactly one terminal response.
#[derive(Clone)]
pub struct RebootHandle {
    notify: Arc<Notify>,
    reason: Arc<Mutex<Option<String>>>,
}

impl RebootHandle {
    pub fn new() -> Self {
        Self {
            notify: Arc::new(Notify::new()),
            reason: Arc::new(Mutex::new(None)),
        }
    }

    pub fn trigger(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let mut slot = self.reason.lock();
        if slot.is_none() {
            *slot = Some(reason.clone());
        }
        drop(slot);
        warn!(%reason, "reboot triggered");
        self.notify.notify_waiters();
    }

    pub async fn notified(&self) {
        self.notify.notified().await;
    }

    pub fn reason(&self) -> Option<String> {
        self.reason.lock().clone()
    }
}

impl Default for RebootHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl FatalHandler for RebootHandle {
    fn on_fatal(&self, task: &str, budget: Budget) {
        self.trigger(format!("watchdog budget exceeded for task '{task}' ({budget:?})"));
    }
}

/// Schedules/cancels the two named timers the state machine asks for,
/// translating a fire back into a `TIMER.EXPIRED_*` bus message. Modeled on
/// `oj-engine::scheduler::Scheduler`, generalized to actually sleep instead
/// of being polled, since nothing else here runs a fixed-tick event loop.
#[derive(Clone)]
struct TimerDriver {
    bus: Bus,
    handles: Arc<Mutex<HashMap<TimerId, tokio::task::AbortHandle>>>,
}

impl TimerDriver {
    fn new(bus: Bus) -> Self {
        Self {
            bus,
            handles: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn set(&self, id: TimerId, duration: Duration) {
        self.cancel(id);
        let Some(kind) = timer_kind(id) else {
            warn!(?id, "ignoring SetTimer for an unrecognized timer id");
            return;
        };
        let bus = self.bus.clone();
        let handles = Arc::clone(&self.handles);
        let task = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let message = Message::Timer(TimerMsg::Expired(kind));
            if let Err(e) = bus.publish(Channel::Timer, message, PUBLISH_TIMEOUT).await {
                warn!(error = %e, ?id, "failed to publish timer expiry");
            }
            handles.lock().remove(&id);
        });
        self.handles.lock().insert(id, task.abort_handle());
    }

    fn cancel(&self, id: TimerId) {
        if let Some(handle) = self.handles.lock().remove(&id) {
            handle.abort();
        }
    }
}

fn timer_kind(id: TimerId) -> Option<TimerKind> {
    if id == TIMER_SAMPLE {
        Some(TimerKind::SampleData)
    } else if id == TIMER_SEND {
        Some(TimerKind::Cloud)
    } else {
        None
    }
}

/// A default, obviously-synthetic reading used where no physical sensor
/// exists to answer a `SensorRequest`.
/// Real hardware adapters would publish their own `SensorResponse` from an
/// independent task; standing in for that here is ambient glue, not core
/// behavior, and is recorded as such in `DESIGN.md`.
fn placeholder_record(data_type: DataType, now_secs: u64) -> Record {
    match data_type {
        DataType::Battery => Record::Battery(BatteryRecord {
            millivolts: 3700,
            state_of_charge_pct: 100,
            timestamp_secs: now_secs,
        }),
        DataType::Environmental => Record::Environmental(EnvironmentalRecord {
            temperature_centi_c: 2100,
            humidity_centi_pct: 4500,
            pressure_pa: 101_325,
            timestamp_secs: now_secs,
        }),
        DataType::Location => Record::Location(LocationRecord {
            latitude_e7: 0,
            longitude_e7: 0,
            accuracy_m: 0,
            timestamp_secs: now_secs,
        }),
    }
}

/// Everything a booted daemon needs for the control surface to answer
/// queries: a bus handle to publish `power sample` onto, and a snapshot of
/// the state machine for `status`.
#[derive(Clone)]
pub struct RuntimeHandle<C: Clock + Clone + 'static> {
    pub bus: Bus,
    pub reboot: RebootHandle,
    power: Arc<dyn PowerAdapter>,
    machine: Arc<Mutex<StateMachine<C>>>,
    storage: Arc<Mutex<StorageEngine>>,
}

impl<C: Clock + Clone + 'static> RuntimeHandle<C> {
    pub fn status(&self) -> StatusResponse {
        let (state, context) = self.machine.lock().snapshot();
        let storage_mode = self.storage.lock().mode();
        StatusResponse {
            state: format!("{state:?}"),
            storage_mode: format!("{storage_mode:?}"),
            sample_interval_sec: context.sample_interval_sec,
            data_send_interval_sec: context.data_send_interval_sec,
            running_history: format!("{:?}", context.running_history),
            batch_session_id: context.batch_session_id.value(),
        }
    }

    /// `power sample`: ask the power adapter for a reading right now,
    /// independent of the periodic sample timer.
    pub async fn sample_power(&self) -> Result<(), tracker_adapters::AdapterError> {
        self.power.sample_battery().await
    }
}

/// Boots every long-running task and returns a handle the control-surface
/// listener uses to serve queries. The returned `JoinHandle`s are not
/// awaited here; callers select on [`RebootHandle::notified`] or a signal to
/// decide when to stop.
pub fn boot<C: Clock + Clone + Send + Sync + 'static>(
    config: Config,
    clock: C,
    shadow_parser: Box<dyn ShadowParser>,
    adapters: Adapters,
) -> Result<RuntimeHandle<C>, crate::error::DaemonError> {
    let bus = Bus::new();
    let reboot = RebootHandle::new();
    let supervisor: Supervisor<C> = Supervisor::new(clock.clone(), Arc::new(reboot.clone()));
    let storage = Arc::new(Mutex::new(StorageEngine::new(
        config.storage_initial_mode,
        config.storage_max_records_per_type,
        config.storage_batch_buffer_size,
    )));

    let machine = StateMachine::new(
        clock.clone(),
        config.storage_initial_mode,
        config.sample_interval_sec,
        config.cloud_sync_interval_sec,
        config.enabled_sensors.clone(),
        shadow_parser,
    )
    .map_err(crate::error::DaemonError::StateMachine)?;
    let machine = Arc::new(Mutex::new(machine));

    let timers = TimerDriver::new(bus.clone());

    let watchdog_budget = Budget::new(
        Duration::from_secs(config.watchdog_timeout_sec as u64),
        Duration::from_secs(config.watchdog_timeout_sec as u64 / 2),
        Duration::from_secs(config.msg_processing_timeout_sec as u64),
    )
    .map_err(crate::error::DaemonError::Supervisor)?;

    spawn_supervisor_sweep(supervisor.clone());
    spawn_state_machine_task(
        bus.clone(),
        Arc::clone(&machine),
        Arc::clone(&adapters.led),
        timers.clone(),
        reboot.clone(),
        supervisor.register("state_machine", watchdog_budget),
    );
    spawn_storage_task(
        bus.clone(),
        Arc::clone(&storage),
        Arc::clone(&adapters.cloud),
        supervisor.register("storage", watchdog_budget),
    );
    spawn_sensor_pumps(&bus, &config, &adapters, clock.clone(), &supervisor, watchdog_budget);
    spawn_network_pump(bus.clone(), Arc::clone(&adapters.network), supervisor.register("network", watchdog_budget));
    spawn_fota_pump(bus.clone(), Arc::clone(&adapters.fota), supervisor.register("fota", watchdog_budget));
    spawn_location_pump(bus.clone(), Arc::clone(&adapters.location), supervisor.register("location", watchdog_budget));
    spawn_cloud_pump(bus.clone(), Arc::clone(&adapters.cloud), supervisor.register("cloud", watchdog_budget));
    spawn_button_pump(bus.clone(), Arc::clone(&adapters.button));

    // Boot the state machine's initial ROOT -> RUNNING chain and carry out
    // its effects the same way the dispatch loop does for every later
    // message.
    let boot_effects = machine.lock().boot();
    execute_effects(
        boot_effects,
        &bus,
        &timers,
        &adapters.led,
        &reboot,
    );

    Ok(RuntimeHandle {
        bus,
        reboot,
        power: Arc::clone(&adapters.power),
        machine,
        storage,
    })
}

fn spawn_supervisor_sweep<C: Clock + Clone + Send + Sync + 'static>(supervisor: Supervisor<C>) {
    tokio::spawn(async move {
        supervisor.run(Duration::from_secs(5)).await;
    });
}

#[allow(clippy::too_many_arguments)]
fn spawn_state_machine_task<C: Clock + Clone + Send + Sync + 'static>(
    bus: Bus,
    machine: Arc<Mutex<StateMachine<C>>>,
    led: Arc<dyn LedAdapter>,
    timers: TimerDriver,
    reboot: RebootHandle,
    task_handle: tracker_supervisor::TaskHandle<C>,
) {
    tokio::spawn(async move {
        let subscriber = Subscriber::new(SubscriberId::new(1));
        for channel in [
            Channel::Fota,
            Channel::Storage,
            Channel::Cloud,
            Channel::Network,
            Channel::Location,
            Channel::Button,
            Channel::Timer,
        ] {
            bus.subscribe(channel, &subscriber);
        }
        for data_type in DataType::ALL {
            bus.subscribe(Channel::SensorResponse(data_type), &subscriber);
        }

        let mut subscriber = subscriber;
        loop {
            task_handle.feed();
            match subscriber.wait(Duration::from_secs(30)).await {
                WaitResult::Received((channel, message)) => {
                    debug!(%channel, ?message, "state machine received message");
                    let effects = machine.lock().dispatch(channel, message);
                    execute_effects(effects, &bus, &timers, &led, &reboot);
                }
                WaitResult::NoMessage => {}
                WaitResult::Closed => {
                    info!("state machine subscriber closed, stopping task");
                    return;
                }
            }
        }
    });
}

fn execute_effects(
    effects: Vec<Effect>,
    bus: &Bus,
    timers: &TimerDriver,
    led: &Arc<dyn LedAdapter>,
    reboot: &RebootHandle,
) {
    for effect in effects {
        let name = effect.name();
        match effect {
            Effect::Publish { message, timeout } => {
                let bus = bus.clone();
                let channel = message.channel();
                tokio::spawn(async move {
                    if let Err(e) = bus.publish(channel, message, timeout).await {
                        warn!(error = %e, %channel, "effect publish failed");
                    }
                });
            }
            Effect::SetTimer { id, duration } => timers.set(id, duration),
            Effect::CancelTimer { id } => timers.cancel(id),
            Effect::SetIndicator { indicator } => {
                let led = Arc::clone(led);
                tokio::spawn(async move {
                    if let Err(e) = led.set_indicator(indicator).await {
                        warn!(error = %e, "failed to set indicator");
                    }
                });
            }
            Effect::Reboot { reason } => reboot.trigger(reason),
        }
        debug!(effect = name, "effect executed");
    }
}

fn spawn_storage_task<C: Clock + Clone + Send + Sync + 'static>(
    bus: Bus,
    storage: Arc<Mutex<StorageEngine>>,
    cloud: Arc<dyn CloudAdapter>,
    task_handle: tracker_supervisor::TaskHandle<C>,
) {
    tokio::spawn(async move {
        let subscriber = Subscriber::new(SubscriberId::new(2));
        bus.subscribe(Channel::Storage, &subscriber);
        for data_type in DataType::ALL {
            bus.subscribe(Channel::SensorResponse(data_type), &subscriber);
        }

        let mut subscriber = subscriber;
        loop {
            task_handle.feed();
            match subscriber.wait(Duration::from_secs(30)).await {
                WaitResult::Received((Channel::SensorResponse(data_type), Message::SensorResponse { record, .. })) => {
                    let outcome = storage.lock().publish_record(record);
                    if let tracker_storage::PublishOutcome::Forward(record) = outcome {
                        let message = Message::StorageData { data_type, record };
                        if let Err(e) = bus.publish(Channel::StorageData, message, PUBLISH_TIMEOUT).await {
                            warn!(error = %e, "failed to forward passthrough record");
                        }
                    }
                }
                WaitResult::Received((Channel::Storage, Message::Storage(msg))) => {
                    handle_storage_message(msg, &bus, &storage, &cloud).await;
                }
                WaitResult::Received(_) => {}
                WaitResult::NoMessage => {}
                WaitResult::Closed => {
                    info!("storage subscriber closed, stopping task");
                    return;
                }
            }
        }
    });
}

async fn handle_storage_message(
    msg: StorageMsg,
    bus: &Bus,
    storage: &Arc<Mutex<StorageEngine>>,
    cloud: &Arc<dyn CloudAdapter>,
) {
    match msg {
        StorageMsg::ModePassthroughRequest => {
            reply_mode_change(bus, storage, tracker_core::StorageInitialMode::Passthrough, StorageMsg::ModePassthrough).await;
        }
        StorageMsg::ModeBufferRequest => {
            reply_mode_change(bus, storage, tracker_core::StorageInitialMode::Buffer, StorageMsg::ModeBuffer).await;
        }
        StorageMsg::BatchRequest { session_id } => {
            let outcome = storage.lock().batch_request(session_id);
            match outcome {
                BatchRequestOutcome::Available { session_id, data_len } => {
                    publish_storage(bus, StorageMsg::BatchAvailable { session_id, data_len }).await;
                    drain_batch_to_cloud(storage, cloud, session_id).await;
                    storage.lock().batch_close(session_id);
                    publish_storage(bus, StorageMsg::BatchClose { session_id }).await;
                }
                BatchRequestOutcome::Empty { session_id } => {
                    publish_storage(bus, StorageMsg::BatchEmpty { session_id }).await;
                }
                BatchRequestOutcome::Busy { active_session_id } => {
                    publish_storage(bus, StorageMsg::BatchBusy { session_id: active_session_id }).await;
                }
                BatchRequestOutcome::Error => {
                    publish_storage(bus, StorageMsg::BatchError { session_id }).await;
                }
            }
        }
        StorageMsg::BatchClose { session_id } => {
            storage.lock().batch_close(session_id);
        }
        StorageMsg::Clear => {
            if let Err(e) = storage.lock().clear() {
                warn!(error = %e, "STORAGE_CLEAR rejected");
            }
        }
        // Confirmations the state machine publishes in response to its own
        // requests are not re-consumed here; they only exist for
        // `running_run`'s transition handlers.
        StorageMsg::ModePassthrough
        | StorageMsg::ModeBuffer
        | StorageMsg::ModeChangeRejected { .. }
        | StorageMsg::BatchAvailable { .. }
        | StorageMsg::BatchEmpty { .. }
        | StorageMsg::BatchBusy { .. }
        | StorageMsg::BatchError { .. } => {}
    }
}

async fn reply_mode_change(
    bus: &Bus,
    storage: &Arc<Mutex<StorageEngine>>,
    target: tracker_core::StorageInitialMode,
    ok_message: StorageMsg,
) {
    let result = storage.lock().request_mode_change(target);
    match result {
        Ok(_) => publish_storage(bus, ok_message).await,
        Err(_) => {
            publish_storage(
                bus,
                StorageMsg::ModeChangeRejected { reason: ModeRejectReason::BatchActive },
            )
            .await
        }
    }
}

async fn publish_storage(bus: &Bus, msg: StorageMsg) {
    if let Err(e) = bus.publish(Channel::Storage, Message::Storage(msg), PUBLISH_TIMEOUT).await {
        warn!(error = %e, "failed to publish storage response");
    }
}

/// Forwards a drained batch window to the cloud adapter as one JSON payload
/// per record. A real implementation would coalesce these into a single
/// upload; record-at-a-time keeps this glue simple (`DESIGN.md`).
async fn drain_batch_to_cloud(storage: &Arc<Mutex<StorageEngine>>, cloud: &Arc<dyn CloudAdapter>, _session_id: tracker_core::BatchSessionId) {
    loop {
        let record = storage.lock().batch_read();
        let Some(record) = record else { break };
        send_record_to_cloud(cloud, record).await;
    }
}

fn spawn_sensor_pumps<C: Clock + Clone + Send + Sync + 'static>(
    bus: &Bus,
    config: &Config,
    adapters: &Adapters,
    clock: C,
    supervisor: &Supervisor<C>,
    budget: Budget,
) {
    for (index, &data_type) in config.enabled_sensors.iter().enumerate() {
        let bus = bus.clone();
        let power = Arc::clone(&adapters.power);
        let environmental = Arc::clone(&adapters.environmental);
        let location = Arc::clone(&adapters.location);
        let clock = clock.clone();
        let task_handle = supervisor.register(format!("sensor_{data_type}"), budget);
        tokio::spawn(async move {
            let subscriber = Subscriber::new(SubscriberId::new(100 + index as u64));
            bus.subscribe(Channel::SensorRequest(data_type), &subscriber);
            let mut subscriber = subscriber;
            loop {
                task_handle.feed();
                match subscriber.wait(Duration::from_secs(30)).await {
                    WaitResult::Received((_, Message::SensorRequest { data_type })) => {
                        let sample_result = match data_type {
                            DataType::Battery => power.sample_battery().await,
                            DataType::Environmental => environmental.sample_environmental().await,
                            DataType::Location => location.search_trigger().await,
                        };
                        if let Err(e) = sample_result {
                            warn!(error = %e, %data_type, "sensor sample failed");
                            continue;
                        }
                        let record = placeholder_record(data_type, clock.now_secs());
                        let message = Message::SensorResponse { data_type, record };
                        if let Err(e) = bus.publish(Channel::SensorResponse(data_type), message, PUBLISH_TIMEOUT).await {
                            warn!(error = %e, %data_type, "failed to publish sensor response");
                        }
                    }
                    WaitResult::Received(_) => {}
                    WaitResult::NoMessage => {}
                    WaitResult::Closed => return,
                }
            }
        });
    }
}

fn spawn_network_pump<C: Clock + Clone + Send + Sync + 'static>(bus: Bus, network: Arc<dyn NetworkAdapter>, task_handle: tracker_supervisor::TaskHandle<C>) {
    tokio::spawn(async move {
        let subscriber = Subscriber::new(SubscriberId::new(3));
        bus.subscribe(Channel::Network, &subscriber);
        let mut subscriber = subscriber;
        loop {
            task_handle.feed();
            match subscriber.wait(Duration::from_secs(30)).await {
                WaitResult::Received((_, Message::Network(NetworkMsg::Disconnect))) => {
                    if let Err(e) = network.disconnect().await {
                        warn!(error = %e, "network disconnect failed");
                        continue;
                    }
                    let message = Message::Network(NetworkMsg::Disconnected);
                    if let Err(e) = bus.publish(Channel::Network, message, PUBLISH_TIMEOUT).await {
                        warn!(error = %e, "failed to publish network disconnected");
                    }
                }
                WaitResult::Received(_) => {}
                WaitResult::NoMessage => {}
                WaitResult::Closed => return,
            }
        }
    });
}

fn spawn_fota_pump<C: Clock + Clone + Send + Sync + 'static>(bus: Bus, fota: Arc<dyn FotaAdapter>, task_handle: tracker_supervisor::TaskHandle<C>) {
    tokio::spawn(async move {
        let subscriber = Subscriber::new(SubscriberId::new(4));
        bus.subscribe(Channel::Fota, &subscriber);
        let mut subscriber = subscriber;
        loop {
            task_handle.feed();
            match subscriber.wait(Duration::from_secs(30)).await {
                WaitResult::Received((_, Message::Fota(msg))) => match msg {
                    FotaMsg::PollRequest => {
                        if let Err(e) = fota.poll_request().await {
                            warn!(error = %e, "fota poll_request failed");
                        }
                    }
                    FotaMsg::ImageApply => {
                        if let Err(e) = fota.image_apply().await {
                            warn!(error = %e, "fota image_apply failed");
                            continue;
                        }
                        let message = Message::Fota(FotaMsg::SuccessRebootNeeded);
                        if let Err(e) = bus.publish(Channel::Fota, message, PUBLISH_TIMEOUT).await {
                            warn!(error = %e, "failed to publish fota success");
                        }
                    }
                    _ => {}
                },
                WaitResult::Received(_) => {}
                WaitResult::NoMessage => {}
                WaitResult::Closed => return,
            }
        }
    });
}

fn spawn_location_pump<C: Clock + Clone + Send + Sync + 'static>(bus: Bus, location: Arc<dyn LocationAdapter>, task_handle: tracker_supervisor::TaskHandle<C>) {
    tokio::spawn(async move {
        let subscriber = Subscriber::new(SubscriberId::new(5));
        bus.subscribe(Channel::Location, &subscriber);
        let mut subscriber = subscriber;
        loop {
            task_handle.feed();
            match subscriber.wait(Duration::from_secs(30)).await {
                WaitResult::Received((_, Message::Location(LocationMsg::SearchTrigger))) => {
                    if let Err(e) = location.search_trigger().await {
                        warn!(error = %e, "location search_trigger failed");
                        continue;
                    }
                    let message = Message::Location(LocationMsg::SearchDone);
                    if let Err(e) = bus.publish(Channel::Location, message, PUBLISH_TIMEOUT).await {
                        warn!(error = %e, "failed to publish location search done");
                    }
                }
                WaitResult::Received((_, Message::Location(LocationMsg::SearchCancel))) => {
                    if let Err(e) = location.search_cancel().await {
                        warn!(error = %e, "location search_cancel failed");
                    }
                }
                WaitResult::Received(_) => {}
                WaitResult::NoMessage => {}
                WaitResult::Closed => return,
            }
        }
    });
}

/// Also subscribes to `STORAGE_DATA`: in `PASSTHROUGH` mode the storage task
/// forwards every incoming record there instead of retaining it (§4.4), and
/// "cloud send happens implicitly because storage is in passthrough" (§4.3
/// PT_CONNECTED_SAMPLING) — this is the implicit send, mirroring
/// `drain_batch_to_cloud`'s one-record-per-upload shape.
fn spawn_cloud_pump<C: Clock + Clone + Send + Sync + 'static>(bus: Bus, cloud: Arc<dyn CloudAdapter>, task_handle: tracker_supervisor::TaskHandle<C>) {
    tokio::spawn(async move {
        let subscriber = Subscriber::new(SubscriberId::new(6));
        bus.subscribe(Channel::Cloud, &subscriber);
        bus.subscribe(Channel::StorageData, &subscriber);
        let mut subscriber = subscriber;
        loop {
            task_handle.feed();
            match subscriber.wait(Duration::from_secs(30)).await {
                WaitResult::Received((_, Message::Cloud(msg))) => match msg {
                    CloudMsg::PollShadow => {
                        if let Err(e) = cloud.poll_shadow().await {
                            warn!(error = %e, "cloud poll_shadow failed");
                        }
                    }
                    CloudMsg::ProvisioningRequest => {
                        if let Err(e) = cloud.provisioning_request().await {
                            warn!(error = %e, "cloud provisioning_request failed");
                        }
                    }
                    CloudMsg::PayloadJson { json } => {
                        if let Err(e) = cloud.send_payload(json).await {
                            warn!(error = %e, "cloud send_payload failed");
                        }
                    }
                    _ => {}
                },
                WaitResult::Received((_, Message::StorageData { record, .. })) => {
                    send_record_to_cloud(&cloud, record).await;
                }
                WaitResult::Received(_) => {}
                WaitResult::NoMessage => {}
                WaitResult::Closed => return,
            }
        }
    });
}

/// Serializes one record and hands it to the cloud adapter, warning (not
/// failing the task) on either a serialization or transport error — the
/// same recovery shape as `drain_batch_to_cloud`.
async fn send_record_to_cloud(cloud: &Arc<dyn CloudAdapter>, record: Record) {
    let json = match serde_json::to_string(&record) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "failed to serialize record for cloud upload");
            return;
        }
    };
    if let Err(e) = cloud.send_payload(json).await {
        warn!(error = %e, "failed to send record to cloud");
    }
}

fn spawn_button_pump(bus: Bus, button: Arc<dyn ButtonAdapter>) {
    tokio::spawn(async move {
        loop {
            match button.next_press().await {
                Ok(press) => {
                    let message = Message::Button(press);
                    if let Err(e) = bus.publish(Channel::Button, message, PUBLISH_TIMEOUT).await {
                        warn!(error = %e, "failed to publish button press");
                    }
                }
                Err(e) => {
                    warn!(error = %e, "button adapter error; stopping button pump");
                    return;
                }
            }
        }
    });
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
