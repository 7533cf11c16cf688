// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel identities and the messages carried on them (`spec.md` §4.1,
//! §4.3, §4.4, §4.5).
//!
//! Each `Channel` variant is a named typed conduit per `spec.md` §3: the
//! messages that can legally appear on it are exactly one variant's payload
//! of `Message`. The bus itself is channel-agnostic (it only moves
//! `Message` values around); `Message::channel()` is the single source of
//! truth for which channel a message belongs on, so publishing on the wrong
//! channel is a debug-time assertion failure rather than a silent bug.

use crate::ids::BatchSessionId;
use crate::record::{DataType, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Fota,
    Storage,
    StorageData,
    Cloud,
    Network,
    Location,
    Button,
    Timer,
    /// One request channel per sensor data type, the state machine's
    /// "sample now" trigger.
    SensorRequest(DataType),
    /// One response channel per sensor data type (battery/environmental/...).
    SensorResponse(DataType),
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Fota => write!(f, "FOTA"),
            Channel::Storage => write!(f, "STORAGE"),
            Channel::StorageData => write!(f, "STORAGE_DATA"),
            Channel::Cloud => write!(f, "CLOUD"),
            Channel::Network => write!(f, "NETWORK"),
            Channel::Location => write!(f, "LOCATION"),
            Channel::Button => write!(f, "BUTTON"),
            Channel::Timer => write!(f, "TIMER"),
            Channel::SensorRequest(dt) => write!(f, "{dt}_REQUEST"),
            Channel::SensorResponse(dt) => write!(f, "{dt}_RESPONSE"),
        }
    }
}

/// Timer identities named by the state machine (`spec.md` §4.3 timer
/// references: sample, send, cloud).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// `TIMER.EXPIRED_SAMPLE_DATA`
    SampleData,
    /// `TIMER.EXPIRED_CLOUD`
    Cloud,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerMsg {
    Expired(TimerKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonMsg {
    PressShort,
    PressLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkMsg {
    Disconnect,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CloudMsg {
    Connected,
    Disconnected,
    /// Persisted shadow document (re-delivered on every boot/reconnect).
    ShadowResponse { buf: Vec<u8> },
    /// Only deltas carry *new* commands.
    ShadowResponseDelta { buf: Vec<u8> },
    PollShadow,
    PayloadJson { json: String },
    ProvisioningRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationMsg {
    SearchTrigger,
    SearchCancel,
    SearchDone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FotaMsg {
    DownloadingUpdate,
    SuccessRebootNeeded,
    ImageApplyNeeded,
    ImageApply,
    DownloadCanceled,
    DownloadTimedOut,
    DownloadFailed,
    PollRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeRejectReason {
    BatchActive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StorageMsg {
    ModePassthroughRequest,
    ModeBufferRequest,
    ModePassthrough,
    ModeBuffer,
    ModeChangeRejected { reason: ModeRejectReason },
    BatchRequest { session_id: BatchSessionId },
    BatchAvailable { session_id: BatchSessionId, data_len: usize },
    BatchEmpty { session_id: BatchSessionId },
    BatchBusy { session_id: BatchSessionId },
    BatchError { session_id: BatchSessionId },
    BatchClose { session_id: BatchSessionId },
    Clear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    Fota(FotaMsg),
    Storage(StorageMsg),
    StorageData { data_type: DataType, record: Record },
    Cloud(CloudMsg),
    Network(NetworkMsg),
    Location(LocationMsg),
    Button(ButtonMsg),
    Timer(TimerMsg),
    /// The state machine's "sample now" trigger to one sensor adapter,
    /// delivered on its own `SensorRequest(data_type)` channel.
    SensorRequest { data_type: DataType },
    /// A sensor adapter's sample response, delivered on its own
    /// `SensorResponse(data_type)` channel.
    SensorResponse { data_type: DataType, record: Record },
}

impl Message {
    pub fn channel(&self) -> Channel {
        match self {
            Message::Fota(_) => Channel::Fota,
            Message::Storage(_) => Channel::Storage,
            Message::StorageData { .. } => Channel::StorageData,
            Message::Cloud(_) => Channel::Cloud,
            Message::Network(_) => Channel::Network,
            Message::Location(_) => Channel::Location,
            Message::Button(_) => Channel::Button,
            Message::Timer(_) => Channel::Timer,
            Message::SensorRequest { data_type } => Channel::SensorRequest(*data_type),
            Message::SensorResponse { data_type, .. } => Channel::SensorResponse(*data_type),
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
