// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The storage engine: per-type retention, passthrough
//! forwarding, and the single-slot batch session protocol.

use crate::ring::RingBuffer;
use std::collections::{HashMap, VecDeque};
use tracker_core::message::ModeRejectReason;
use tracker_core::{BatchSessionId, DataType, Record, StorageInitialMode};

use crate::error::StorageError;

/// What to do with an incoming record, decided by the engine's current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// `BUFFER` mode: the record was retained (possibly evicting the oldest
    /// record of the same type).
    Retained,
    /// `PASSTHROUGH` mode: the caller must re-publish this record on
    /// `STORAGE_DATA` and not retain it.
    Forward(Record),
}

/// Result of a `BATCH_REQUEST`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchRequestOutcome {
    /// Engine is in `PASSTHROUGH`; there is nothing to batch.
    Error,
    /// A session is already active; the caller keeps its original session.
    Busy { active_session_id: BatchSessionId },
    /// A window of `data_len` records was reserved under `session_id`.
    Available {
        session_id: BatchSessionId,
        data_len: usize,
    },
    /// No records are stored anywhere.
    Empty { session_id: BatchSessionId },
}

struct ActiveBatch {
    session_id: BatchSessionId,
    queue: VecDeque<Record>,
}

/// Owns one ring per [`DataType`] plus the single active batch session.
pub struct StorageEngine {
    mode: StorageInitialMode,
    rings: HashMap<DataType, RingBuffer<Record>>,
    batch_buffer_size: usize,
    active_batch: Option<ActiveBatch>,
}

impl StorageEngine {
    pub fn new(
        mode: StorageInitialMode,
        max_records_per_type: usize,
        batch_buffer_size: usize,
    ) -> Self {
        let mut rings = HashMap::new();
        for data_type in DataType::ALL {
            rings.insert(data_type, RingBuffer::new(max_records_per_type));
        }
        Self {
            mode,
            rings,
            batch_buffer_size,
            active_batch: None,
        }
    }

    pub fn mode(&self) -> StorageInitialMode {
        self.mode
    }

    pub fn has_active_batch(&self) -> bool {
        self.active_batch.is_some()
    }

    /// Record a newly-arrived value according to the engine's current mode.
    // Allow expect here: `rings` is seeded with one entry per `DataType::ALL`
    // in `new` and never shrinks, so every `DataType` is always present.
    #[allow(clippy::expect_used)]
    pub fn publish_record(&mut self, record: Record) -> PublishOutcome {
        match self.mode {
            StorageInitialMode::Passthrough => PublishOutcome::Forward(record),
            StorageInitialMode::Buffer => {
                let ring = self
                    .rings
                    .get_mut(&record.data_type())
                    .expect("every DataType has a ring");
                ring.push(record);
                PublishOutcome::Retained
            }
        }
    }

    /// `MODE_PASSTHROUGH_REQUEST` / `MODE_BUFFER_REQUEST`.
    pub fn request_mode_change(
        &mut self,
        target: StorageInitialMode,
    ) -> Result<StorageInitialMode, StorageError> {
        if self.active_batch.is_some() {
            return Err(StorageError::ModeChangeRejected {
                reason: ModeRejectReason::BatchActive,
            });
        }
        self.mode = target;
        Ok(target)
    }

    fn total_stored(&self) -> usize {
        self.rings.values().map(RingBuffer::len).sum()
    }

    /// `BATCH_REQUEST{session_id}`.
    // Allow expect here: `rings` is seeded with one entry per `DataType::ALL`
    // in `new` and never shrinks, so every `DataType` is always present.
    #[allow(clippy::expect_used)]
    pub fn batch_request(&mut self, session_id: BatchSessionId) -> BatchRequestOutcome {
        if matches!(self.mode, StorageInitialMode::Passthrough) {
            return BatchRequestOutcome::Error;
        }
        if let Some(active) = &self.active_batch {
            return BatchRequestOutcome::Busy {
                active_session_id: active.session_id,
            };
        }
        if self.total_stored() == 0 {
            return BatchRequestOutcome::Empty { session_id };
        }

        let mut queue = VecDeque::new();
        'fill: loop {
            let mut made_progress = false;
            for data_type in DataType::ALL {
                if queue.len() >= self.batch_buffer_size {
                    break 'fill;
                }
                let ring = self
                    .rings
                    .get_mut(&data_type)
                    .expect("every DataType has a ring");
                if let Some(record) = ring.pop_front() {
                    queue.push_back(record);
                    made_progress = true;
                }
            }
            if !made_progress {
                break;
            }
        }

        let data_len = queue.len();
        self.active_batch = Some(ActiveBatch { session_id, queue });
        BatchRequestOutcome::Available {
            session_id,
            data_len,
        }
    }

    /// Destructively read the next record from the active batch window.
    /// Returns `None` once the window is exhausted.
    pub fn batch_read(&mut self) -> Option<Record> {
        self.active_batch.as_mut()?.queue.pop_front()
    }

    /// `BATCH_CLOSE{session_id}`. A close against an already-idle engine,
    /// or a stale `session_id`, is a no-op: "two consecutive BATCH_CLOSE are
    /// equivalent to one."
    pub fn batch_close(&mut self, session_id: BatchSessionId) {
        if let Some(active) = &self.active_batch {
            if active.session_id == session_id {
                self.active_batch = None;
            }
        }
    }

    /// `STORAGE_CLEAR`. Rejected outright while a batch session is active;
    /// the caller must close the session first rather than have the clear
    /// silently deferred.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        if self.active_batch.is_some() {
            return Err(StorageError::ClearRejected);
        }
        for ring in self.rings.values_mut() {
            ring.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
