// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The message bus itself.
//!
//! A process-wide registry of channels, each with zero or more
//! subscribers. `publish` fans a message out to every subscriber attached
//! to its channel; ordering is FIFO per (channel, subscriber) because each
//! subscriber's queue is a single mpsc channel and publishes are applied to
//! it in call order.

use crate::error::BusError;
use crate::subscriber::Subscriber;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};
use tracker_core::{Channel, Message, SubscriberId};
use tracing::{debug, warn};

type SubscriberSlot = (SubscriberId, mpsc::Sender<(Channel, Message)>);

#[derive(Default)]
struct BusInner {
    channels: Mutex<HashMap<Channel, Vec<SubscriberSlot>>>,
}

/// A cheaply-clonable handle to the process-wide bus (`spec.md` §9: "the bus
/// ... are process-wide singletons with explicit initialization before any
/// task starts; tests construct a fresh instance per case").
#[derive(Clone, Default)]
pub struct Bus {
    inner: Arc<BusInner>,
}

/// What happened when a publish was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub delivered: Vec<SubscriberId>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `subscriber` to `channel`. Idempotent: subscribing the same
    /// id to the same channel twice is a no-op.
    pub fn subscribe(&self, channel: Channel, subscriber: &Subscriber) {
        let mut channels = self.inner.channels.lock();
        let slots = channels.entry(channel).or_default();
        if slots.iter().any(|(id, _)| *id == subscriber.id()) {
            return;
        }
        slots.push((subscriber.id(), subscriber.sender()));
    }

    /// Remove a subscriber from a channel (used when a task shuts down).
    pub fn unsubscribe(&self, channel: Channel, subscriber_id: SubscriberId) {
        let mut channels = self.inner.channels.lock();
        if let Some(slots) = channels.get_mut(&channel) {
            slots.retain(|(id, _)| *id != subscriber_id);
        }
    }

    /// Publish `message` on `channel`, fanning it out to every subscriber.
    ///
    /// Succeeds (with the set of subscribers actually delivered to) if
    /// every subscriber's queue accepted the message and the whole fan-out
    /// finished within `publish_timeout`. A full queue on one subscriber
    /// does not stop delivery to the others; it is
    /// reported back as `BusError::QueueFull`.
    pub async fn publish(
        &self,
        channel: Channel,
        message: Message,
        publish_timeout: Duration,
    ) -> Result<PublishOutcome, BusError> {
        debug_assert_eq!(
            message.channel(),
            channel,
            "publishing {message:?} on the wrong channel {channel:?}"
        );

        let slots = {
            let channels = self.inner.channels.lock();
            channels.get(&channel).cloned().unwrap_or_default()
        };

        let fanout = async {
            let mut delivered = Vec::with_capacity(slots.len());
            let mut failed = Vec::new();
            for (id, tx) in slots {
                match tx.try_send((channel, message.clone())) {
                    Ok(()) => delivered.push(id),
                    Err(mpsc::error::TrySendError::Full(_)) => failed.push(id),
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        debug!(subscriber = %id, %channel, "subscriber gone, skipping delivery");
                    }
                }
            }
            (delivered, failed)
        };

        let (delivered, failed) = timeout(publish_timeout, fanout)
            .await
            .map_err(|_| BusError::Timeout)?;

        if !failed.is_empty() {
            warn!(%channel, ?failed, "one or more subscriber queues were full");
            return Err(BusError::QueueFull { failed });
        }

        Ok(PublishOutcome { delivered })
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
