// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A subscriber owns a bounded queue fed by every channel it subscribes to
//!. It belongs to exactly one task: `wait` is
//! the point at which that task yields.

use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};
use tracker_core::{Channel, Message, SubscriberId};

/// One message as delivered to a subscriber: the channel it arrived on plus
/// the payload.
pub type Delivery = (Channel, Message);

/// Result of `Subscriber::wait`.
pub enum WaitResult {
    Received(Delivery),
    /// Timed out with no message.
    NoMessage,
    /// Every sender (and thus every channel this subscriber was attached to)
    /// has been dropped; the bus is shutting down.
    Closed,
}

pub(crate) const SUBSCRIBER_QUEUE_CAPACITY: usize = 256;

pub struct Subscriber {
    id: SubscriberId,
    tx: mpsc::Sender<Delivery>,
    rx: mpsc::Receiver<Delivery>,
    /// The channel/message most recently received, consumed by the current
    /// state's run handler.
    last: Option<Delivery>,
}

impl Subscriber {
    pub fn new(id: SubscriberId) -> Self {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_QUEUE_CAPACITY);
        Self {
            id,
            tx,
            rx,
            last: None,
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// A clonable sender the bus registry can fan publishes out to, one
    /// clone per channel this subscriber attaches to.
    pub(crate) fn sender(&self) -> mpsc::Sender<Delivery> {
        self.tx.clone()
    }

    /// Wait for the next message across every channel this subscriber is
    /// attached to, or time out.
    pub async fn wait(&mut self, wait_timeout: Duration) -> WaitResult {
        match timeout(wait_timeout, self.rx.recv()).await {
            Ok(Some(delivery)) => {
                self.last = Some(delivery.clone());
                WaitResult::Received(delivery)
            }
            Ok(None) => WaitResult::Closed,
            Err(_) => WaitResult::NoMessage,
        }
    }

    /// The channel/message most recently received.
    pub fn last(&self) -> Option<&Delivery> {
        self.last.as_ref()
    }
}

#[cfg(test)]
#[path = "subscriber_tests.rs"]
mod tests;
