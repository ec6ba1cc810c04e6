// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shipment change notification bus.
//!
//! Any producer may raise a change notification; the dashboard only
//! subscribes. Notifications are informational and never authoritative:
//! they say "something changed", and the coordinator re-fetches canonical
//! data in response. Delivery is best effort; the polling backstop covers
//! a lost channel.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Logical name of the notification channel.
pub const SHIPMENT_UPDATED_CHANNEL: &str = "shipment:updated";

/// Maximum number of notifications to buffer per subscriber.
/// Slow subscribers drop the oldest notifications, which is harmless
/// here: any notification at all triggers the same re-fetch.
const EVENT_BUFFER_SIZE: usize = 100;

/// A shipment change notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentEvent {
    /// The shipment that changed, when the producer knows it.
    pub tracking_id: Option<String>,
}

/// Broadcaster for shipment change notifications.
///
/// A lightweight wrapper around `tokio::sync::broadcast` letting any
/// number of dashboard views subscribe to one process-wide channel.
#[derive(Clone)]
pub struct ShipmentEventBus {
    tx: broadcast::Sender<ShipmentEvent>,
}

impl ShipmentEventBus {
    /// Creates a new notification bus.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Raises a change notification to all subscribers.
    ///
    /// Non-blocking; if no dashboard is listening the notification is
    /// silently dropped.
    pub fn notify(&self, event: &ShipmentEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(
                    channel = SHIPMENT_UPDATED_CHANNEL,
                    receivers = count,
                    "Broadcast shipment notification"
                );
            }
            Err(_) => {
                debug!(
                    channel = SHIPMENT_UPDATED_CHANNEL,
                    "No receivers for shipment notification"
                );
            }
        }
    }

    /// Subscribes to the notification stream.
    ///
    /// Notifications raised before subscription are not received.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ShipmentEvent> {
        self.tx.subscribe()
    }
}

impl Default for ShipmentEventBus {
    fn default() -> Self {
        Self::new()
    }
}
