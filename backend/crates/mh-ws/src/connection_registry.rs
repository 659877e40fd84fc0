use crate::{ConnectionId, Payload, Subscriber};

use std::collections::HashMap;

use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::mpsc::error::TrySendError;

/// Why a broadcast removed a subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionCause {
    /// Outbound queue had no free slot
    QueueFull,
    /// Write loop already gone, nobody drains the queue
    QueueClosed,
}

impl EvictionCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QueueFull => "queue_full",
            Self::QueueClosed => "queue_closed",
        }
    }
}

/// Result of offering one payload to every registered subscriber
#[derive(Debug, Default)]
pub struct FanOut {
    pub delivered: usize,
    pub evicted: Vec<(ConnectionId, EvictionCause)>,
}

/// The set of active subscriber connections.
///
/// Not shared: the hub's coordination loop owns the only instance, so every
/// mutation is serialized without locks. Removing an entry drops its
/// [`Subscriber`] handle, which closes that connection's outbound queue.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Subscriber>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber. Returns false, and drops the new handle, if the id
    /// is already registered.
    pub fn insert(&mut self, subscriber: Subscriber) -> bool {
        let connection_id = subscriber.id();
        if self.connections.contains_key(&connection_id) {
            warn!("Connection {connection_id} is already registered, ignoring duplicate");
            return false;
        }

        self.connections.insert(connection_id, subscriber);
        info!(
            "Registered connection {connection_id} ({} total)",
            self.connections.len()
        );
        true
    }

    /// Remove a subscriber if present. Absent ids are a no-op.
    pub fn remove(&mut self, connection_id: ConnectionId) -> bool {
        match self.connections.remove(&connection_id) {
            Some(subscriber) => {
                let session = Utc::now() - subscriber.connected_at();
                info!(
                    "Unregistered connection {connection_id} after {}s ({} total remaining)",
                    session.num_seconds(),
                    self.connections.len()
                );
                true
            }
            None => {
                debug!("Connection {connection_id} already unregistered");
                false
            }
        }
    }

    /// Offer `payload` to every subscriber without waiting. Subscribers whose
    /// queue refuses it are removed before this returns.
    pub fn fan_out(&mut self, payload: &Payload) -> FanOut {
        let mut fan_out = FanOut::default();

        for (connection_id, subscriber) in &self.connections {
            match subscriber.try_enqueue(payload.clone()) {
                Ok(()) => fan_out.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    fan_out
                        .evicted
                        .push((*connection_id, EvictionCause::QueueFull));
                }
                Err(TrySendError::Closed(_)) => {
                    fan_out
                        .evicted
                        .push((*connection_id, EvictionCause::QueueClosed));
                }
            }
        }

        for (connection_id, cause) in &fan_out.evicted {
            warn!(
                "Evicting connection {connection_id}: {}",
                cause.as_str()
            );
            self.remove(*connection_id);
        }

        fan_out
    }

    /// Remove every subscriber, closing all queues. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.connections.len();
        self.connections.clear();
        removed
    }

    pub fn contains(&self, connection_id: ConnectionId) -> bool {
        self.connections.contains_key(&connection_id)
    }

    pub fn ids(&self) -> Vec<ConnectionId> {
        self.connections.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
