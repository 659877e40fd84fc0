use crate::{ConnectionId, Payload};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, error::TrySendError};

/// The hub-side handle of a subscriber connection.
///
/// Holds the producing end of the connection's bounded outbound queue.
/// The queue closes when the last handle is dropped, which is how the hub
/// tells the connection's write loop to stop.
#[derive(Debug)]
pub struct Subscriber {
    id: ConnectionId,
    outbound: mpsc::Sender<Payload>,
    connected_at: DateTime<Utc>,
}

impl Subscriber {
    /// Create a handle plus the receiving end of its outbound queue.
    /// Capacity is clamped to at least one slot.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Payload>) {
        let (outbound, receiver) = mpsc::channel(capacity.max(1));
        let subscriber = Self {
            id: ConnectionId::new(),
            outbound,
            connected_at: Utc::now(),
        };
        (subscriber, receiver)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    /// Non-blocking enqueue; never waits for the consumer.
    pub(crate) fn try_enqueue(&self, payload: Payload) -> Result<(), TrySendError<Payload>> {
        self.outbound.try_send(payload)
    }
}
