use crate::Payload;

/// A payload submitted by a producer for delivery to every subscriber
#[derive(Debug, Clone)]
pub struct BroadcastMessage {
    /// Frame body, cloned onto each subscriber queue
    pub payload: Payload,
    /// Message type for metrics/logging
    pub message_type: String,
}

impl BroadcastMessage {
    pub fn new(payload: Payload, message_type: impl Into<String>) -> Self {
        Self {
            payload,
            message_type: message_type.into(),
        }
    }
}
