use metrics::{counter, gauge};

/// Metrics collector for the hub and its subscriber connections
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "mh_ws" }
    }

    /// Record subscriber connection loops started
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record subscriber connection finished
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record registry size after a membership change
    pub fn registry_size(&self, size: usize) {
        gauge!(format!("{}.registry.size", self.prefix)).set(size as f64);
    }

    /// Record one broadcast fanned out
    pub fn broadcast_published(&self, message_type: &str, delivered: usize) {
        counter!(format!("{}.broadcast.published", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.published.{}", self.prefix, message_type)).increment(1);
        counter!(format!("{}.messages.enqueued", self.prefix)).increment(delivered as u64);
    }

    /// Record a subscriber removed by a broadcast
    pub fn subscriber_evicted(&self, cause: &str) {
        counter!(format!("{}.evictions.total", self.prefix)).increment(1);
        counter!(format!("{}.evictions.{}", self.prefix, cause)).increment(1);
    }

    /// Record frame written to a subscriber
    pub fn message_sent(&self) {
        counter!(format!("{}.messages.sent", self.prefix)).increment(1);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
