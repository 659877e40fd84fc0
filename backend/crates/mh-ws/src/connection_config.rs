use std::time::Duration;

/// Configuration for subscriber connections
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Outbound queue capacity; a broadcast that finds it full evicts the subscriber
    pub send_buffer_size: usize,
    /// Interval between Ping frames sent by the write loop
    pub heartbeat_interval: Duration,
    /// Longest silence tolerated on the read side
    pub heartbeat_timeout: Duration,
    /// Deadline for writing one frame to the transport
    pub write_timeout: Duration,
    /// Largest inbound frame accepted at upgrade time
    pub max_message_size: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 256,
            heartbeat_interval: Duration::from_secs(54),
            heartbeat_timeout: Duration::from_secs(60),
            write_timeout: Duration::from_secs(10),
            max_message_size: 256,
        }
    }
}
