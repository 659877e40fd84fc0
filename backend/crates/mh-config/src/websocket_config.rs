use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Per-subscriber outbound queue capacity
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 256;

// Heartbeat interval constraints (seconds)
pub const MIN_HEARTBEAT_INTERVAL_SECS: u64 = 5;
pub const MAX_HEARTBEAT_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_HEARTBEAT_INTERVAL_SECS: u64 = 54;

// Heartbeat timeout constraints (seconds)
pub const MIN_HEARTBEAT_TIMEOUT_SECS: u64 = 10;
pub const MAX_HEARTBEAT_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_HEARTBEAT_TIMEOUT_SECS: u64 = 60;

// Single frame write deadline (seconds)
pub const MIN_WRITE_TIMEOUT_SECS: u64 = 1;
pub const MAX_WRITE_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 10;

// Largest inbound frame accepted from a subscriber (bytes)
pub const MIN_MAX_MESSAGE_SIZE: usize = 64;
pub const MAX_MAX_MESSAGE_SIZE: usize = 1024 * 1024;
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 256;

// Hub coordination channel capacity
pub const MIN_COMMAND_BUFFER_SIZE: usize = 1;
pub const MAX_COMMAND_BUFFER_SIZE: usize = 65536;
pub const DEFAULT_COMMAND_BUFFER_SIZE: usize = 1024;

/// WebSocket subscriber settings.
/// All values validated to be within reasonable operational ranges.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    /// Outbound queue capacity per subscriber; a full queue evicts the subscriber
    pub send_buffer_size: usize,
    /// Heartbeat ping interval in seconds
    pub heartbeat_interval_secs: u64,
    /// Silence on the read side longer than this closes the subscriber
    pub heartbeat_timeout_secs: u64,
    /// Deadline for writing a single frame
    pub write_timeout_secs: u64,
    /// Largest inbound frame in bytes
    pub max_message_size: usize,
    /// Pending register/unregister/broadcast commands before producers wait
    pub command_buffer_size: usize,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            heartbeat_interval_secs: DEFAULT_HEARTBEAT_INTERVAL_SECS,
            heartbeat_timeout_secs: DEFAULT_HEARTBEAT_TIMEOUT_SECS,
            write_timeout_secs: DEFAULT_WRITE_TIMEOUT_SECS,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            command_buffer_size: DEFAULT_COMMAND_BUFFER_SIZE,
        }
    }
}

impl WebSocketConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(
            "websocket.send_buffer_size",
            self.send_buffer_size,
            MIN_SEND_BUFFER_SIZE,
            MAX_SEND_BUFFER_SIZE,
        )?;
        check_range(
            "websocket.heartbeat_interval_secs",
            self.heartbeat_interval_secs,
            MIN_HEARTBEAT_INTERVAL_SECS,
            MAX_HEARTBEAT_INTERVAL_SECS,
        )?;
        check_range(
            "websocket.heartbeat_timeout_secs",
            self.heartbeat_timeout_secs,
            MIN_HEARTBEAT_TIMEOUT_SECS,
            MAX_HEARTBEAT_TIMEOUT_SECS,
        )?;
        check_range(
            "websocket.write_timeout_secs",
            self.write_timeout_secs,
            MIN_WRITE_TIMEOUT_SECS,
            MAX_WRITE_TIMEOUT_SECS,
        )?;
        check_range(
            "websocket.max_message_size",
            self.max_message_size,
            MIN_MAX_MESSAGE_SIZE,
            MAX_MAX_MESSAGE_SIZE,
        )?;
        check_range(
            "websocket.command_buffer_size",
            self.command_buffer_size,
            MIN_COMMAND_BUFFER_SIZE,
            MAX_COMMAND_BUFFER_SIZE,
        )?;

        if self.heartbeat_timeout_secs <= self.heartbeat_interval_secs {
            return Err(ConfigError::config(format!(
                "websocket.heartbeat_timeout_secs ({}) must be greater than heartbeat_interval_secs ({})",
                self.heartbeat_timeout_secs, self.heartbeat_interval_secs
            )));
        }

        Ok(())
    }
}

#[track_caller]
fn check_range<T>(field: &str, value: T, min: T, max: T) -> ConfigErrorResult<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(ConfigError::config(format!(
            "{field} must be {min}-{max}, got {value}"
        )));
    }
    Ok(())
}
