use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Transport write failed: {message} {location}")]
    TransportWrite {
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport write timed out after {timeout:?} {location}")]
    WriteTimeout {
        timeout: Duration,
        location: ErrorLocation,
    },

    #[error("No frame from subscriber within {timeout:?} {location}")]
    HeartbeatTimeout {
        timeout: Duration,
        location: ErrorLocation,
    },

    #[error("Hub is not running {location}")]
    HubStopped { location: ErrorLocation },

    #[error("Payload serialization failed: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Origin not allowed: {origin} {location}")]
    OriginRejected {
        origin: String,
        location: ErrorLocation,
    },
}

impl WsError {
    /// Stable machine-readable code, also used as a metrics label.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionClosed { .. } => "CONNECTION_CLOSED",
            Self::TransportWrite { .. } => "TRANSPORT_WRITE",
            Self::WriteTimeout { .. } => "WRITE_TIMEOUT",
            Self::HeartbeatTimeout { .. } => "HEARTBEAT_TIMEOUT",
            Self::HubStopped { .. } => "HUB_STOPPED",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
            Self::OriginRejected { .. } => "ORIGIN_REJECTED",
        }
    }
}

impl From<serde_json::Error> for WsError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
