use crate::WsError;

/// Why a subscriber connection ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
    /// Client sent a Close frame or ended the stream
    ClientClosed,
    /// Hub closed the outbound queue (eviction, unregister or shutdown)
    QueueClosed,
    ReadError,
    WriteError,
    HeartbeatTimeout,
}

impl DisconnectReason {
    pub(crate) fn from_read(result: &Result<(), WsError>) -> Self {
        match result {
            Ok(()) => Self::ClientClosed,
            Err(WsError::HeartbeatTimeout { .. }) => Self::HeartbeatTimeout,
            Err(_) => Self::ReadError,
        }
    }

    pub(crate) fn from_write(result: &Result<(), WsError>) -> Self {
        match result {
            Ok(()) => Self::QueueClosed,
            Err(_) => Self::WriteError,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientClosed => "client_closed",
            Self::QueueClosed => "queue_closed",
            Self::ReadError => "read_error",
            Self::WriteError => "write_error",
            Self::HeartbeatTimeout => "heartbeat_timeout",
        }
    }
}

impl std::fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
