pub mod acceptor;
pub mod broadcast_message;
pub mod connection_config;
pub mod connection_id;
pub mod connection_registry;
pub mod disconnect_reason;
pub mod error;
pub mod hub;
pub mod hub_config;
mod hub_coordinator;
pub mod metrics;
pub mod origin_policy;
pub mod payload;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod subscriber;
pub mod subscriber_connection;

pub use acceptor::{AppState, handler};
pub use broadcast_message::BroadcastMessage;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_registry::{ConnectionRegistry, EvictionCause, FanOut};
pub use disconnect_reason::DisconnectReason;
pub use error::{Result, WsError};
pub use hub::{Hub, WeakHub};
pub use hub_config::HubConfig;
pub use metrics::Metrics;
pub use origin_policy::OriginPolicy;
pub use payload::Payload;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use subscriber::Subscriber;
pub use subscriber_connection::SubscriberConnection;

#[cfg(test)]
mod tests;
