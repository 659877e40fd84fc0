use crate::hub_coordinator::{HubCommand, HubCoordinator};
use crate::{
    BroadcastMessage, ConnectionId, HubConfig, Metrics, OriginPolicy, Result as WsResult,
    Subscriber, WsError,
};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot};

/// Handle to a running broadcast hub.
///
/// Cheap to clone. Every operation is a message to the hub's coordination
/// task, which owns the subscriber registry and handles one command at a
/// time in submission order. Commands sent from one task are therefore
/// observed in the order they were sent.
#[derive(Clone)]
pub struct Hub {
    commands: mpsc::Sender<HubCommand>,
    origin_policy: Arc<OriginPolicy>,
}

impl Hub {
    /// Start a hub. `cors_origin` is a comma-separated allow-list of
    /// origins; empty allows all.
    ///
    /// Spawns the coordination task, so it must be called from within a
    /// Tokio runtime.
    pub fn new(cors_origin: &str, config: HubConfig, metrics: Metrics) -> Self {
        let (commands, receiver) = mpsc::channel(config.command_buffer_size.max(1));
        tokio::spawn(HubCoordinator::new(receiver, metrics).run());

        let origin_policy = OriginPolicy::from_allow_list(cors_origin);
        if origin_policy.allows_all() {
            info!("Hub started, all origins allowed");
        } else {
            info!(
                "Hub started, allowed origins: {}",
                origin_policy.allowed_origins().join(", ")
            );
        }

        Self {
            commands,
            origin_policy: Arc::new(origin_policy),
        }
    }

    pub fn origin_policy(&self) -> &OriginPolicy {
        &self.origin_policy
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.origin_policy.is_origin_allowed(origin)
    }

    /// Submit a subscriber for inclusion in subsequent broadcasts.
    ///
    /// Waits only for the coordination channel to accept the command. If
    /// the hub has stopped the handle is dropped, closing its queue.
    pub async fn register(&self, subscriber: Subscriber) {
        let connection_id = subscriber.id();
        if self
            .submit(HubCommand::Register(subscriber))
            .await
            .is_err()
        {
            warn!("Hub stopped, connection {connection_id} closed without registering");
        }
    }

    /// Remove a subscriber and close its outbound queue. Idempotent.
    pub async fn unregister(&self, connection_id: ConnectionId) {
        if self
            .submit(HubCommand::Unregister(connection_id))
            .await
            .is_err()
        {
            debug!("Hub stopped, unregister of {connection_id} not needed");
        }
    }

    /// Hand a message to the coordination loop for delivery to every
    /// registered subscriber. Fire-and-forget: slow subscribers are evicted
    /// rather than reported.
    pub async fn broadcast(&self, message: BroadcastMessage) {
        let message_type = message.message_type.clone();
        if self
            .submit(HubCommand::Broadcast(message))
            .await
            .is_err()
        {
            warn!("Hub stopped, dropping {message_type} broadcast");
        }
    }

    /// Ids registered once every command submitted before this call is handled.
    pub async fn connection_ids(&self) -> WsResult<Vec<ConnectionId>> {
        let (reply, response) = oneshot::channel();
        self.submit(HubCommand::Snapshot(reply)).await?;
        response.await.map_err(|_| WsError::HubStopped {
            location: ErrorLocation::from(Location::caller()),
        })
    }

    pub async fn connection_count(&self) -> WsResult<usize> {
        Ok(self.connection_ids().await?.len())
    }

    /// Stop the coordination loop and close every subscriber queue, which
    /// makes each write loop close its transport. Later calls are no-ops.
    pub async fn shutdown(&self) {
        if self.submit(HubCommand::Shutdown).await.is_err() {
            debug!("Hub already stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    /// A handle that does not keep the coordination loop alive.
    pub fn downgrade(&self) -> WeakHub {
        WeakHub {
            commands: self.commands.downgrade(),
        }
    }

    async fn submit(&self, command: HubCommand) -> WsResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| WsError::HubStopped {
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Back-reference from a subscriber connection to its hub.
///
/// The coordination loop stops once every [`Hub`] is dropped, even while
/// connections holding a `WeakHub` are still running.
#[derive(Clone)]
pub struct WeakHub {
    commands: mpsc::WeakSender<HubCommand>,
}

impl WeakHub {
    /// Same as [`Hub::unregister`]; a no-op once the hub is gone.
    pub async fn unregister(&self, connection_id: ConnectionId) {
        let Some(commands) = self.commands.upgrade() else {
            debug!("Hub dropped, unregister of {connection_id} not needed");
            return;
        };

        if commands
            .send(HubCommand::Unregister(connection_id))
            .await
            .is_err()
        {
            debug!("Hub stopped, unregister of {connection_id} not needed");
        }
    }
}
