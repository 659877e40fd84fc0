use crate::{BroadcastMessage, ConnectionId, ConnectionRegistry, Metrics, Subscriber};

use log::{debug, info};
use tokio::sync::{mpsc, oneshot};

/// Events accepted by the coordination loop, handled strictly in arrival order
pub(crate) enum HubCommand {
    Register(Subscriber),
    Unregister(ConnectionId),
    Broadcast(BroadcastMessage),
    Snapshot(oneshot::Sender<Vec<ConnectionId>>),
    Shutdown,
}

/// Single owner of the connection registry.
pub(crate) struct HubCoordinator {
    registry: ConnectionRegistry,
    commands: mpsc::Receiver<HubCommand>,
    metrics: Metrics,
}

impl HubCoordinator {
    pub(crate) fn new(commands: mpsc::Receiver<HubCommand>, metrics: Metrics) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            commands,
            metrics,
        }
    }

    /// Runs until shutdown is requested or every `Hub` handle is dropped.
    /// Either way all remaining subscriber queues are closed on exit.
    pub(crate) async fn run(mut self) {
        info!("Hub coordination loop started");

        while let Some(command) = self.commands.recv().await {
            match command {
                HubCommand::Register(subscriber) => self.register(subscriber),
                HubCommand::Unregister(connection_id) => self.unregister(connection_id),
                HubCommand::Broadcast(message) => self.broadcast(message),
                HubCommand::Snapshot(reply) => {
                    let _ = reply.send(self.registry.ids());
                }
                HubCommand::Shutdown => {
                    info!("Hub shutdown requested");
                    break;
                }
            }
        }

        // Refuse new commands; buffered registrations are dropped with the
        // receiver, closing their queues.
        self.commands.close();
        let closed = self.registry.clear();
        self.metrics.registry_size(0);
        info!("Hub coordination loop stopped, closed {closed} subscriber queue(s)");
    }

    fn register(&mut self, subscriber: Subscriber) {
        if self.registry.insert(subscriber) {
            self.metrics.registry_size(self.registry.len());
        }
    }

    fn unregister(&mut self, connection_id: ConnectionId) {
        if self.registry.remove(connection_id) {
            self.metrics.registry_size(self.registry.len());
        }
    }

    fn broadcast(&mut self, message: BroadcastMessage) {
        let fan_out = self.registry.fan_out(&message.payload);

        for (_, cause) in &fan_out.evicted {
            self.metrics.subscriber_evicted(cause.as_str());
        }
        if !fan_out.evicted.is_empty() {
            self.metrics.registry_size(self.registry.len());
        }
        self.metrics
            .broadcast_published(&message.message_type, fan_out.delivered);

        debug!(
            "Broadcast {} ({} bytes) to {} subscriber(s), {} evicted",
            message.message_type,
            message.payload.len(),
            fan_out.delivered,
            fan_out.evicted.len()
        );
    }
}
