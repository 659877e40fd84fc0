use crate::{
    ConnectionConfig, ConnectionId, DisconnectReason, Hub, Metrics, Payload,
    Result as WsErrorResult, Subscriber, WeakHub, WsError,
};

use std::fmt::Display;
use std::panic::Location;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use error_location::ErrorLocation;
use futures::{Sink, SinkExt, Stream, StreamExt};
use log::{debug, info, trace, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, timeout};

// interval_at panics on a zero period
const MIN_HEARTBEAT_INTERVAL: Duration = Duration::from_millis(1);

/// One subscriber session bridging the hub's outbound queue to a duplex
/// transport.
///
/// Runs two independent loops. The write loop drains the outbound queue
/// onto the transport and sends periodic pings; it stops cleanly only when
/// the hub closes the queue. The read loop watches the transport for
/// liveness and client close. Whichever loop ends first unregisters the
/// connection, and the hub closing the queue winds down the write loop.
///
/// Holds only a [`WeakHub`], so a running connection never keeps a dropped
/// hub alive.
pub struct SubscriberConnection {
    connection_id: ConnectionId,
    outbound: mpsc::Receiver<Payload>,
    hub: WeakHub,
    config: ConnectionConfig,
    metrics: Metrics,
}

impl SubscriberConnection {
    /// Build a connection and the [`Subscriber`] handle to register with the hub.
    pub fn new(hub: &Hub, config: ConnectionConfig, metrics: Metrics) -> (Subscriber, Self) {
        let (subscriber, outbound) = Subscriber::channel(config.send_buffer_size);
        let connection = Self {
            connection_id: subscriber.id(),
            outbound,
            hub: hub.downgrade(),
            config,
            metrics,
        };
        (subscriber, connection)
    }

    pub fn id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Run the connection over an upgraded WebSocket.
    pub async fn handle(self, socket: WebSocket) -> WsErrorResult<()> {
        let (sink, stream) = socket.split();
        self.run(sink, stream).await
    }

    /// Run both loops until the connection ends.
    ///
    /// Returns `Ok` when the client closed the connection or the hub closed
    /// the queue, the error that ended it otherwise.
    pub async fn run<Tx, Rx, E>(self, sink: Tx, stream: Rx) -> WsErrorResult<()>
    where
        Tx: Sink<Message> + Unpin + Send + 'static,
        Tx::Error: Display + Send,
        Rx: Stream<Item = Result<Message, E>> + Unpin + Send,
        E: Display,
    {
        let Self {
            connection_id,
            outbound,
            hub,
            config,
            metrics,
        } = self;

        info!("Subscriber connection {connection_id} established");
        metrics.connection_established();

        let mut write_task: JoinHandle<WsErrorResult<()>> = tokio::spawn(write_loop(
            connection_id,
            outbound,
            sink,
            config.clone(),
            metrics.clone(),
        ));

        let (result, reason) = tokio::select! {
            read = read_loop(connection_id, stream, config.heartbeat_timeout) => {
                let reason = DisconnectReason::from_read(&read);
                hub.unregister(connection_id).await;
                // Write loop ends once the hub drops the queue
                let write = join_write_loop(connection_id, write_task).await;
                (read.and(write), reason)
            }
            write = &mut write_task => {
                let write = flatten_join(connection_id, write);
                let reason = DisconnectReason::from_write(&write);
                hub.unregister(connection_id).await;
                (write, reason)
            }
        };

        if let Err(e) = &result {
            metrics.error_occurred(e.error_code());
        }
        metrics.connection_closed(reason.as_str());
        info!("Subscriber connection {connection_id} closed ({reason})");

        result
    }
}

async fn write_loop<Tx>(
    connection_id: ConnectionId,
    mut outbound: mpsc::Receiver<Payload>,
    mut sink: Tx,
    config: ConnectionConfig,
    metrics: Metrics,
) -> WsErrorResult<()>
where
    Tx: Sink<Message> + Unpin,
    Tx::Error: Display,
{
    let period = config.heartbeat_interval.max(MIN_HEARTBEAT_INTERVAL);
    let mut heartbeat = interval_at(Instant::now() + period, period);
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            next = outbound.recv() => match next {
                Some(payload) => {
                    write_frame(&mut sink, payload.into_message(), config.write_timeout).await?;
                    metrics.message_sent();
                }
                None => {
                    debug!("Outbound queue closed for connection {connection_id}, closing transport");
                    close_transport(&mut sink, config.write_timeout).await;
                    return Ok(());
                }
            },
            _ = heartbeat.tick() => {
                trace!("Ping connection {connection_id}");
                write_frame(&mut sink, Message::Ping(Bytes::new()), config.write_timeout).await?;
            }
        }
    }
}

async fn read_loop<Rx, E>(
    connection_id: ConnectionId,
    mut stream: Rx,
    heartbeat_timeout: Duration,
) -> WsErrorResult<()>
where
    Rx: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    loop {
        let next = match timeout(heartbeat_timeout, stream.next()).await {
            Ok(next) => next,
            Err(_) => {
                warn!("Connection {connection_id} silent for {heartbeat_timeout:?}");
                return Err(WsError::HeartbeatTimeout {
                    timeout: heartbeat_timeout,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        match next {
            Some(Ok(Message::Close(_))) => {
                info!("Received close frame from connection {connection_id}");
                return Ok(());
            }
            Some(Ok(Message::Pong(_))) => trace!("Pong from connection {connection_id}"),
            Some(Ok(Message::Ping(_))) => trace!("Ping from connection {connection_id}"),
            Some(Ok(Message::Text(text))) => debug!(
                "Discarding {} byte text frame from connection {connection_id}",
                text.as_str().len()
            ),
            Some(Ok(Message::Binary(data))) => debug!(
                "Discarding {} byte binary frame from connection {connection_id}",
                data.len()
            ),
            Some(Err(e)) => {
                warn!("WebSocket error on connection {connection_id}: {e}");
                return Err(WsError::ConnectionClosed {
                    reason: format!("WebSocket error: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            None => {
                info!("Connection {connection_id} closed by client");
                return Ok(());
            }
        }
    }
}

async fn write_frame<Tx>(sink: &mut Tx, message: Message, deadline: Duration) -> WsErrorResult<()>
where
    Tx: Sink<Message> + Unpin,
    Tx::Error: Display,
{
    match timeout(deadline, sink.send(message)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(WsError::TransportWrite {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }),
        Err(_) => Err(WsError::WriteTimeout {
            timeout: deadline,
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

/// Best effort: the peer may already be gone.
async fn close_transport<Tx>(sink: &mut Tx, deadline: Duration)
where
    Tx: Sink<Message> + Unpin,
{
    let _ = timeout(deadline, sink.send(Message::Close(None))).await;
    let _ = timeout(deadline, sink.close()).await;
}

async fn join_write_loop(
    connection_id: ConnectionId,
    write_task: JoinHandle<WsErrorResult<()>>,
) -> WsErrorResult<()> {
    flatten_join(connection_id, write_task.await)
}

fn flatten_join(
    connection_id: ConnectionId,
    joined: Result<WsErrorResult<()>, tokio::task::JoinError>,
) -> WsErrorResult<()> {
    joined.unwrap_or_else(|e| {
        Err(WsError::ConnectionClosed {
            reason: format!("write loop for {connection_id} aborted: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
    })
}
