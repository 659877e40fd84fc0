use crate::{ConnectionConfig, Hub, Metrics, SubscriberConnection, WsError};

use std::panic::Location;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use log::{error, warn};
use tracing::{Instrument, info_span};

/// Shared state for the WebSocket route
#[derive(Clone)]
pub struct AppState {
    pub hub: Hub,
    pub config: ConnectionConfig,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(hub: Hub, config: ConnectionConfig, metrics: Metrics) -> Self {
        Self {
            hub,
            config,
            metrics,
        }
    }
}

/// WebSocket upgrade handler
pub async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            warn!("WebSocket upgrade rejected: {rejection}");
            state.metrics.error_occurred("upgrade_rejected");
            return rejection.into_response();
        }
    };

    // A header that is present but not visible ASCII never matches an allow-list entry
    let origin = headers
        .get(header::ORIGIN)
        .map(|value| value.to_str().unwrap_or_default());
    if !state.hub.origin_policy().check_request(origin) {
        let rejected = WsError::OriginRejected {
            origin: origin.unwrap_or_default().to_string(),
            location: ErrorLocation::from(Location::caller()),
        };
        warn!("Refusing WebSocket upgrade: {rejected}");
        state.metrics.error_occurred(rejected.error_code());
        return StatusCode::FORBIDDEN.into_response();
    }

    let max_message_size = state.config.max_message_size;
    let metrics = state.metrics.clone();

    ws.max_message_size(max_message_size)
        .max_frame_size(max_message_size)
        .on_failed_upgrade(move |e| {
            error!("WebSocket upgrade failed: {e}");
            metrics.error_occurred("upgrade_failed");
        })
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Build the subscriber connection, register it and run it to completion
async fn handle_socket(socket: WebSocket, state: AppState) {
    let AppState {
        hub,
        config,
        metrics,
    } = state;
    let (subscriber, connection) = SubscriberConnection::new(&hub, config, metrics);
    let connection_id = connection.id();

    let span = info_span!("ws_connection", connection_id = %connection_id);
    async move {
        hub.register(subscriber).await;
        // The connection keeps only a weak back-reference from here on
        drop(hub);

        if let Err(e) = connection.handle(socket).await {
            error!("Connection {connection_id} error: {e}");
        }
    }
    .instrument(span)
    .await
}
