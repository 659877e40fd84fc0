use crate::ServerState;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - status plus live subscriber count
pub async fn health(State(state): State<ServerState>) -> Response {
    let (status, body) = match state.hub().connection_count().await {
        Ok(subscribers) => (
            StatusCode::OK,
            json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "subscribers": subscribers,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({
                "status": "unhealthy",
                "version": env!("CARGO_PKG_VERSION"),
                "error": e.error_code(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }),
        ),
    };

    (status, Json(body)).into_response()
}

/// GET /live - Kubernetes liveness probe (is the process alive?)
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - ready while the hub accepts subscribers
pub async fn readiness(State(state): State<ServerState>) -> Response {
    if state.hub().is_running() {
        (StatusCode::OK, "Ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Not Ready").into_response()
    }
}

/// GET /metrics - Prometheus text exposition
pub async fn metrics(State(state): State<ServerState>) -> Response {
    match &state.metrics_handle {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics recorder not installed").into_response(),
    }
}
