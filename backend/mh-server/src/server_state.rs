use mh_ws::{AppState, Hub};

use axum::extract::FromRef;
use metrics_exporter_prometheus::PrometheusHandle;

/// State shared by every HTTP route
#[derive(Clone)]
pub struct ServerState {
    pub ws: AppState,
    /// `None` when the Prometheus recorder could not be installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl ServerState {
    pub fn new(ws: AppState, metrics_handle: Option<PrometheusHandle>) -> Self {
        Self { ws, metrics_handle }
    }

    pub fn hub(&self) -> &Hub {
        &self.ws.hub
    }
}

impl FromRef<ServerState> for AppState {
    fn from_ref(state: &ServerState) -> Self {
        state.ws.clone()
    }
}
