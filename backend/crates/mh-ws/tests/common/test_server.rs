#![allow(dead_code)]

use mh_ws::{AppState, ConnectionConfig, Hub, HubConfig, Metrics};

use axum::{Router, routing::get};
use axum_test::TestServer;
use tokio::time::{Duration, Instant, sleep};

pub const WS_PATH: &str = "/api/v2/websocket";

/// Configuration for test server instances
#[derive(Debug, Clone, Default)]
pub struct TestServerConfig {
    pub cors_origin: String,
    pub connection: ConnectionConfig,
}

impl TestServerConfig {
    pub fn with_cors_origin(origin: impl Into<String>) -> Self {
        Self {
            cors_origin: origin.into(),
            ..Default::default()
        }
    }
}

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

impl TestServerWithState {
    pub fn hub(&self) -> &Hub {
        &self.app_state.hub
    }

    /// Registration happens after the upgrade response, so poll until the hub agrees.
    pub async fn wait_for_subscribers(&self, expected: usize) {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            let count = self.hub().connection_count().await.expect("hub stopped");
            if count == expected {
                return;
            }
            assert!(
                Instant::now() < deadline,
                "expected {expected} subscribers, hub has {count}"
            );
            sleep(Duration::from_millis(10)).await;
        }
    }
}

/// Create a TestServer with default configuration. Must run inside a Tokio runtime.
pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default())
}

pub fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let (app, app_state) = create_app(config);
    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

fn create_app(config: TestServerConfig) -> (Router, AppState) {
    let metrics = Metrics::default();
    let hub = Hub::new(&config.cors_origin, HubConfig::default(), metrics.clone());
    let app_state = AppState::new(hub, config.connection, metrics);

    let router = Router::new()
        .route(WS_PATH, get(mh_ws::handler))
        .with_state(app_state.clone());

    (router, app_state)
}
