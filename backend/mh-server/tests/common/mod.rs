#![allow(dead_code)]

//! Test infrastructure for mh-server HTTP tests

use mh_server::{BasicCredentials, RouterOptions, ServerState, build_router};
use mh_ws::{AppState, ConnectionConfig, Hub, HubConfig, Metrics};

use axum_test::TestServer;
use tokio::time::{Duration, Instant, sleep};

pub struct TestApp {
    pub server: TestServer,
    pub hub: Hub,
}

impl TestApp {
    pub async fn wait_for_subscribers(&self, expected: usize) {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            let count = self.hub.connection_count().await.expect("hub stopped");
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

#[derive(Default)]
pub struct TestAppConfig {
    pub cors_origin: String,
    pub route_prefix: String,
    pub basic_auth: Option<(&'static str, &'static str)>,
}

/// Build the full router on a real HTTP transport. Must run inside a Tokio runtime.
pub fn create_test_app(config: TestAppConfig) -> TestApp {
    let metrics = Metrics::new();
    let hub = Hub::new(&config.cors_origin, HubConfig::default(), metrics.clone());
    let state = ServerState::new(
        AppState::new(hub.clone(), ConnectionConfig::default(), metrics),
        None,
    );
    let options = RouterOptions {
        route_prefix: config.route_prefix,
        basic_auth: config
            .basic_auth
            .map(|(user, pass)| BasicCredentials::new(user, pass)),
    };

    let server = TestServer::builder()
        .http_transport()
        .build(build_router(state, &options))
        .expect("Failed to create test server");

    TestApp { server, hub }
}
