use crate::common::test_server::WS_PATH;

use axum_test::{TestServer, TestWebSocket};

/// WebSocket test client wrapper
pub struct WsTestClient {
    ws: TestWebSocket,
}

impl WsTestClient {
    /// Connect without an Origin header, as non-browser clients do
    pub async fn connect(server: &TestServer) -> Self {
        let ws = server
            .get_websocket(WS_PATH)
            .await
            .into_websocket()
            .await;

        Self { ws }
    }

    pub async fn connect_with_origin(server: &TestServer, origin: &str) -> Self {
        let ws = server
            .get_websocket(WS_PATH)
            .add_header("Origin", origin)
            .await
            .into_websocket()
            .await;

        Self { ws }
    }

    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    pub async fn receive_text(&mut self) -> String {
        self.ws.receive_text().await
    }

    pub async fn close(self) {
        self.ws.close().await;
    }
}

pub async fn connect_clients(server: &TestServer, count: usize) -> Vec<WsTestClient> {
    let mut clients = Vec::with_capacity(count);
    for _ in 0..count {
        clients.push(WsTestClient::connect(server).await);
    }
    clients
}
