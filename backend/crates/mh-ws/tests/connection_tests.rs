mod common;

use common::test_client::WsTestClient;
use common::test_server::create_test_server;

#[tokio::test]
async fn given_client_when_connecting_then_registered_with_hub() {
    // Given
    let server = create_test_server();

    // When
    let client = WsTestClient::connect(&server.server).await;

    // Then
    server.wait_for_subscribers(1).await;
    client.close().await;
}

#[tokio::test]
async fn given_connected_client_when_closed_then_unregistered() {
    // Given
    let server = create_test_server();
    let client = WsTestClient::connect(&server.server).await;
    server.wait_for_subscribers(1).await;

    // When
    client.close().await;

    // Then
    server.wait_for_subscribers(0).await;
}

#[tokio::test]
async fn given_connected_client_when_sending_small_text_then_still_registered() {
    // Given
    let server = create_test_server();
    let mut client = WsTestClient::connect(&server.server).await;
    server.wait_for_subscribers(1).await;

    // When
    client.send_text("hello hub").await;

    // Then
    server.wait_for_subscribers(1).await;
    client.close().await;
}

#[tokio::test]
async fn given_connected_client_when_sending_oversized_frame_then_disconnected() {
    // Given
    let server = create_test_server();
    let mut client = WsTestClient::connect(&server.server).await;
    server.wait_for_subscribers(1).await;

    // When
    client.send_text("x".repeat(4096)).await;

    // Then
    server.wait_for_subscribers(0).await;
}

#[tokio::test]
async fn given_connected_clients_when_hub_shuts_down_then_all_unregistered() {
    // Given
    let server = create_test_server();
    let _clients = common::test_client::connect_clients(&server.server, 3).await;
    server.wait_for_subscribers(3).await;

    // When
    server.hub().shutdown().await;

    // Then
    assert!(server.hub().connection_count().await.is_err());
}
