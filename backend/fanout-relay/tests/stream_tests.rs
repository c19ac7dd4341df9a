use fanout_relay::{AppState, Heartbeat, STREAM_PATH, ShutdownCoordinator, build_router};

use fanout_config::BroadcastConfig;
use fanout_core::{Broadcaster, Metrics, SubscriberId};

use std::sync::Arc;

use axum_test::{TestServer, WsMessage};
use tokio::time::{Duration, sleep, timeout};

struct TestRelay {
    server: TestServer,
    state: AppState,
}

fn create_test_relay() -> TestRelay {
    create_test_relay_with(BroadcastConfig::default())
}

fn create_test_relay_with(config: BroadcastConfig) -> TestRelay {
    let broadcaster = Broadcaster::new(config, Metrics::new("relay_test"));
    let state = AppState::new(broadcaster, ShutdownCoordinator::new());
    let server = TestServer::builder()
        .http_transport()
        .build(build_router(state.clone()))
        .expect("Failed to create test server");

    TestRelay { server, state }
}

fn heartbeat(counter: u64) -> Arc<Heartbeat> {
    Arc::new(Heartbeat {
        node_name: String::from("test-node"),
        counter,
        timestamp: 1_700_000_000_000 + counter as i64,
        boot_timestamp: 1_700_000_000_000,
        version: String::from("test"),
    })
}

/// The subscription is made after the upgrade completes, so wait for it.
async fn wait_for_subscribers(broadcaster: &Broadcaster<Heartbeat>, expected: usize) {
    timeout(Duration::from_secs(5), async {
        while broadcaster.subscriber_count().await != expected {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("expected {expected} subscribers"));
}

#[tokio::test]
async fn given_two_stream_clients_when_heartbeat_published_then_both_receive_json() {
    // Given
    let relay = create_test_relay();
    let mut client1 = relay
        .server
        .get_websocket(STREAM_PATH)
        .await
        .into_websocket()
        .await;
    let mut client2 = relay
        .server
        .get_websocket(STREAM_PATH)
        .await
        .into_websocket()
        .await;
    wait_for_subscribers(&relay.state.broadcaster, 2).await;

    // When
    let outcome = relay.state.broadcaster.publish(heartbeat(3)).await;

    // Then
    assert_eq!(outcome.delivered, 2);
    for client in [&mut client1, &mut client2] {
        let received: Heartbeat = serde_json::from_str(&client.receive_text().await).unwrap();
        assert_eq!(received, *heartbeat(3));
    }

    client1.close().await;
    client2.close().await;
}

#[tokio::test]
async fn given_stream_client_when_it_closes_then_subscription_removed() {
    // Given
    let relay = create_test_relay();
    let client = relay
        .server
        .get_websocket(STREAM_PATH)
        .await
        .into_websocket()
        .await;
    wait_for_subscribers(&relay.state.broadcaster, 1).await;

    // When
    client.close().await;

    // Then
    wait_for_subscribers(&relay.state.broadcaster, 0).await;
}

#[tokio::test]
async fn given_stream_client_when_shutdown_then_subscription_removed() {
    // Given
    let relay = create_test_relay();
    let _client = relay
        .server
        .get_websocket(STREAM_PATH)
        .await
        .into_websocket()
        .await;
    wait_for_subscribers(&relay.state.broadcaster, 1).await;

    // When
    relay.state.shutdown.shutdown();

    // Then
    wait_for_subscribers(&relay.state.broadcaster, 0).await;
}

#[tokio::test]
async fn given_stream_client_when_several_published_then_received_in_order() {
    // Given
    let relay = create_test_relay();
    let mut client = relay
        .server
        .get_websocket(STREAM_PATH)
        .await
        .into_websocket()
        .await;
    wait_for_subscribers(&relay.state.broadcaster, 1).await;

    // When
    for counter in 0..5 {
        relay.state.broadcaster.publish(heartbeat(counter)).await;
    }

    // Then
    for expected in 0..5 {
        let received: Heartbeat = serde_json::from_str(&client.receive_text().await).unwrap();
        assert_eq!(received.counter, expected);
    }

    client.close().await;
}

#[tokio::test]
async fn given_connected_client_when_health_then_reports_subscriber_count() {
    // Given
    let relay = create_test_relay();
    let client = relay
        .server
        .get_websocket(STREAM_PATH)
        .await
        .into_websocket()
        .await;
    wait_for_subscribers(&relay.state.broadcaster, 1).await;

    // When
    let response = relay.server.get("/health").await;

    // Then
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["subscribers"], 1);

    client.close().await;
}

#[tokio::test]
async fn given_stream_client_when_shutdown_then_close_frame_sent() {
    // Given
    let relay = create_test_relay();
    let mut client = relay
        .server
        .get_websocket(STREAM_PATH)
        .await
        .into_websocket()
        .await;
    wait_for_subscribers(&relay.state.broadcaster, 1).await;

    // When
    relay.state.shutdown.shutdown();

    // Then
    let message = timeout(Duration::from_secs(5), client.receive_message())
        .await
        .expect("close frame should arrive");
    assert!(matches!(message, WsMessage::Close(_)));
}

#[tokio::test]
async fn given_stream_client_when_unsubscribed_elsewhere_then_close_frame_sent() {
    // Given - a one-id space, so the only subscriber is always id 0
    let relay = create_test_relay_with(BroadcastConfig {
        id_space: 1,
        ..Default::default()
    });
    let mut client = relay
        .server
        .get_websocket(STREAM_PATH)
        .await
        .into_websocket()
        .await;
    wait_for_subscribers(&relay.state.broadcaster, 1).await;

    // When
    assert!(relay.state.broadcaster.unsubscribe(SubscriberId::new(0)).await);

    // Then
    let message = timeout(Duration::from_secs(5), client.receive_message())
        .await
        .expect("close frame should arrive");
    assert!(matches!(message, WsMessage::Close(_)));
}
