//! RPC client behavior against a mock node.

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::json;
use username_probe::rpc::{RpcClient, RpcError};

mod common;

#[tokio::test]
async fn test_unknown_method_surfaces_remote_error() {
    let addr: SocketAddr = "127.0.0.1:29321".parse().unwrap();
    let node = common::start_mock_node(addr, Duration::ZERO).await;

    let client = RpcClient::connect(
        &node.endpoint(),
        Duration::from_secs(2),
        Duration::from_secs(2),
    )
    .await
    .unwrap();

    let err = client.call("no_suchMethod", vec![]).await.unwrap_err();
    match err {
        RpcError::Remote { code, message } => {
            assert_eq!(code, -32601);
            assert_eq!(message, "Method not found");
        }
        other => panic!("unexpected error: {other}"),
    }

    client.disconnect().await;
}

#[tokio::test]
async fn test_concurrent_calls_are_correlated() {
    let addr: SocketAddr = "127.0.0.1:29322".parse().unwrap();
    let node = common::start_mock_node(addr, Duration::ZERO).await;

    let client = RpcClient::connect(
        &node.endpoint(),
        Duration::from_secs(2),
        Duration::from_secs(2),
    )
    .await
    .unwrap();

    let (health, missing) = tokio::join!(
        client.call("system_health", vec![]),
        client.call("usernameStorage_getUsername", vec![json!("0xdeadbeef")]),
    );

    let health = health.unwrap();
    assert_eq!(health["peers"], 1);
    assert_eq!(missing.unwrap(), serde_json::Value::Null);

    client.disconnect().await;
}

#[tokio::test]
async fn test_request_times_out_against_silent_node() {
    let addr: SocketAddr = "127.0.0.1:29323".parse().unwrap();
    common::start_silent_node(addr).await;

    let client = RpcClient::connect(
        &format!("ws://{addr}"),
        Duration::from_secs(2),
        Duration::from_secs(1),
    )
    .await
    .unwrap();

    let err = client.call("system_health", vec![]).await.unwrap_err();
    assert!(matches!(err, RpcError::RequestTimeout(1)));

    client.disconnect().await;
}
