//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

type Storage = Arc<Mutex<HashMap<String, String>>>;

/// Handle to a running mock node.
pub struct MockNode {
    pub addr: SocketAddr,
    storage: Storage,
}

impl MockNode {
    /// WebSocket endpoint of this node.
    pub fn endpoint(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Peek at the stored username for an address.
    #[allow(dead_code)]
    pub async fn stored(&self, address: &str) -> Option<String> {
        self.storage.lock().await.get(address).cloned()
    }
}

/// Start a mock username-storage node.
///
/// Implements `system_health`, `author_submitExtrinsic`, and
/// `usernameStorage_getUsername` over an in-memory map. `inclusion_delay`
/// is how long a submitted value takes to become visible to queries.
pub async fn start_mock_node(addr: SocketAddr, inclusion_delay: Duration) -> MockNode {
    let listener = TcpListener::bind(addr).await.unwrap();
    let storage: Storage = Arc::new(Mutex::new(HashMap::new()));
    let accept_storage = storage.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let storage = accept_storage.clone();
                    tokio::spawn(async move {
                        let Ok(ws) = accept_async(socket).await else {
                            return;
                        };
                        let (mut sink, mut stream) = ws.split();
                        while let Some(Ok(msg)) = stream.next().await {
                            let Message::Text(text) = msg else { continue };
                            let Ok(request) = serde_json::from_str::<Value>(text.as_str())
                            else {
                                continue;
                            };
                            let reply =
                                handle_request(&storage, &request, inclusion_delay).await;
                            if sink.send(Message::text(reply.to_string())).await.is_err() {
                                break;
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockNode { addr, storage }
}

async fn handle_request(storage: &Storage, request: &Value, inclusion_delay: Duration) -> Value {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default();
    let params = &request["params"];

    match method {
        "system_health" => result(
            id,
            json!({"peers": 1, "isSyncing": false, "shouldHavePeers": false}),
        ),
        "author_submitExtrinsic" => {
            let Some(wire) = params[0].as_str() else {
                return error(id, -32602, "Invalid params");
            };
            let Some(bytes) = wire.strip_prefix("0x").and_then(|h| hex::decode(h).ok())
            else {
                return error(id, 1002, "Bad extrinsic encoding");
            };
            let Ok(envelope) = serde_json::from_slice::<Value>(&bytes) else {
                return error(id, 1002, "Bad extrinsic encoding");
            };
            let (Some(signer), Some(username)) = (
                envelope["signer"].as_str(),
                envelope["call"]["username"].as_str(),
            ) else {
                return error(id, 1002, "Bad extrinsic encoding");
            };

            // Pallet-side validation.
            if username.is_empty() {
                return error(id, 1010, "UsernameEmpty");
            }
            if username.len() > 32 {
                return error(id, 1011, "UsernameTooLong");
            }

            let digest: [u8; 32] = Sha256::digest(&bytes).into();
            let signer = signer.to_string();
            let username = username.to_string();
            if inclusion_delay.is_zero() {
                storage.lock().await.insert(signer, username);
            } else {
                let storage = storage.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(inclusion_delay).await;
                    storage.lock().await.insert(signer, username);
                });
            }

            result(id, json!(format!("0x{}", hex::encode(digest))))
        }
        "usernameStorage_getUsername" => {
            let Some(address) = params[0].as_str() else {
                return error(id, -32602, "Invalid params");
            };
            match storage.lock().await.get(address) {
                Some(username) => result(id, json!(username)),
                None => result(id, Value::Null),
            }
        }
        _ => error(id, -32601, "Method not found"),
    }
}

fn result(id: Value, value: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "result": value})
}

fn error(id: Value, code: i64, message: &str) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}})
}

/// Start a node that completes the WebSocket handshake but never answers.
#[allow(dead_code)]
pub async fn start_silent_node(addr: SocketAddr) {
    let listener = TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    tokio::spawn(async move {
                        let Ok(ws) = accept_async(socket).await else {
                            return;
                        };
                        let (_sink, mut stream) = ws.split();
                        while let Some(Ok(_)) = stream.next().await {}
                    });
                }
                Err(_) => break,
            }
        }
    });
}
