//! WebSocket JSON-RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the node's WebSocket endpoint
//! - Correlate in-flight requests with responses by id
//! - Handle timeouts and network errors gracefully
//! - Close the connection explicitly on disconnect
//!
//! # Data Flow
//! ```text
//! call() ──▶ writer task ──▶ WebSocket ──▶ node
//!                                           │
//! caller ◀── oneshot ◀── reader task ◀──────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::rpc::protocol::{Request, Response};
use crate::rpc::types::{RpcError, RpcResult};

/// Map of in-flight request ids to their reply channels.
type PendingMap = Arc<DashMap<u64, oneshot::Sender<RpcResult<Value>>>>;

/// Outbound channel depth. Requests are small and sequential in practice.
const OUTBOUND_BUFFER: usize = 32;

/// WebSocket JSON-RPC client.
pub struct RpcClient {
    /// Endpoint this client is connected to, for logging.
    endpoint: String,
    /// Outbound frame channel consumed by the writer task.
    outbound: mpsc::Sender<Message>,
    /// In-flight requests awaiting a response.
    pending: PendingMap,
    /// Next request id.
    next_id: AtomicU64,
    /// Per-request timeout.
    request_timeout: Duration,
    /// Reader task handle, aborted on disconnect.
    reader: JoinHandle<()>,
    /// Writer task handle, aborted on disconnect.
    writer: JoinHandle<()>,
}

impl RpcClient {
    /// Connect to a WebSocket JSON-RPC endpoint.
    ///
    /// # Arguments
    /// * `endpoint` - ws:// or wss:// URL of the node
    /// * `connect_timeout` - Maximum time for the handshake
    /// * `request_timeout` - Maximum time to wait for each response
    pub async fn connect(
        endpoint: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> RpcResult<Self> {
        let handshake = connect_async(endpoint);
        let (socket, _) = timeout(connect_timeout, handshake)
            .await
            .map_err(|_| RpcError::ConnectTimeout(connect_timeout.as_secs()))?
            .map_err(|e| RpcError::Connect(e.to_string()))?;

        let (mut sink, mut stream) = socket.split();
        let (outbound, mut outbound_rx) = mpsc::channel::<Message>(OUTBOUND_BUFFER);
        let pending: PendingMap = Arc::new(DashMap::new());

        let writer = tokio::spawn(async move {
            while let Some(msg) = outbound_rx.recv().await {
                if let Err(e) = sink.send(msg).await {
                    tracing::debug!(error = %e, "WebSocket send failed");
                    break;
                }
            }
        });

        let reader_pending = pending.clone();
        let reader_outbound = outbound.clone();
        let reader = tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        route_response(&reader_pending, text.as_str());
                    }
                    Ok(Message::Ping(payload)) => {
                        let _ = reader_outbound.send(Message::Pong(payload)).await;
                    }
                    Ok(Message::Close(_)) => {
                        tracing::debug!("Node closed the connection");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "WebSocket read error");
                        break;
                    }
                }
            }
            fail_pending(&reader_pending);
        });

        tracing::info!(endpoint = %endpoint, "RPC connection established");

        Ok(Self {
            endpoint: endpoint.to_string(),
            outbound,
            pending,
            next_id: AtomicU64::new(1),
            request_timeout,
            reader,
            writer,
        })
    }

    /// Issue a JSON-RPC call and wait for its response.
    ///
    /// # Arguments
    /// * `method` - Method name
    /// * `params` - Positional parameters
    pub async fn call(&self, method: &str, params: Vec<Value>) -> RpcResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = Request::new(id, method, params);
        let text =
            serde_json::to_string(&request).map_err(|e| RpcError::Codec(e.to_string()))?;

        let (reply_tx, reply_rx) = oneshot::channel();
        self.pending.insert(id, reply_tx);

        if self.outbound.send(Message::text(text)).await.is_err() {
            self.pending.remove(&id);
            return Err(RpcError::Closed);
        }

        match timeout(self.request_timeout, reply_rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(RpcError::Closed),
            Err(_) => {
                self.pending.remove(&id);
                tracing::warn!(
                    method = %method,
                    id = id,
                    "RPC request timed out"
                );
                Err(RpcError::RequestTimeout(self.request_timeout.as_secs()))
            }
        }
    }

    /// The endpoint this client is connected to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Close the connection.
    ///
    /// Sends a Close frame, then tears down the reader and writer tasks.
    pub async fn disconnect(self) {
        let _ = self.outbound.send(Message::Close(None)).await;
        // Give the writer a moment to flush the close frame.
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.reader.abort();
        self.writer.abort();
        tracing::info!(endpoint = %self.endpoint, "RPC connection closed");
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("endpoint", &self.endpoint)
            .field("in_flight", &self.pending.len())
            .finish()
    }
}

/// Parse a text frame and deliver it to the waiting caller.
fn route_response(pending: &PendingMap, text: &str) {
    let response: Response = match serde_json::from_str(text) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unparseable frame");
            return;
        }
    };

    let Some(id) = response.id else {
        tracing::debug!("Ignoring notification frame");
        return;
    };

    match pending.remove(&id) {
        Some((_, reply_tx)) => {
            let _ = reply_tx.send(response.into_result());
        }
        None => {
            tracing::debug!(id = id, "Response for unknown request id");
        }
    }
}

/// Fail every in-flight request after the connection is gone.
fn fail_pending(pending: &PendingMap) {
    let ids: Vec<u64> = pending.iter().map(|entry| *entry.key()).collect();
    for id in ids {
        if let Some((_, reply_tx)) = pending.remove(&id) {
            let _ = reply_tx.send(Err(RpcError::Closed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_response_unknown_id() {
        let pending: PendingMap = Arc::new(DashMap::new());
        // Must not panic on a response no one is waiting for.
        route_response(&pending, r#"{"jsonrpc":"2.0","id":99,"result":1}"#);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_route_response_delivers() {
        let pending: PendingMap = Arc::new(DashMap::new());
        let (tx, mut rx) = oneshot::channel();
        pending.insert(4, tx);

        route_response(&pending, r#"{"jsonrpc":"2.0","id":4,"result":"ok"}"#);

        let delivered = rx.try_recv().unwrap().unwrap();
        assert_eq!(delivered, serde_json::json!("ok"));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_fail_pending_closes_all() {
        let pending: PendingMap = Arc::new(DashMap::new());
        let (tx, mut rx) = oneshot::channel();
        pending.insert(1, tx);

        fail_pending(&pending);

        let delivered = rx.try_recv().unwrap();
        assert!(matches!(delivered, Err(RpcError::Closed)));
    }

    #[tokio::test]
    async fn test_connect_unreachable() {
        // Nothing listens on this port; connect must fail, not hang.
        let result = RpcClient::connect(
            "ws://127.0.0.1:1",
            Duration::from_secs(2),
            Duration::from_secs(2),
        )
        .await;
        assert!(result.is_err());
    }
}
