//! RPC-layer error definitions.

use thiserror::Error;

/// Errors that can occur on the WebSocket JSON-RPC transport.
#[derive(Debug, Error)]
pub enum RpcError {
    /// WebSocket handshake or TCP connect failed.
    #[error("Connect failed: {0}")]
    Connect(String),

    /// Connection was not established within the configured timeout.
    #[error("Connect timed out after {0} seconds")]
    ConnectTimeout(u64),

    /// No response arrived for a request within the configured timeout.
    #[error("Request timed out after {0} seconds")]
    RequestTimeout(u64),

    /// The node answered with a JSON-RPC error object.
    #[error("Node returned error {code}: {message}")]
    Remote { code: i64, message: String },

    /// Frame could not be encoded or decoded.
    #[error("Codec error: {0}")]
    Codec(String),

    /// The connection closed while requests were still in flight.
    #[error("Connection closed")]
    Closed,
}

/// Result type for RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;
