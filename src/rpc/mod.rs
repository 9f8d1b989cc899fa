//! WebSocket JSON-RPC transport.
//!
//! # Data Flow
//! ```text
//! chain client (typed calls)
//!     → client.rs (connection, request/response correlation, timeouts)
//!     → protocol.rs (JSON-RPC 2.0 framing)
//!     → WebSocket (tokio-tungstenite)
//! ```
//!
//! # Design Decisions
//! - One connection per client; no pooling or reconnect
//! - Requests correlated by id via oneshot channels
//! - All calls have a configurable timeout
//! - Pending requests fail fast when the connection drops

pub mod client;
pub mod protocol;
pub mod types;

pub use client::RpcClient;
pub use types::{RpcError, RpcResult};
