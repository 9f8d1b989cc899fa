//! JSON-RPC 2.0 framing.
//!
//! # Responsibilities
//! - Serialize outgoing requests (id, method, positional params)
//! - Deserialize incoming responses (result or error object)
//! - Convert error objects into [`RpcError`]

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rpc::types::{RpcError, RpcResult};

/// An outgoing JSON-RPC request.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,

    /// Request identifier, unique per connection.
    pub id: u64,

    /// Method name (e.g. "usernameStorage_getUsername").
    pub method: String,

    /// Positional parameters.
    pub params: Vec<Value>,
}

impl Request {
    /// Build a request for the given method and positional params.
    pub fn new(id: u64, method: &str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.to_string(),
            params,
        }
    }
}

/// An incoming JSON-RPC response.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// Identifier of the request this answers. Absent for notifications,
    /// which this client does not use.
    pub id: Option<u64>,

    /// Successful result payload.
    #[serde(default)]
    pub result: Option<Value>,

    /// Error object, mutually exclusive with `result`.
    #[serde(default)]
    pub error: Option<ErrorObject>,
}

impl Response {
    /// Collapse the response into a result, mapping error objects to
    /// [`RpcError::Remote`].
    pub fn into_result(self) -> RpcResult<Value> {
        if let Some(err) = self.error {
            return Err(RpcError::Remote {
                code: err.code,
                message: err.message,
            });
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

/// JSON-RPC error object as defined by the 2.0 spec.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorObject {
    /// Numeric error code.
    pub code: i64,

    /// Human-readable message.
    pub message: String,

    /// Optional additional data.
    #[serde(default)]
    pub data: Option<Value>,
}
