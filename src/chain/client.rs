//! Typed chain client over the JSON-RPC transport.
//!
//! # Responsibilities
//! - Connect to the node and probe its health
//! - Submit signed set-username transactions
//! - Query stored usernames
//! - Disconnect cleanly

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::{json, Value};

use crate::chain::transaction::{SetUsernameCall, SignedTransaction};
use crate::chain::types::{ChainError, ChainResult, Health, TxHash};
use crate::config::schema::NodeConfig;
use crate::keyring::{Address, Pair};
use crate::rpc::RpcClient;

/// Client for the username-storage chain.
pub struct ChainClient {
    rpc: RpcClient,
    /// Per-connection nonce for sequential submissions.
    nonce: AtomicU64,
}

impl ChainClient {
    /// Connect to the node described by the config.
    ///
    /// A failed health probe logs a warning but does not fail the
    /// connection; the node may still accept submissions.
    pub async fn connect(config: &NodeConfig) -> ChainResult<Self> {
        let rpc = RpcClient::connect(
            &config.endpoint,
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.request_timeout_secs),
        )
        .await?;

        let client = Self {
            rpc,
            nonce: AtomicU64::new(0),
        };

        match client.health().await {
            Ok(health) => {
                tracing::info!(
                    peers = health.peers,
                    is_syncing = health.is_syncing,
                    "Node health probe succeeded"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Node health probe failed, continuing anyway");
            }
        }

        Ok(client)
    }

    /// Query node health via `system_health`.
    pub async fn health(&self) -> ChainResult<Health> {
        let value = self.rpc.call("system_health", vec![]).await?;
        serde_json::from_value(value).map_err(|e| ChainError::Codec(e.to_string()))
    }

    /// Sign and submit a set-username transaction.
    ///
    /// # Returns
    /// The transaction hash reported by the node.
    pub async fn submit_set_username(&self, pair: &Pair, username: &str) -> ChainResult<TxHash> {
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let call = SetUsernameCall::new(username);
        let tx = SignedTransaction::new(pair, call, nonce)?;
        let wire = tx.encode()?;

        tracing::info!(
            signer = %tx.signer,
            username = %username,
            nonce = nonce,
            "Submitting set-username transaction"
        );

        let result = self
            .rpc
            .call("author_submitExtrinsic", vec![json!(wire)])
            .await?;

        let hash_str = result
            .as_str()
            .ok_or_else(|| ChainError::InvalidHash(result.to_string()))?;
        hash_str.parse()
    }

    /// Query the stored username for an address.
    ///
    /// Returns `None` when no username is stored yet.
    pub async fn username_of(&self, address: &Address) -> ChainResult<Option<String>> {
        let result = self
            .rpc
            .call(
                "usernameStorage_getUsername",
                vec![json!(address.to_string())],
            )
            .await?;
        decode_username(result)
    }

    /// The endpoint this client is connected to.
    pub fn endpoint(&self) -> &str {
        self.rpc.endpoint()
    }

    /// Close the connection.
    pub async fn disconnect(self) {
        self.rpc.disconnect().await;
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("endpoint", &self.rpc.endpoint())
            .finish()
    }
}

/// Decode the storage query result into readable text.
///
/// Nodes have reported the value both as a JSON string and as a raw byte
/// array, depending on the RPC extension in use; both decode to UTF-8 text.
fn decode_username(value: Value) -> ChainResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Array(items) => {
            let mut bytes = Vec::with_capacity(items.len());
            for item in items {
                let byte = item
                    .as_u64()
                    .filter(|b| *b <= u8::MAX as u64)
                    .ok_or_else(|| {
                        ChainError::Codec("Username array holds non-byte values".to_string())
                    })?;
                bytes.push(byte as u8);
            }
            Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
        }
        other => Err(ChainError::Codec(format!(
            "Unexpected username representation: {other}"
        ))),
    }
}
