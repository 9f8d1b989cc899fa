//! Chain-specific types and error definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::keyring::KeyringError;
use crate::rpc::RpcError;

// Re-export the wait strategy from the config schema to avoid duplication.
pub use crate::config::schema::WaitStrategy;

/// Maximum username length enforced by the pallet, in bytes.
pub const MAX_USERNAME_LEN: usize = 32;

/// Transaction hash as reported by the node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; 32]);

impl TxHash {
    /// Wrap raw hash bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw hash bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({self})")
    }
}

impl FromStr for TxHash {
    type Err = ChainError;

    fn from_str(s: &str) -> ChainResult<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(stripped).map_err(|_| ChainError::InvalidHash(s.to_string()))?;
        let raw: [u8; 32] = bytes
            .try_into()
            .map_err(|_| ChainError::InvalidHash(s.to_string()))?;
        Ok(Self(raw))
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Node health as reported by `system_health`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    /// Connected peer count.
    pub peers: u64,

    /// Whether the node is catching up with the chain.
    pub is_syncing: bool,

    /// Whether the node expects to have peers at all.
    #[serde(default)]
    pub should_have_peers: bool,
}

/// Outcome of the wait-for-inclusion phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum InclusionOutcome {
    /// Fixed delay elapsed; inclusion was assumed, not observed.
    Assumed { waited_ms: u64 },
    /// The submitted value became visible in storage.
    Confirmed { waited_ms: u64 },
    /// The confirmation deadline passed without the value appearing.
    TimedOut { waited_ms: u64 },
}

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Transport or remote RPC failure.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Identity derivation or address parsing failed.
    #[error("Keyring error: {0}")]
    Keyring(#[from] KeyringError),

    /// Transaction or storage value could not be encoded/decoded.
    #[error("Codec error: {0}")]
    Codec(String),

    /// The node returned a malformed transaction hash.
    #[error("Invalid transaction hash: {0}")]
    InvalidHash(String),

    /// Signature did not verify against the signer address.
    #[error("Signature verification failed")]
    BadSignature,
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
