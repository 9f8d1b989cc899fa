//! Dev identity derivation and signing.
//!
//! # Data Flow
//! ```text
//! derivation URI ("//Alice")
//!     → pair.rs (seed chaining, Ed25519 keypair)
//!     → address.rs (public key → printable address)
//!     → chain transactions (signing)
//! ```
//!
//! # Security Constraints
//! - Dev keys only; derived from a well-known public phrase
//! - Secret key material is never logged or serialized

pub mod address;
pub mod pair;

pub use address::Address;
pub use pair::{Pair, DEV_PHRASE};

use thiserror::Error;

/// Errors from derivation or address parsing.
#[derive(Debug, Error)]
pub enum KeyringError {
    /// Derivation URI was empty.
    #[error("Derivation URI is empty")]
    EmptyUri,

    /// A `//`-delimited junction had no name.
    #[error("Derivation URI contains an empty junction")]
    EmptyJunction,

    /// Soft junctions (`/name`) are not supported for Ed25519 keys.
    #[error("Soft junction '{0}' is not supported")]
    SoftJunction(String),

    /// Address string was not 0x-prefixed 32-byte hex.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// Result type for keyring operations.
pub type KeyringResult<T> = Result<T, KeyringError>;
