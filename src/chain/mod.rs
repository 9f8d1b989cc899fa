//! Chain integration subsystem.
//!
//! # Data Flow
//! ```text
//! keyring (identity, signing)
//!     → transaction.rs (build, sign, encode)
//!     → client.rs (submit, query, health)
//!     → inclusion.rs (wait for the value to land)
//! ```
//!
//! # Design Decisions
//! - The wire envelope is hex-encoded canonical JSON; its shape is owned by
//!   the node's exposed schema, not by this client
//! - Graceful degradation: a failing health probe does not abort the run

pub mod client;
pub mod inclusion;
pub mod transaction;
pub mod types;

pub use client::ChainClient;
pub use inclusion::await_inclusion;
pub use transaction::{SetUsernameCall, SignedTransaction};
pub use types::{ChainError, ChainResult, InclusionOutcome, TxHash, WaitStrategy};
