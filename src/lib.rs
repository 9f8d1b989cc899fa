//! Smoke-test client for the username-storage chain.
//!
//! Connects to a node's WebSocket JSON-RPC endpoint, derives a well-known
//! dev identity, submits one signed set-username transaction, waits for
//! inclusion, reads the value back, and reports.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌─────────┐   ┌─────────┐   ┌──────────────────┐   ┌──────────────┐
//!   │ config  │──▶│ keyring │──▶│      chain       │──▶│     rpc      │──▶ node
//!   │ (toml + │   │ //Alice │   │ sign / submit /  │   │ JSON-RPC 2.0 │
//!   │  flags) │   │ ed25519 │   │ wait / query     │   │ over ws      │
//!   └─────────┘   └─────────┘   └──────────────────┘   └──────────────┘
//!                        orchestrated by probe → ProbeReport
//! ```

// Core subsystems
pub mod chain;
pub mod keyring;
pub mod probe;
pub mod rpc;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use chain::ChainClient;
pub use config::ProbeConfig;
pub use keyring::Pair;
pub use probe::{ProbeReport, SmokeProbe};
