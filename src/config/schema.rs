//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty config reproduces the original
//! hardcoded smoke run exactly.

use serde::{Deserialize, Serialize};

/// Root configuration for the probe.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProbeConfig {
    /// Node connection settings.
    pub node: NodeConfig,

    /// Signing identity settings.
    pub identity: IdentityConfig,

    /// Smoke-run settings.
    pub run: RunConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Node connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// WebSocket RPC endpoint (e.g. "ws://127.0.0.1:9944").
    pub endpoint: String,

    /// Handshake timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            endpoint: "ws://127.0.0.1:9944".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 10,
        }
    }
}

/// Signing identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Derivation URI for the submitting identity.
    pub derivation_uri: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            derivation_uri: "//Alice".to_string(),
        }
    }
}

/// Smoke-run configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Username to submit.
    pub username: String,

    /// How to wait for inclusion after submitting.
    pub wait: WaitStrategy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            username: "alice_username".to_string(),
            wait: WaitStrategy::default(),
        }
    }
}

/// Strategy for the wait-for-inclusion phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum WaitStrategy {
    /// Sleep a fixed delay and assume inclusion (the original heuristic).
    Fixed {
        #[serde(default = "default_fixed_delay_ms")]
        delay_ms: u64,
    },

    /// Poll the storage query until the submitted value is visible.
    Confirm {
        #[serde(default = "default_poll_interval_ms")]
        poll_interval_ms: u64,

        #[serde(default = "default_confirm_timeout_ms")]
        timeout_ms: u64,
    },
}

impl Default for WaitStrategy {
    fn default() -> Self {
        Self::Fixed {
            delay_ms: default_fixed_delay_ms(),
        }
    }
}

fn default_fixed_delay_ms() -> u64 {
    5_000
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_confirm_timeout_ms() -> u64 {
    30_000
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter; `RUST_LOG` overrides it.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "username_probe=info".to_string(),
        }
    }
}
