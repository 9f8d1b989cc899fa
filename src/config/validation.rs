//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, username within pallet bounds)
//! - Check the endpoint is a ws/wss URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProbeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::chain::types::MAX_USERNAME_LEN;
use crate::config::schema::{ProbeConfig, WaitStrategy};

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Config field path (e.g. "node.endpoint").
    pub field: String,

    /// What is wrong with it.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.node.endpoint) {
        Ok(url) if url.scheme() == "ws" || url.scheme() == "wss" => {}
        Ok(url) => errors.push(ValidationError {
            field: "node.endpoint".to_string(),
            message: format!("scheme '{}' is not ws or wss", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: "node.endpoint".to_string(),
            message: format!("not a valid URL: {e}"),
        }),
    }

    if config.node.connect_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "node.connect_timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    if config.node.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "node.request_timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    if config.identity.derivation_uri.is_empty() {
        errors.push(ValidationError {
            field: "identity.derivation_uri".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    if config.run.username.is_empty() {
        errors.push(ValidationError {
            field: "run.username".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if config.run.username.len() > MAX_USERNAME_LEN {
        errors.push(ValidationError {
            field: "run.username".to_string(),
            message: format!(
                "{} bytes exceeds the pallet maximum of {MAX_USERNAME_LEN}",
                config.run.username.len()
            ),
        });
    }

    match config.run.wait {
        WaitStrategy::Fixed { delay_ms: 0 } => errors.push(ValidationError {
            field: "run.wait.delay_ms".to_string(),
            message: "must be greater than zero".to_string(),
        }),
        WaitStrategy::Confirm {
            poll_interval_ms,
            timeout_ms,
        } => {
            if poll_interval_ms == 0 {
                errors.push(ValidationError {
                    field: "run.wait.poll_interval_ms".to_string(),
                    message: "must be greater than zero".to_string(),
                });
            }
            if timeout_ms < poll_interval_ms {
                errors.push(ValidationError {
                    field: "run.wait.timeout_ms".to_string(),
                    message: "must be at least the poll interval".to_string(),
                });
            }
        }
        WaitStrategy::Fixed { .. } => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProbeConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_http_endpoint() {
        let mut config = ProbeConfig::default();
        config.node.endpoint = "http://127.0.0.1:9944".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "node.endpoint"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ProbeConfig::default();
        config.node.endpoint = "not a url".to_string();
        config.run.username = String::new();
        config.node.request_timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_rejects_oversized_username() {
        let mut config = ProbeConfig::default();
        config.run.username = "x".repeat(MAX_USERNAME_LEN + 1);
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "run.username"));
    }

    #[test]
    fn test_rejects_degenerate_wait() {
        let mut config = ProbeConfig::default();
        config.run.wait = WaitStrategy::Confirm {
            poll_interval_ms: 0,
            timeout_ms: 0,
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.field == "run.wait.poll_interval_ms"));
    }
}
