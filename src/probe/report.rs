//! Smoke-run result reporting.

use uuid::Uuid;

use crate::chain::types::{InclusionOutcome, TxHash};
use crate::keyring::Address;

/// Everything observed during one smoke run.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// Identifier for correlating log lines of this run.
    pub run_id: Uuid,

    /// Endpoint the run targeted.
    pub endpoint: String,

    /// Username that was (or should have been) submitted.
    pub username: String,

    /// Address of the submitting identity, once derived.
    pub address: Option<Address>,

    /// Hash the node reported for the submission.
    pub tx_hash: Option<TxHash>,

    /// How the wait-for-inclusion phase ended.
    pub inclusion: Option<InclusionOutcome>,

    /// Username read back from storage.
    pub stored: Option<String>,

    /// First error encountered, if any.
    pub error: Option<String>,

    /// Total run duration.
    pub elapsed_ms: u64,
}

impl ProbeReport {
    /// Start an empty report for a run.
    pub fn new(endpoint: &str, username: &str) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            endpoint: endpoint.to_string(),
            username: username.to_string(),
            address: None,
            tx_hash: None,
            inclusion: None,
            stored: None,
            error: None,
            elapsed_ms: 0,
        }
    }

    /// Whether the stored value matches what was submitted.
    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.stored.as_deref() == Some(self.username.as_str())
    }

    /// Render the report as the human-readable status lines the run prints.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Run {} against {}\n", self.run_id, self.endpoint));

        if let Some(address) = &self.address {
            out.push_str(&format!("Identity: {address}\n"));
        }
        if let Some(hash) = &self.tx_hash {
            out.push_str(&format!("Transaction hash: {hash}\n"));
        }
        match &self.inclusion {
            Some(InclusionOutcome::Assumed { waited_ms }) => {
                out.push_str(&format!("Waited {waited_ms} ms (inclusion assumed)\n"));
            }
            Some(InclusionOutcome::Confirmed { waited_ms }) => {
                out.push_str(&format!("Inclusion confirmed after {waited_ms} ms\n"));
            }
            Some(InclusionOutcome::TimedOut { waited_ms }) => {
                out.push_str(&format!("Inclusion not confirmed within {waited_ms} ms\n"));
            }
            None => {}
        }
        match &self.stored {
            Some(stored) => out.push_str(&format!("Stored username: {stored}\n")),
            None if self.error.is_none() && self.tx_hash.is_some() => {
                out.push_str("Stored username: <none>\n");
            }
            None => {}
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("Error: {error}\n"));
        }

        let verdict = if self.succeeded() { "OK" } else { "FAILED" };
        out.push_str(&format!("Result: {verdict} ({} ms)\n", self.elapsed_ms));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_succeeded_requires_matching_value() {
        let mut report = ProbeReport::new("ws://127.0.0.1:9944", "alice_username");
        assert!(!report.succeeded());

        report.stored = Some("alice_username".to_string());
        assert!(report.succeeded());

        report.stored = Some("other".to_string());
        assert!(!report.succeeded());
    }

    #[test]
    fn test_error_means_failure_even_with_value() {
        let mut report = ProbeReport::new("ws://127.0.0.1:9944", "alice_username");
        report.stored = Some("alice_username".to_string());
        report.error = Some("boom".to_string());
        assert!(!report.succeeded());
    }

    #[test]
    fn test_render_includes_status_lines() {
        let mut report = ProbeReport::new("ws://127.0.0.1:9944", "alice_username");
        report.tx_hash = Some(crate::chain::types::TxHash::from_bytes([1; 32]));
        report.stored = Some("alice_username".to_string());
        report.inclusion = Some(InclusionOutcome::Assumed { waited_ms: 5_000 });

        let rendered = report.render();
        assert!(rendered.contains("Transaction hash: 0x01"));
        assert!(rendered.contains("Stored username: alice_username"));
        assert!(rendered.contains("Result: OK"));
    }

    #[test]
    fn test_render_failure() {
        let mut report = ProbeReport::new("ws://127.0.0.1:9944", "alice_username");
        report.error = Some("Connect failed: refused".to_string());
        let rendered = report.render();
        assert!(rendered.contains("Error: Connect failed"));
        assert!(rendered.contains("Result: FAILED"));
    }
}
