//! Smoke-run orchestration.
//!
//! # Data Flow
//! ```text
//! config
//!     → keyring (derive identity)
//!     → chain client (connect, health probe)
//!     → submit set-username, capture hash
//!     → wait for inclusion (fixed delay or confirmation polling)
//!     → query stored username
//!     → disconnect (always, even after errors)
//!     → ProbeReport
//! ```
//!
//! # Design Decisions
//! - Strictly sequential; one connection, one transaction, one query
//! - Any submit-or-query failure is logged and recorded in the report,
//!   never propagated as a crash; disconnect still runs

pub mod report;

pub use report::ProbeReport;

use std::time::Instant;

use crate::chain::inclusion::await_inclusion;
use crate::chain::types::ChainResult;
use crate::chain::ChainClient;
use crate::config::ProbeConfig;
use crate::keyring::Pair;

/// One-shot smoke probe against a username-storage node.
pub struct SmokeProbe {
    config: ProbeConfig,
}

impl SmokeProbe {
    /// Create a probe from a validated config.
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Run the full smoke flow and report what happened.
    ///
    /// Never panics and never returns early without attempting to
    /// disconnect an established connection.
    pub async fn run(&self) -> ProbeReport {
        let started = Instant::now();
        let mut report =
            ProbeReport::new(&self.config.node.endpoint, &self.config.run.username);

        tracing::info!(
            run_id = %report.run_id,
            endpoint = %self.config.node.endpoint,
            "Starting smoke run"
        );

        let pair = match Pair::from_uri(&self.config.identity.derivation_uri) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::error!(error = %e, "Identity derivation failed");
                report.error = Some(e.to_string());
                report.elapsed_ms = started.elapsed().as_millis() as u64;
                return report;
            }
        };
        report.address = Some(pair.address());

        let client = match ChainClient::connect(&self.config.node).await {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(error = %e, "Connection failed");
                report.error = Some(e.to_string());
                report.elapsed_ms = started.elapsed().as_millis() as u64;
                return report;
            }
        };

        if let Err(e) = self.submit_and_query(&client, &pair, &mut report).await {
            tracing::error!(run_id = %report.run_id, error = %e, "Smoke run failed");
            report.error = Some(e.to_string());
        }

        client.disconnect().await;
        report.elapsed_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            run_id = %report.run_id,
            succeeded = report.succeeded(),
            elapsed_ms = report.elapsed_ms,
            "Smoke run finished"
        );
        report
    }

    /// The submit-wait-query part of the flow; failures here are recorded
    /// in the report by the caller and must not skip disconnect.
    async fn submit_and_query(
        &self,
        client: &ChainClient,
        pair: &Pair,
        report: &mut ProbeReport,
    ) -> ChainResult<()> {
        let username = &self.config.run.username;
        let address = pair.address();

        let tx_hash = client.submit_set_username(pair, username).await?;
        tracing::info!(tx_hash = %tx_hash, "Transaction submitted");
        report.tx_hash = Some(tx_hash);

        let outcome = await_inclusion(&self.config.run.wait, username, || {
            client.username_of(&address)
        })
        .await?;
        report.inclusion = Some(outcome);

        tracing::info!("Getting username...");
        report.stored = client.username_of(&address).await?;

        Ok(())
    }
}
