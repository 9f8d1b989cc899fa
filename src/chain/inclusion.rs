//! Waiting for a submitted value to be included.
//!
//! The original flow slept a fixed 5 seconds and hoped the block was in;
//! that heuristic is kept as [`WaitStrategy::Fixed`] and remains the
//! default. [`WaitStrategy::Confirm`] instead polls the storage query until
//! the submitted value is visible or a deadline passes.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, sleep, timeout, Instant};

use crate::chain::types::{ChainResult, InclusionOutcome, WaitStrategy};

/// Wait for inclusion according to the configured strategy.
///
/// # Arguments
/// * `strategy` - Fixed delay or confirmation polling
/// * `expected` - The username the submission should have stored
/// * `query` - Storage lookup for the signer's current username
pub async fn await_inclusion<F, Fut>(
    strategy: &WaitStrategy,
    expected: &str,
    query: F,
) -> ChainResult<InclusionOutcome>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ChainResult<Option<String>>>,
{
    match *strategy {
        WaitStrategy::Fixed { delay_ms } => {
            tracing::debug!(delay_ms = delay_ms, "Waiting fixed delay for inclusion");
            sleep(Duration::from_millis(delay_ms)).await;
            Ok(InclusionOutcome::Assumed { waited_ms: delay_ms })
        }
        WaitStrategy::Confirm {
            poll_interval_ms,
            timeout_ms,
        } => {
            let started = Instant::now();
            let deadline = Duration::from_millis(timeout_ms);

            let confirmed = timeout(deadline, async {
                let mut ticker = interval(Duration::from_millis(poll_interval_ms));
                loop {
                    ticker.tick().await;
                    match query().await? {
                        Some(stored) if stored == expected => {
                            return Ok::<_, crate::chain::types::ChainError>(());
                        }
                        Some(stored) => {
                            tracing::debug!(stored = %stored, "Different value stored, polling");
                        }
                        None => {
                            tracing::debug!("Value not yet in storage, polling");
                        }
                    }
                }
            })
            .await;

            let waited_ms = started.elapsed().as_millis() as u64;
            match confirmed {
                Ok(result) => {
                    result?;
                    Ok(InclusionOutcome::Confirmed { waited_ms })
                }
                Err(_) => {
                    tracing::warn!(
                        timeout_ms = timeout_ms,
                        "Inclusion not confirmed before deadline"
                    );
                    Ok(InclusionOutcome::TimedOut { waited_ms })
                }
            }
        }
    }
}
