//! Concurrent bulk verification.
//!
//! [`dispatch`] fans a [`Batch`] out to the blocking pool, one task per
//! address, and joins every task before returning. Each task fills the slot
//! of its own address, so no outcome is dropped or duplicated and no lock is
//! shared between workers.

mod types;

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

pub use types::{
    Batch, BatchError, BulkRequest, DEFAULT_MAX_BATCH, Outcome, OutcomeSet, VerificationOutcome,
};

use crate::verifier::Verifier;

/// Verify every address of `batch` concurrently and collect one outcome per
/// address.
///
/// A failed (or panicking) verification only affects its own outcome. The
/// call returns once every verification has finished; nothing is cancelled.
pub async fn dispatch<V>(batch: Batch, verifier: Arc<V>) -> OutcomeSet
where
    V: Verifier + ?Sized + 'static,
{
    let total = batch.len();
    let (emails, tasks): (Vec<_>, Vec<_>) = batch
        .into_addresses()
        .into_iter()
        .map(|email| {
            let verifier = Arc::clone(&verifier);
            let address = email.clone();
            let task = tokio::task::spawn_blocking(move || {
                let outcome = verifier.verify(&address);
                debug!(email = %address, ok = outcome.is_ok(), "verification finished");
                outcome
            });
            (email, task)
        })
        .unzip();

    let slots = join_all(tasks).await;

    let outcomes: Vec<VerificationOutcome> = emails
        .into_iter()
        .zip(slots)
        .map(|(email, slot)| match slot {
            Ok(Ok(result)) => VerificationOutcome::success(email, result),
            Ok(Err(err)) => {
                warn!(email = %email, error = %err, "verification failed");
                VerificationOutcome::failure(email, err.to_string())
            }
            Err(join_err) => {
                warn!(email = %email, error = %join_err, "verification task aborted");
                VerificationOutcome::failure(email, format!("verification task failed: {join_err}"))
            }
        })
        .collect();

    let set = OutcomeSet::from(outcomes);
    info!(total, failed = set.failures(), "bulk verification finished");
    set
}
