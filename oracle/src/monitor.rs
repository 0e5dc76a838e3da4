//! The fetch-compare-update cycle.

use std::time::Duration;

use tally_chain::IndicatorStore;
use tally_crypto::derive_key;
use tally_source::DataSource;
use tally_types::{StorageKey, TxHash};

use crate::shutdown::ShutdownSignal;

/// What a single cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Values diverged; the new measurement was written and confirmed.
    Updated {
        previous: u128,
        value: u128,
        tx: TxHash,
        block: u64,
    },
    /// Measurement matches the recorded value; nothing to do.
    Unchanged { value: u128 },
    /// The source had no measurement; skipped without touching the chain.
    SourceUnavailable,
    /// Values diverged but the write failed. The next cycle will see the
    /// same divergence and try again.
    WriteFailed { value: u128 },
}

/// The oracle control loop for a single identifier.
///
/// One identifier per running instance; scaling to multiple identifiers
/// means one process per identifier, each with its own credential. The
/// loop is strictly sequential: the confirmation wait inside a write
/// blocks the cycle, so no two writes can race on the account nonce.
pub struct Monitor<S, C> {
    identifier: String,
    key: StorageKey,
    source: S,
    store: C,
    interval: Duration,
}

impl<S: DataSource, C: IndicatorStore> Monitor<S, C> {
    /// Build a monitor; the storage key is derived once and reused for
    /// every cycle.
    pub fn new(identifier: &str, source: S, store: C, interval: Duration) -> Self {
        let key = derive_key(identifier);
        tracing::info!(identifier, key = %key, "monitor initialized");
        Self {
            identifier: identifier.to_string(),
            key,
            source,
            store,
            interval,
        }
    }

    /// The derived storage key for this monitor's identifier.
    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    /// Run one fetch-compare-update cycle.
    ///
    /// Never returns an error: every failure mode maps to an outcome and
    /// the loop carries on next cycle.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let current = match self.source.fetch(&self.identifier).await {
            Ok(value) => value as u128,
            Err(e) => {
                tracing::warn!(identifier = %self.identifier, error = %e, "measurement unavailable, skipping cycle");
                return CycleOutcome::SourceUnavailable;
            }
        };

        let recorded = match self.store.last_recorded(&self.key).await {
            Ok(Some(value)) => value,
            Ok(None) => 0,
            Err(e) => {
                // Fail open: unreadable history is treated as "never set"
                // so one bad read cannot stall updates forever. A spurious
                // write is possible here; see DESIGN.md.
                tracing::warn!(key = %self.key, error = %e, "read failed, assuming no prior value");
                0
            }
        };

        if current == recorded {
            tracing::info!(value = current, "no change, no update needed");
            return CycleOutcome::Unchanged { value: current };
        }

        tracing::info!(from = recorded, to = current, "value changed, updating");
        match self.store.record(&self.key, current).await {
            Ok(receipt) => CycleOutcome::Updated {
                previous: recorded,
                value: current,
                tx: receipt.transaction_hash,
                block: receipt.block_number,
            },
            Err(e) => {
                tracing::warn!(error = %e, "update failed, will retry next cycle");
                CycleOutcome::WriteFailed { value: current }
            }
        }
    }

    /// Cycle forever, sleeping the configured interval between cycles.
    ///
    /// Stops cleanly at the waiting boundary when the shutdown signal
    /// fires. A write in progress is always fully resolved first because
    /// the cycle is awaited before the select.
    pub async fn run(&self, mut shutdown: ShutdownSignal) {
        loop {
            let outcome = self.run_cycle().await;
            if let CycleOutcome::Updated { tx, block, .. } = &outcome {
                tracing::info!(tx = %tx, block, "update confirmed");
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.wait() => {
                    tracing::info!(identifier = %self.identifier, "monitor stopping");
                    return;
                }
            }
        }
    }
}
