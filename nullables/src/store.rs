//! Nullable indicator store — in-memory chain state for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use tally_chain::{ChainError, IndicatorStore, TxReceipt};
use tally_types::{StorageKey, TxHash};

/// A deterministic [`IndicatorStore`] for testing.
///
/// Reads come from an in-memory map; writes update it and are recorded for
/// assertions. Read and write failures can be scripted to exercise the
/// monitor's error paths.
pub struct NullIndicatorStore {
    values: Mutex<HashMap<StorageKey, u128>>,
    writes: Mutex<Vec<(StorageKey, u128)>>,
    read_failures: Mutex<VecDeque<String>>,
    write_failures: Mutex<VecDeque<String>>,
    failed_write_count: Mutex<usize>,
    next_block: Mutex<u64>,
}

impl NullIndicatorStore {
    /// An empty store: every read returns `Ok(None)`.
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            read_failures: Mutex::new(VecDeque::new()),
            write_failures: Mutex::new(VecDeque::new()),
            failed_write_count: Mutex::new(0),
            next_block: Mutex::new(1),
        }
    }

    /// A store pre-seeded with one recorded value.
    pub fn with_value(key: StorageKey, value: u128) -> Self {
        let store = Self::new();
        store.values.lock().unwrap().insert(key, value);
        store
    }

    /// Queue a read failure; the next `last_recorded` call returns it.
    pub fn fail_next_read(&self, message: &str) {
        self.read_failures.lock().unwrap().push_back(message.into());
    }

    /// Queue a write failure; the next `record` call returns it without
    /// changing state.
    pub fn fail_next_write(&self, message: &str) {
        self.write_failures.lock().unwrap().push_back(message.into());
    }

    /// Every successful write, in call order.
    pub fn writes(&self) -> Vec<(StorageKey, u128)> {
        self.writes.lock().unwrap().clone()
    }

    /// Number of attempted writes, including scripted failures.
    pub fn write_attempts(&self) -> usize {
        self.writes.lock().unwrap().len() + self.failed_writes()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    fn failed_writes(&self) -> usize {
        *self.failed_write_count.lock().unwrap()
    }

    /// Current value for a key, if any.
    pub fn value(&self, key: &StorageKey) -> Option<u128> {
        self.values.lock().unwrap().get(key).copied()
    }
}

impl Default for NullIndicatorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorStore for NullIndicatorStore {
    async fn last_recorded(&self, key: &StorageKey) -> Result<Option<u128>, ChainError> {
        if let Some(message) = self.read_failures.lock().unwrap().pop_front() {
            return Err(ChainError::Transport(message));
        }
        Ok(self.values.lock().unwrap().get(key).copied())
    }

    async fn record(&self, key: &StorageKey, value: u128) -> Result<TxReceipt, ChainError> {
        if let Some(message) = self.write_failures.lock().unwrap().pop_front() {
            *self.failed_write_count.lock().unwrap() += 1;
            return Err(ChainError::Submission(message));
        }
        self.values.lock().unwrap().insert(*key, value);
        self.writes.lock().unwrap().push((*key, value));
        let mut block = self.next_block.lock().unwrap();
        // Fake but distinct hash per write, derived from the block number.
        let mut hash = [0u8; 32];
        hash[24..].copy_from_slice(&block.to_be_bytes());
        let receipt = TxReceipt {
            transaction_hash: TxHash::new(hash),
            block_number: *block,
            status: true,
        };
        *block += 1;
        Ok(receipt)
    }
}

// Tests hand the monitor a borrow so they can keep asserting on the double.
impl IndicatorStore for &NullIndicatorStore {
    async fn last_recorded(&self, key: &StorageKey) -> Result<Option<u128>, ChainError> {
        (**self).last_recorded(key).await
    }

    async fn record(&self, key: &StorageKey, value: u128) -> Result<TxReceipt, ChainError> {
        (**self).record(key, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> StorageKey {
        StorageKey::new([byte; 32])
    }

    #[tokio::test]
    async fn empty_store_reads_none() {
        let store = NullIndicatorStore::new();
        assert_eq!(store.last_recorded(&key(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn record_then_read_back() {
        let store = NullIndicatorStore::new();
        let receipt = store.record(&key(1), 100).await.unwrap();
        assert!(receipt.status);
        assert_eq!(store.last_recorded(&key(1)).await.unwrap(), Some(100));
        assert_eq!(store.writes(), vec![(key(1), 100)]);
    }

    #[tokio::test]
    async fn scripted_read_failure_fires_once() {
        let store = NullIndicatorStore::with_value(key(1), 5);
        store.fail_next_read("boom");
        assert!(store.last_recorded(&key(1)).await.is_err());
        assert_eq!(store.last_recorded(&key(1)).await.unwrap(), Some(5));
    }

    #[tokio::test]
    async fn scripted_write_failure_leaves_state_untouched() {
        let store = NullIndicatorStore::new();
        store.fail_next_write("nonce conflict");
        assert!(store.record(&key(1), 9).await.is_err());
        assert_eq!(store.value(&key(1)), None);
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.write_attempts(), 1);
    }

    #[tokio::test]
    async fn receipts_have_distinct_hashes() {
        let store = NullIndicatorStore::new();
        let r1 = store.record(&key(1), 1).await.unwrap();
        let r2 = store.record(&key(1), 2).await.unwrap();
        assert_ne!(r1.transaction_hash, r2.transaction_hash);
        assert!(r2.block_number > r1.block_number);
    }
}
