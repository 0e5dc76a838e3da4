//! Keccak-256 hashing and storage-key derivation.

use sha3::{Digest, Keccak256};
use tally_types::StorageKey;

/// Compute a keccak-256 hash of arbitrary data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Derive the on-chain storage key for an external identifier.
///
/// Pure and deterministic: `keccak256(identifier)` with no salt, so the
/// monitor can always recompute the same key for the same identifier
/// across restarts.
pub fn derive_key(identifier: &str) -> StorageKey {
    StorageKey::new(keccak256(identifier.as_bytes()))
}
