//! Cryptographic primitives for the tally oracle.
//!
//! - **keccak-256** for storage-key derivation, function selectors, and
//!   transaction sighashes (same primitive the chain uses natively)
//! - **secp256k1** (ECDSA) for transaction signing and address derivation
//! - BIP39 mnemonic generation for the one-shot wallet utility

pub mod hash;
pub mod keys;
pub mod mnemonic;
pub mod sign;

pub use hash::{derive_key, keccak256};
pub use keys::{
    checksum_address, credential_from_private, generate_credential, CryptoError,
};
pub use mnemonic::{credential_from_mnemonic, generate_mnemonic, validate_mnemonic};
pub use sign::{sign_digest, RecoverableSignature};
