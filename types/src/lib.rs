//! Fundamental types for the tally oracle.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: storage keys, Ethereum addresses, transaction hashes, and
//! signing credentials.

pub mod address;
pub mod error;
pub mod hash;
pub mod key;
pub mod keys;

pub use address::Address;
pub use error::TypeError;
pub use hash::TxHash;
pub use key::StorageKey;
pub use keys::{Credential, PrivateKey};
