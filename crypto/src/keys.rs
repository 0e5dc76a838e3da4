//! secp256k1 credentials and Ethereum address derivation.

use k256::ecdsa::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use thiserror::Error;

use tally_types::{Address, Credential, PrivateKey};

use crate::hash::keccak256;

/// Errors arising from key handling.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),
}

/// Derive the Ethereum address for a public key.
///
/// Last 20 bytes of `keccak256(uncompressed_pubkey)` with the 0x04 point
/// prefix stripped.
fn address_from_public(public: &VerifyingKey) -> Address {
    let point = public.to_encoded_point(false);
    let digest = keccak256(&point.as_bytes()[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    Address::new(bytes)
}

/// Build a full credential (private key + derived address) from a private key.
pub fn credential_from_private(private: PrivateKey) -> Result<Credential, CryptoError> {
    let signing_key = SigningKey::from_bytes(private.as_bytes().into())
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    let address = address_from_public(signing_key.verifying_key());
    Ok(Credential { private, address })
}

/// Generate a new credential from a secure random source.
pub fn generate_credential() -> Credential {
    let signing_key = SigningKey::random(&mut OsRng);
    let address = address_from_public(signing_key.verifying_key());
    Credential {
        private: PrivateKey(signing_key.to_bytes().into()),
        address,
    }
}

/// Render an address with its EIP-55 mixed-case checksum.
pub fn checksum_address(address: &Address) -> String {
    let lower = hex::encode(address.as_bytes());
    let digest = keccak256(lower.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (digest[i / 2] >> (4 * (1 - i % 2))) & 0x0F;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
