//! BIP39 mnemonic generation and credential derivation.
//!
//! Generates a 12-word mnemonic (128-bit entropy) for the one-shot wallet
//! utility. Derivation applies HMAC-SHA512 keyed with the derivation path
//! string to the BIP39 seed and takes the first 32 bytes as the secp256k1
//! secret. This is deterministic but is not BIP32 child-key derivation, so
//! the resulting address will not match other wallet software importing the
//! same phrase.

use bip39::Mnemonic;
use hmac::{Hmac, Mac};
use sha2::Sha512;

use tally_types::{Credential, PrivateKey};

use crate::keys::{credential_from_private, CryptoError};

type HmacSha512 = Hmac<Sha512>;

/// Ethereum's conventional BIP44 path: m/44'/60'/0'/0/0.
const ETH_BIP44_PATH: &str = "m/44'/60'/0'/0/0";

/// Generate a new 12-word BIP39 mnemonic from 128-bit entropy.
pub fn generate_mnemonic() -> Result<String, CryptoError> {
    let mut entropy = [0u8; 16];
    rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut entropy);
    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|e| CryptoError::DerivationFailed(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Derive a signing credential from a BIP39 mnemonic phrase.
///
/// Process:
/// 1. Validate the mnemonic and derive the BIP39 seed (empty passphrase)
/// 2. Apply HMAC-SHA512 keyed with the derivation path to the seed
/// 3. Take the first 32 bytes as the secp256k1 secret key
/// 4. Derive the account address from the public key
pub fn credential_from_mnemonic(mnemonic: &str) -> Result<Credential, CryptoError> {
    let mnemonic = Mnemonic::parse_normalized(mnemonic)
        .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))?;

    let seed = mnemonic.to_seed_normalized("");

    let mut mac = HmacSha512::new_from_slice(ETH_BIP44_PATH.as_bytes())
        .map_err(|e| CryptoError::DerivationFailed(e.to_string()))?;
    mac.update(&seed);
    let result = mac.finalize().into_bytes();

    let mut secret_bytes = [0u8; 32];
    secret_bytes.copy_from_slice(&result[..32]);

    credential_from_private(PrivateKey(secret_bytes))
}

/// Validate that a phrase is a well-formed BIP39 mnemonic.
pub fn validate_mnemonic(mnemonic: &str) -> bool {
    Mnemonic::parse_normalized(mnemonic).is_ok()
}
