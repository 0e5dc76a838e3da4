//! Contract ABI encoding for the indicator contract.
//!
//! The contract surface is four entry points with static argument types, so
//! we encode calls by hand instead of carrying an ABI JSON file: a call is
//! the 4-byte selector (`keccak256(signature)[..4]`) followed by 32-byte
//! words.

use tally_crypto::keccak256;
use tally_types::{Address, StorageKey};

use crate::ChainError;

/// Compute the 4-byte function selector for a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Encode a `bytes32` argument.
pub fn encode_bytes32(key: &StorageKey) -> [u8; 32] {
    *key.as_bytes()
}

/// Encode a `uint256` argument from a 128-bit value.
pub fn encode_uint256(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encode an `address` argument (left-padded to 32 bytes).
pub fn encode_address(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Build full calldata from a selector and argument words.
pub fn encode_call(selector: [u8; 4], args: &[[u8; 32]]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 32 * args.len());
    data.extend_from_slice(&selector);
    for arg in args {
        data.extend_from_slice(arg);
    }
    data
}

/// Decode a `uint256` return word into a u128.
///
/// Errors if the high 16 bytes are nonzero; indicator values are bounded
/// well below that in practice.
pub fn decode_uint256(word: &[u8]) -> Result<u128, ChainError> {
    if word.len() != 32 {
        return Err(ChainError::InvalidResponse(format!(
            "expected 32-byte return word, got {}",
            word.len()
        )));
    }
    if word[..16].iter().any(|&b| b != 0) {
        return Err(ChainError::ValueOverflow);
    }
    let mut be = [0u8; 16];
    be.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(be))
}

/// Decode an `address` return word.
pub fn decode_address(word: &[u8]) -> Result<Address, ChainError> {
    if word.len() != 32 {
        return Err(ChainError::InvalidResponse(format!(
            "expected 32-byte return word, got {}",
            word.len()
        )));
    }
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&word[12..]);
    Ok(Address::new(bytes))
}
