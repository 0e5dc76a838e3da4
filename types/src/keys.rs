//! Signing credential types.

use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Address, TypeError};

/// A 32-byte secp256k1 private key.
///
/// This type intentionally does not implement `Debug`, `Serialize`, or `Clone`
/// to prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

impl FromStr for PrivateKey {
    type Err = TypeError;

    /// Parse a private key from a hex string, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

/// A signing credential: a private key plus its derived account address.
///
/// Use `tally_crypto::credential_from_private()` or
/// `tally_crypto::credential_from_mnemonic()` to construct one; the address
/// must match the key, so this struct is never built field-by-field outside
/// the crypto crate.
pub struct Credential {
    pub private: PrivateKey,
    pub address: Address,
}

impl PrivateKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_private_key_hex() {
        let k: PrivateKey = format!("0x{}", "11".repeat(32)).parse().unwrap();
        assert_eq!(k.as_bytes(), &[0x11; 32]);
    }

    #[test]
    fn short_key_rejected() {
        assert!("0xdead".parse::<PrivateKey>().is_err());
    }
}
