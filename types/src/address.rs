//! Ethereum account address type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::TypeError;

/// A 20-byte Ethereum address.
///
/// Parsed from a `0x`-prefixed 40-character hex string. Parsing is
/// case-insensitive; EIP-55 checksum rendering lives in `tally-crypto`
/// because it needs keccak.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl FromStr for Address {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s
            .strip_prefix("0x")
            .ok_or_else(|| TypeError::InvalidAddress(format!("missing 0x prefix: {s}")))?;
        if stripped.len() != 40 {
            return Err(TypeError::InvalidAddress(format!(
                "expected 40 hex characters, got {}",
                stripped.len()
            )));
        }
        let bytes = hex::decode(stripped).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// Serialize as the 0x-hex string so addresses read naturally in TOML/JSON.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lowercase() {
        let a: Address = "0x000102030405060708090a0b0c0d0e0f10111213"
            .parse()
            .unwrap();
        assert_eq!(a.as_bytes()[0], 0);
        assert_eq!(a.as_bytes()[19], 0x13);
    }

    #[test]
    fn parse_mixed_case() {
        let a: Address = "0xDEadBEef00000000000000000000000000000000"
            .parse()
            .unwrap();
        assert_eq!(&a.as_bytes()[..4], &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn missing_prefix_rejected() {
        assert!("000102030405060708090a0b0c0d0e0f10111213"
            .parse::<Address>()
            .is_err());
    }

    #[test]
    fn wrong_length_rejected() {
        assert!("0xdeadbeef".parse::<Address>().is_err());
    }

    #[test]
    fn display_roundtrip() {
        let a = Address::new([0x5A; 20]);
        let parsed: Address = a.to_string().parse().unwrap();
        assert_eq!(a, parsed);
    }

    #[test]
    fn serde_as_string() {
        let a = Address::new([0x11; 20]);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, format!("\"{a}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
