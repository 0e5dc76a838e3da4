use proptest::prelude::*;

use tally_types::{Address, StorageKey, TxHash};

proptest! {
    /// StorageKey roundtrip: new -> as_bytes produces identical bytes.
    #[test]
    fn storage_key_bytes_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let key = StorageKey::new(bytes);
        prop_assert_eq!(key.as_bytes(), &bytes);
    }

    /// StorageKey display -> parse is the identity.
    #[test]
    fn storage_key_display_parse_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let key = StorageKey::new(bytes);
        let parsed: StorageKey = key.to_string().parse().unwrap();
        prop_assert_eq!(parsed, key);
    }

    /// StorageKey parses the same with or without a 0x prefix.
    #[test]
    fn storage_key_prefix_optional(bytes in prop::array::uniform32(0u8..)) {
        let bare = hex::encode(bytes);
        let a: StorageKey = bare.parse().unwrap();
        let b: StorageKey = format!("0x{bare}").parse().unwrap();
        prop_assert_eq!(a, b);
    }

    /// StorageKey rejects every hex length other than 32 bytes.
    #[test]
    fn storage_key_rejects_wrong_length(len in 0usize..64) {
        prop_assume!(len != 32);
        let s = format!("0x{}", "ab".repeat(len));
        prop_assert!(s.parse::<StorageKey>().is_err());
    }

    /// StorageKey::is_zero is true only for all-zero bytes.
    #[test]
    fn storage_key_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let key = StorageKey::new(bytes);
        prop_assert_eq!(key.is_zero(), bytes == [0u8; 32]);
    }

    /// Address display -> parse is the identity.
    #[test]
    fn address_display_parse_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let address = Address::new(bytes);
        let parsed: Address = address.to_string().parse().unwrap();
        prop_assert_eq!(parsed, address);
    }

    /// Address rejects every hex length other than 20 bytes.
    #[test]
    fn address_rejects_wrong_length(len in 0usize..40) {
        prop_assume!(len != 20);
        let s = format!("0x{}", "cd".repeat(len));
        prop_assert!(s.parse::<Address>().is_err());
    }

    /// Address requires the 0x prefix.
    #[test]
    fn address_rejects_missing_prefix(bytes in prop::array::uniform20(0u8..)) {
        prop_assert!(hex::encode(bytes).parse::<Address>().is_err());
    }

    /// Address serde roundtrip through its string form.
    #[test]
    fn address_serde_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let address = Address::new(bytes);
        let json = serde_json::to_string(&address).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, address);
    }

    /// TxHash roundtrip: new -> as_bytes produces identical bytes.
    #[test]
    fn tx_hash_bytes_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        prop_assert_eq!(hash.as_bytes(), &bytes);
    }

    /// TxHash display -> parse is the identity.
    #[test]
    fn tx_hash_display_parse_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        let parsed: TxHash = hash.to_string().parse().unwrap();
        prop_assert_eq!(parsed, hash);
    }

    /// TxHash rejects every hex length other than 32 bytes.
    #[test]
    fn tx_hash_rejects_wrong_length(len in 0usize..64) {
        prop_assume!(len != 32);
        let s = format!("0x{}", "ef".repeat(len));
        prop_assert!(s.parse::<TxHash>().is_err());
    }
}
