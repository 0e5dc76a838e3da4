//! Legacy (pre-EIP-1559) transaction encoding and EIP-155 signing.
//!
//! The oracle deliberately uses static gas parameters and legacy
//! transactions; dynamic fee logic would change external behavior (cost,
//! inclusion under congestion) and is out of scope.

use tally_crypto::{keccak256, sign_digest};
use tally_types::{Address, PrivateKey};

use crate::rlp;
use crate::ChainError;

/// An unsigned legacy contract-call transaction.
pub struct LegacyTx {
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: Address,
    pub value: u128,
    pub data: Vec<u8>,
}

impl LegacyTx {
    /// RLP fields shared between the sighash preimage and the signed
    /// encoding, up to but excluding the (v, r, s) slots.
    fn base_fields(&self) -> Vec<Vec<u8>> {
        vec![
            rlp::encode_uint(self.nonce as u128),
            rlp::encode_uint(self.gas_price),
            rlp::encode_uint(self.gas_limit as u128),
            rlp::encode_bytes(self.to.as_bytes()),
            rlp::encode_uint(self.value),
            rlp::encode_bytes(&self.data),
        ]
    }

    /// EIP-155 signing hash: keccak256 of the RLP list with the chain id in
    /// the v slot and empty r/s.
    pub fn sighash(&self, chain_id: u64) -> [u8; 32] {
        let mut fields = self.base_fields();
        fields.push(rlp::encode_uint(chain_id as u128));
        fields.push(rlp::encode_uint(0));
        fields.push(rlp::encode_uint(0));
        keccak256(&rlp::encode_list(&fields))
    }

    /// Sign and produce the raw bytes for `eth_sendRawTransaction`.
    ///
    /// v = chain_id * 2 + 35 + recovery_id per EIP-155.
    pub fn sign(&self, private: &PrivateKey, chain_id: u64) -> Result<Vec<u8>, ChainError> {
        let digest = self.sighash(chain_id);
        let sig = sign_digest(private, &digest)?;

        let v = chain_id as u128 * 2 + 35 + sig.recovery_id as u128;
        let mut fields = self.base_fields();
        fields.push(rlp::encode_uint(v));
        fields.push(rlp::encode_bytes(strip_leading_zeros(&sig.r)));
        fields.push(rlp::encode_bytes(strip_leading_zeros(&sig.s)));
        Ok(rlp::encode_list(&fields))
    }
}

/// Signature components are unsigned integers in the RLP encoding, so
/// leading zero bytes must not appear.
fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_tx() -> LegacyTx {
        LegacyTx {
            nonce: 9,
            gas_price: 20_000_000_000,
            gas_limit: 21_000,
            to: Address::from_str("0x3535353535353535353535353535353535353535").unwrap(),
            value: 1_000_000_000_000_000_000,
            data: Vec::new(),
        }
    }

    #[test]
    fn eip155_example_sighash() {
        // The worked example from the EIP-155 specification (chain id 1).
        let tx = sample_tx();
        assert_eq!(
            hex::encode(tx.sighash(1)),
            "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
        );
    }

    #[test]
    fn eip155_example_signed_encoding() {
        // Same example, signed with the EIP-155 example key 0x4646...46.
        let key = PrivateKey([0x46; 32]);
        let raw = sample_tx().sign(&key, 1).unwrap();
        assert_eq!(
            hex::encode(raw),
            "f86c098504a817c800825208943535353535353535353535353535353535353535880de0\
             b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620\
             aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
        );
    }

    #[test]
    fn sighash_differs_per_chain() {
        let tx = sample_tx();
        assert_ne!(tx.sighash(1), tx.sighash(11155111));
    }

    #[test]
    fn strip_leading_zeros_behaviour() {
        assert_eq!(strip_leading_zeros(&[0, 0, 5]), &[5]);
        assert_eq!(strip_leading_zeros(&[1, 0]), &[1, 0]);
        assert!(strip_leading_zeros(&[0, 0]).is_empty());
    }
}
