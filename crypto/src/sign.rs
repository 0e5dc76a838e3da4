//! Recoverable ECDSA signing over precomputed digests.

use k256::ecdsa::SigningKey;

use tally_types::PrivateKey;

use crate::keys::CryptoError;

/// A secp256k1 signature with its recovery id, as needed for EIP-155
/// transaction encoding.
pub struct RecoverableSignature {
    /// Big-endian `r` component, leading zeros stripped by the RLP encoder.
    pub r: [u8; 32],
    /// Big-endian `s` component (low-S normalized).
    pub s: [u8; 32],
    /// Recovery id (0 or 1).
    pub recovery_id: u8,
}

/// Sign a 32-byte digest, returning the signature with recovery id.
///
/// The digest is signed as-is (no additional hashing); callers are expected
/// to pass a keccak-256 sighash.
pub fn sign_digest(
    private: &PrivateKey,
    digest: &[u8; 32],
) -> Result<RecoverableSignature, CryptoError> {
    let signing_key = SigningKey::from_bytes(private.as_bytes().into())
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    let (signature, recovery_id) = signing_key
        .sign_prehash_recoverable(digest)
        .map_err(|e| CryptoError::DerivationFailed(e.to_string()))?;

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&signature.r().to_bytes());
    s.copy_from_slice(&signature.s().to_bytes());

    Ok(RecoverableSignature {
        r,
        s,
        recovery_id: recovery_id.to_byte(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

    #[test]
    fn signature_is_deterministic() {
        let key = PrivateKey([9u8; 32]);
        let digest = crate::keccak256(b"some payload");
        let s1 = sign_digest(&key, &digest).unwrap();
        let s2 = sign_digest(&key, &digest).unwrap();
        assert_eq!(s1.r, s2.r);
        assert_eq!(s1.s, s2.s);
        assert_eq!(s1.recovery_id, s2.recovery_id);
    }

    #[test]
    fn recovery_yields_signing_key() {
        let key = PrivateKey([42u8; 32]);
        let expected = *SigningKey::from_bytes(key.as_bytes().into())
            .unwrap()
            .verifying_key();

        let digest = crate::keccak256(b"recover me");
        let sig = sign_digest(&key, &digest).unwrap();

        let mut raw = [0u8; 64];
        raw[..32].copy_from_slice(&sig.r);
        raw[32..].copy_from_slice(&sig.s);
        let parsed = Signature::from_slice(&raw).unwrap();
        let recid = RecoveryId::from_byte(sig.recovery_id).unwrap();
        let recovered = VerifyingKey::recover_from_prehash(&digest, &parsed, recid).unwrap();
        assert_eq!(recovered, expected);
    }

    #[test]
    fn recovery_id_is_binary() {
        let key = PrivateKey([3u8; 32]);
        let digest = crate::keccak256(b"v check");
        let sig = sign_digest(&key, &digest).unwrap();
        assert!(sig.recovery_id <= 1);
    }
}
