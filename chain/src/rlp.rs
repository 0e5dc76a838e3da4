//! Minimal RLP encoding.
//!
//! Only the encoding side is needed: legacy transactions are RLP lists of
//! byte strings and unsigned integers. Integers are encoded big-endian with
//! leading zeros stripped; zero encodes as the empty byte string.

/// Encode a byte string.
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    if bytes.len() == 1 && bytes[0] < 0x80 {
        return bytes.to_vec();
    }
    let mut out = encode_length(bytes.len(), 0x80);
    out.extend_from_slice(bytes);
    out
}

/// Encode an unsigned integer as a minimal big-endian byte string.
pub fn encode_uint(value: u128) -> Vec<u8> {
    if value == 0 {
        return vec![0x80];
    }
    let be = value.to_be_bytes();
    let start = be.iter().position(|&b| b != 0).unwrap_or(be.len() - 1);
    encode_bytes(&be[start..])
}

/// Encode a list of already-encoded items.
pub fn encode_list(items: &[Vec<u8>]) -> Vec<u8> {
    let payload_len: usize = items.iter().map(|i| i.len()).sum();
    let mut out = encode_length(payload_len, 0xC0);
    out.reserve(payload_len);
    for item in items {
        out.extend_from_slice(item);
    }
    out
}

/// Encode a length header with the given base offset (0x80 for strings,
/// 0xC0 for lists).
fn encode_length(len: usize, offset: u8) -> Vec<u8> {
    if len <= 55 {
        return vec![offset + len as u8];
    }
    let mut len_bytes = Vec::new();
    let mut n = len;
    while n > 0 {
        len_bytes.push((n & 0xFF) as u8);
        n >>= 8;
    }
    len_bytes.reverse();
    let mut out = vec![offset + 55 + len_bytes.len() as u8];
    out.extend_from_slice(&len_bytes);
    out
}
