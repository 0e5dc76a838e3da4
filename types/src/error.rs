use thiserror::Error;

/// Errors arising from parsing or validating the fundamental types.
#[derive(Debug, Error)]
pub enum TypeError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}
