use thiserror::Error;

/// Errors arising from talking to the chain.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The node could not be reached or answered the startup probe wrong.
    /// Fatal at construction time, never produced afterwards.
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed RPC response: {0}")]
    InvalidResponse(String),

    #[error("transaction submission failed: {0}")]
    Submission(String),

    #[error("transaction {0} confirmation failed: {1}")]
    Confirmation(tally_types::TxHash, String),

    #[error("timed out after {0}s waiting for transaction confirmation")]
    ConfirmationTimeout(u64),

    #[error("on-chain value does not fit in 128 bits")]
    ValueOverflow,

    #[error("signing error: {0}")]
    Signing(#[from] tally_crypto::CryptoError),
}
