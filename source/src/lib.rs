//! External data sources for the tally oracle.
//!
//! A [`DataSource`] returns the current measurement for an external
//! identifier, or an error when the measurement is unavailable. Sources do
//! not retry internally; failures are reported upward and the monitor loop
//! decides what to do with them.

pub mod youtube;

pub use youtube::YoutubeSource;

use thiserror::Error;

/// Errors arising from fetching a measurement.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("measurement not available for this identifier")]
    Unavailable,

    #[error("failed to parse source response: {0}")]
    Parse(String),
}

/// An external, untrusted measurement source.
pub trait DataSource {
    /// Fetch the current measurement for an identifier.
    fn fetch(
        &self,
        identifier: &str,
    ) -> impl std::future::Future<Output = Result<u64, SourceError>> + Send;
}
