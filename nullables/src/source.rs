//! Nullable data source — scripted measurements for testing.

use std::collections::VecDeque;
use std::sync::Mutex;

use tally_source::{DataSource, SourceError};

/// A deterministic [`DataSource`] for testing.
///
/// Responses are scripted up front and consumed one per fetch; once the
/// script runs out, every further fetch reports `Unavailable`. A fixed
/// source built with [`NullSource::returning`] repeats the same value
/// forever instead.
pub struct NullSource {
    script: Mutex<VecDeque<Result<u64, SourceError>>>,
    repeat: Option<u64>,
    fetches: Mutex<Vec<String>>,
}

impl NullSource {
    /// A source that returns the same measurement on every fetch.
    pub fn returning(value: u64) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(value),
            fetches: Mutex::new(Vec::new()),
        }
    }

    /// A source that plays back the given responses in order.
    pub fn scripted(responses: Vec<Result<u64, SourceError>>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            repeat: None,
            fetches: Mutex::new(Vec::new()),
        }
    }

    /// Identifiers passed to `fetch`, in call order.
    pub fn fetched_identifiers(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    /// Number of fetches performed.
    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }
}

impl DataSource for NullSource {
    async fn fetch(&self, identifier: &str) -> Result<u64, SourceError> {
        self.fetches.lock().unwrap().push(identifier.to_string());
        if let Some(response) = self.script.lock().unwrap().pop_front() {
            return response;
        }
        match self.repeat {
            Some(value) => Ok(value),
            None => Err(SourceError::Unavailable),
        }
    }
}

// Tests hand the monitor a borrow so they can keep asserting on the double.
impl DataSource for &NullSource {
    async fn fetch(&self, identifier: &str) -> Result<u64, SourceError> {
        (**self).fetch(identifier).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returning_repeats_forever() {
        let source = NullSource::returning(7);
        assert_eq!(source.fetch("a").await.unwrap(), 7);
        assert_eq!(source.fetch("a").await.unwrap(), 7);
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn script_plays_in_order_then_exhausts() {
        let source = NullSource::scripted(vec![Ok(1), Err(SourceError::Unavailable), Ok(3)]);
        assert_eq!(source.fetch("x").await.unwrap(), 1);
        assert!(source.fetch("x").await.is_err());
        assert_eq!(source.fetch("x").await.unwrap(), 3);
        assert!(source.fetch("x").await.is_err());
    }

    #[tokio::test]
    async fn identifiers_are_recorded() {
        let source = NullSource::returning(0);
        let _ = source.fetch("abc").await;
        assert_eq!(source.fetched_identifiers(), vec!["abc".to_string()]);
    }
}
