//! YouTube watch-page scraper.
//!
//! Fetches the public watch page and extracts the embedded
//! `"viewCount":"<digits>"` field from the player response JSON. No API key
//! required; the page layout is outside our control, so a missing field is
//! reported as `Unavailable` rather than an error in our own parsing.

use regex::Regex;

use crate::{DataSource, SourceError};

/// Default watch-page URL prefix.
const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// A [`DataSource`] that scrapes view counts from YouTube watch pages.
pub struct YoutubeSource {
    client: reqwest::Client,
    url_prefix: String,
    view_count_re: Regex,
}

impl YoutubeSource {
    /// Create a source pointing at youtube.com.
    pub fn new() -> Self {
        Self::with_url_prefix(WATCH_URL_PREFIX)
    }

    /// Create a source with a custom URL prefix (used by tests to point at
    /// a local fixture server).
    pub fn with_url_prefix(url_prefix: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url_prefix: url_prefix.to_string(),
            view_count_re: Regex::new(r#""viewCount"\s*:\s*"(\d+)""#)
                .expect("view count pattern is valid"),
        }
    }

    /// Extract the view count from raw page HTML.
    fn parse_views(&self, html: &str) -> Result<u64, SourceError> {
        let captures = self
            .view_count_re
            .captures(html)
            .ok_or(SourceError::Unavailable)?;
        captures[1]
            .parse::<u64>()
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}

impl Default for YoutubeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for YoutubeSource {
    async fn fetch(&self, identifier: &str) -> Result<u64, SourceError> {
        let url = format!("{}{}", self.url_prefix, identifier);
        tracing::debug!(%url, "fetching watch page");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;
        let html = response
            .text()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;
        let views = self.parse_views(&html)?;
        tracing::debug!(identifier, views, "view count extracted");
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_view_count_from_player_json() {
        let source = YoutubeSource::new();
        let html = r#"<html>..."viewCount":"123456","author":"x"...</html>"#;
        assert_eq!(source.parse_views(html).unwrap(), 123456);
    }

    #[test]
    fn tolerates_whitespace_around_colon() {
        let source = YoutubeSource::new();
        let html = r#""viewCount" : "42""#;
        assert_eq!(source.parse_views(html).unwrap(), 42);
    }

    #[test]
    fn missing_field_is_unavailable() {
        let source = YoutubeSource::new();
        let html = "<html>no counts here</html>";
        assert!(matches!(
            source.parse_views(html),
            Err(SourceError::Unavailable)
        ));
    }

    #[test]
    fn first_occurrence_wins() {
        let source = YoutubeSource::new();
        let html = r#""viewCount":"100" ... "viewCount":"999""#;
        assert_eq!(source.parse_views(html).unwrap(), 100);
    }

    #[test]
    fn overflowing_count_is_parse_error() {
        let source = YoutubeSource::new();
        let html = r#""viewCount":"999999999999999999999999999""#;
        assert!(matches!(source.parse_views(html), Err(SourceError::Parse(_))));
    }
}
