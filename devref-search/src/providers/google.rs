//! Google Programmable Search via the Custom Search JSON API.
//!
//! Requires an API key and a search engine id (`cx`). When either is
//! missing the provider answers every query with an empty list and never
//! touches the network.

use std::fmt;

use serde::Deserialize;
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::SearchProvider;
use crate::types::{ProviderKind, SearchResult};

/// Production API host.
pub const GOOGLE_API_BASE: &str = "https://www.googleapis.com";

/// The API never returns more than 10 items per call.
const MAX_PAGE_SIZE: usize = 10;

/// Custom Search JSON API client.
#[derive(Clone)]
pub struct GoogleProvider {
    api_key: Option<String>,
    engine_id: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl fmt::Debug for GoogleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleProvider")
            .field("has_api_key", &self.api_key.is_some())
            .field("has_engine_id", &self.engine_id.is_some())
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

impl GoogleProvider {
    /// Create a provider. Blank credentials are treated as missing.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(
        api_key: Option<String>,
        engine_id: Option<String>,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            engine_id: engine_id.filter(|k| !k.trim().is_empty()),
            base_url: GOOGLE_API_BASE.to_owned(),
            client: http::build_client(config)?,
        })
    }

    /// Point the provider at a different API host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Whether both credentials are present.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.engine_id.is_some()
    }
}

impl SearchProvider for GoogleProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        let (Some(key), Some(cx)) = (self.api_key.as_deref(), self.engine_id.as_deref()) else {
            tracing::debug!("google credentials missing, skipping call");
            return Ok(Vec::new());
        };
        tracing::trace!(query, "google search");

        let num = limit.min(MAX_PAGE_SIZE).to_string();
        let url = Url::parse_with_params(
            &format!("{}/customsearch/v1", self.base_url),
            &[("q", query), ("key", key), ("cx", cx), ("num", num.as_str())],
        )
        .map_err(|e| SearchError::Config(format!("invalid google base url: {e}")))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("google request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                provider: ProviderKind::Google.name(),
                status: status.as_u16(),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("google response: {}", e.without_url())))?;

        let results: Vec<SearchResult> = body
            .items
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .filter_map(|raw| serde_json::from_value::<Item>(raw).ok())
            .map(|item| SearchResult {
                title: item.title.unwrap_or_default(),
                url: item.link.unwrap_or_default(),
                snippet: item.snippet.unwrap_or_default(),
                source: ProviderKind::Google.name().to_owned(),
                date: None,
            })
            .collect();

        tracing::trace!(count = results.len(), "google response parsed");
        Ok(results)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GoogleProvider>();
    }

    #[test]
    fn blank_credentials_are_missing() {
        let config = SearchConfig::default();
        let p = GoogleProvider::new(Some("  ".into()), Some("cx".into()), &config).expect("client");
        assert!(!p.has_credentials());
        let p = GoogleProvider::new(Some("key".into()), Some("cx".into()), &config).expect("client");
        assert!(p.has_credentials());
    }

    #[test]
    fn debug_redacts_key() {
        let config = SearchConfig::default();
        let p = GoogleProvider::new(Some("secret-key".into()), None, &config).expect("client");
        let debug = format!("{p:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("has_api_key: true"));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let config = SearchConfig::default();
        let p = GoogleProvider::new(None, None, &config)
            .expect("client")
            .with_base_url("http://127.0.0.1:9999/");
        assert_eq!(p.base_url, "http://127.0.0.1:9999");
    }

    #[tokio::test]
    async fn missing_credentials_short_circuit() {
        let config = SearchConfig::default();
        // Unroutable base URL: any network attempt would fail loudly.
        let p = GoogleProvider::new(Some("key".into()), None, &config)
            .expect("client")
            .with_base_url("http://0.0.0.0:1");
        let results = p.search("kotlin", 10).await.expect("no call made");
        assert!(results.is_empty());
    }
}
