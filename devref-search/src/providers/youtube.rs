//! YouTube video search via the YouTube Data API v3.

use std::fmt;

use serde::Deserialize;
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::SearchProvider;
use crate::types::{ProviderKind, SearchResult};

/// Production API host.
pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com";

/// Prefix of a playable video link.
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

const MAX_PAGE_SIZE: usize = 10;

/// YouTube Data API search client.
#[derive(Clone)]
pub struct YouTubeProvider {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl fmt::Debug for YouTubeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeProvider")
            .field("has_api_key", &self.api_key.is_some())
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
    id: Option<ItemId>,
    #[serde(default)]
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    publish_time: Option<String>,
}

impl YouTubeProvider {
    /// Create a provider. A blank key is treated as missing.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: Option<String>, config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: YOUTUBE_API_BASE.to_owned(),
            client: http::build_client(config)?,
        })
    }

    /// Point the provider at a different API host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Whether an API key is configured.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Convert one API item into a candidate. Items without a video id keep an
/// empty URL and are dropped later by fusion.
fn to_result(item: Item) -> SearchResult {
    let snippet = item.snippet.unwrap_or_default();
    let url = item
        .id
        .and_then(|id| id.video_id)
        .filter(|v| !v.is_empty())
        .map(|v| format!("{WATCH_URL}{v}"))
        .unwrap_or_default();

    SearchResult {
        title: snippet.title.unwrap_or_default(),
        url,
        snippet: snippet.description.unwrap_or_default(),
        source: ProviderKind::YouTube.name().to_owned(),
        date: snippet.publish_time,
    }
}

impl SearchProvider for YouTubeProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        let Some(key) = self.api_key.as_deref() else {
            tracing::debug!("youtube api key missing, skipping call");
            return Ok(Vec::new());
        };
        tracing::trace!(query, "youtube search");

        let max_results = limit.min(MAX_PAGE_SIZE).to_string();
        let url = Url::parse_with_params(
            &format!("{}/youtube/v3/search", self.base_url),
            &[
                ("q", query),
                ("key", key),
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
            ],
        )
        .map_err(|e| SearchError::Config(format!("invalid youtube base url: {e}")))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("youtube request failed: {}", e.without_url())))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(SearchError::Status {
                provider: ProviderKind::YouTube.name(),
                status: response.status().as_u16(),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("youtube response: {}", e.without_url())))?;

        Ok(body
            .items
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .filter_map(|raw| serde_json::from_value::<Item>(raw).ok())
            .map(to_result)
            .collect())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::YouTube
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(json: serde_json::Value) -> Item {
        serde_json::from_value(json).expect("item")
    }

    #[test]
    fn item_with_video_id_builds_watch_url() {
        let result = to_result(item(serde_json::json!({
            "id": {"videoId": "abc123"},
            "snippet": {
                "title": "Compose in 10 minutes",
                "description": "Quick intro",
                "publishTime": "2024-01-02T03:04:05Z"
            }
        })));
        assert_eq!(result.url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(result.title, "Compose in 10 minutes");
        assert_eq!(result.snippet, "Quick intro");
        assert_eq!(result.source, "youtube");
        assert_eq!(result.date.as_deref(), Some("2024-01-02T03:04:05Z"));
    }

    #[test]
    fn item_without_video_id_has_empty_url() {
        let result = to_result(item(serde_json::json!({
            "id": {"channelId": "UC1"},
            "snippet": {"title": "A channel"}
        })));
        assert!(result.url.is_empty());
        assert!(result.date.is_none());
    }

    #[test]
    fn item_without_snippet_is_blank() {
        let result = to_result(item(serde_json::json!({"id": {"videoId": "x"}})));
        assert_eq!(result.title, "");
        assert_eq!(result.snippet, "");
    }

    #[tokio::test]
    async fn missing_key_short_circuits() {
        let config = SearchConfig::default();
        let p = YouTubeProvider::new(None, &config)
            .expect("client")
            .with_base_url("http://0.0.0.0:1");
        assert!(!p.has_credentials());
        let results = p.search("kotlin flow", 5).await.expect("no call made");
        assert!(results.is_empty());
    }

    #[test]
    fn debug_redacts_key() {
        let config = SearchConfig::default();
        let p = YouTubeProvider::new(Some("yt-secret".into()), &config).expect("client");
        assert!(!format!("{p:?}").contains("yt-secret"));
    }
}
