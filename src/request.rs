//! Wire types for `POST /process-comment`.
//!
//! Absent and `null` fields both take their defaults, so
//! `{"comment": null, "tags": null, "settings": null}` is a valid request.

use serde::{Deserialize, Deserializer, Serialize};

/// Results returned when a request does not say how many it wants.
pub const DEFAULT_NUM_RECOMMENDATIONS: usize = 3;

/// Source used when a request does not list any.
pub const DEFAULT_SOURCE: &str = "internal";

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A review comment plus caller hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// Free-text comment, possibly empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
    /// Extra topics appended after the extracted ones.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: RequestSettings,
}

impl RecommendRequest {
    /// Request for `comment` with default settings.
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            ..Default::default()
        }
    }
}

/// Per-request options. Credentials here override configured ones.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSettings {
    /// How many resources to return (default 3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_recommendations: Option<usize>,
    /// Source names, matched case-insensitively (default `["internal"]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_cse_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_api_key: Option<String>,
}

impl std::fmt::Debug for RequestSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("RequestSettings")
            .field("num_recommendations", &self.num_recommendations)
            .field("sources", &self.sources)
            .field("google_api_key", &mark(&self.google_api_key))
            .field("google_cse_key", &mark(&self.google_cse_key))
            .field("youtube_api_key", &mark(&self.youtube_api_key))
            .finish()
    }
}

impl RequestSettings {
    /// Number of resources to return.
    pub fn top_k(&self) -> usize {
        self.num_recommendations.unwrap_or(DEFAULT_NUM_RECOMMENDATIONS)
    }

    /// Requested source names, defaulting to the internal provider.
    pub fn source_names(&self) -> Vec<String> {
        self.sources
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_SOURCE.to_owned()])
    }
}

/// One recommended learning resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub url: String,
    /// Provider name: `internal`, `google` or `youtube`.
    pub source: String,
}

/// Response body for `POST /process-comment`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub resources: Vec<Recommendation>,
    /// Absorbed failures. Omitted from JSON when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
