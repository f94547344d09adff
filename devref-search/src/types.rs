//! Core types for search candidates and provider identification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// A single candidate returned by a source provider.
///
/// The `url` is the identity used for deduplication during fusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the resource.
    pub title: String,
    /// Link to the resource.
    pub url: String,
    /// Short description, empty when the provider has none.
    #[serde(default)]
    pub snippet: String,
    /// Name of the provider that produced this candidate.
    pub source: String,
    /// Publication time as reported by the provider, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl SearchResult {
    /// Build a candidate without a date.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            source: source.into(),
            date: None,
        }
    }
}

/// Content sources that can be selected per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Curated fixture results seeded from a YAML file.
    Internal,
    /// Google Programmable Search (Custom Search JSON API).
    Google,
    /// YouTube Data API video search.
    #[serde(rename = "youtube")]
    YouTube,
}

impl ProviderKind {
    /// Returns the wire name of this provider, also used as `SearchResult::source`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Google => "google",
            Self::YouTube => "youtube",
        }
    }

    /// Returns all provider variants.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::Internal, Self::Google, Self::YouTube]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| SearchError::Config(format!("unknown source: {s}")))
    }
}
