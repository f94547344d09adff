//! Internal provider — curated resources seeded from a YAML file.
//!
//! The seed is a mapping from a seed phrase to a list of resources:
//!
//! ```yaml
//! jetpack compose:
//!   - title: Jetpack Compose tutorial
//!     url: https://developer.android.com/develop/ui/compose/tutorial
//!     snippet: Build your first Compose UI.
//! ```
//!
//! A query matches a seed phrase when either contains the other
//! (case-insensitive). Seed order is preserved; there is no ranking.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::SearchError;
use crate::provider::SearchProvider;
use crate::types::{ProviderKind, SearchResult};

/// One resource listed under a seed phrase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedEntry {
    /// Resource title.
    #[serde(default)]
    pub title: String,
    /// Resource link.
    #[serde(default)]
    pub url: String,
    /// Optional description.
    #[serde(default)]
    pub snippet: Option<String>,
}

/// A seed phrase together with its resources, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTopic {
    /// Phrase matched against queries.
    pub phrase: String,
    /// Resources returned when the phrase matches.
    pub entries: Vec<SeedEntry>,
}

/// Fixture-backed provider. Cloning shares the loaded seed.
#[derive(Debug, Clone, Default)]
pub struct InternalProvider {
    seed: Arc<[SeedTopic]>,
}

impl InternalProvider {
    /// Build a provider from already-parsed seed topics.
    pub fn new(seed: Vec<SeedTopic>) -> Self {
        Self { seed: seed.into() }
    }

    /// Parse a YAML seed document.
    ///
    /// An empty document yields an empty provider. A phrase whose value is
    /// `null` contributes no entries.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Seed`] if the document is not a mapping of
    /// string phrases to resource lists.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SearchError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let mapping: Option<serde_yaml::Mapping> = serde_yaml::from_str(yaml)
            .map_err(|e| SearchError::Seed(format!("invalid seed document: {e}")))?;

        let mut seed = Vec::new();
        for (key, value) in mapping.unwrap_or_default() {
            let phrase = key
                .as_str()
                .ok_or_else(|| SearchError::Seed("seed phrases must be strings".into()))?
                .to_owned();
            let entries: Option<Vec<SeedEntry>> = serde_yaml::from_value(value)
                .map_err(|e| SearchError::Seed(format!("invalid entries for '{phrase}': {e}")))?;
            seed.push(SeedTopic {
                phrase,
                entries: entries.unwrap_or_default(),
            });
        }

        Ok(Self::new(seed))
    }

    /// Read and parse a YAML seed file.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Seed`] if the file cannot be read or parsed.
    pub fn from_yaml_file(path: &Path) -> Result<Self, SearchError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Seed(format!("cannot read {}: {e}", path.display())))?;
        let provider = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            phrases = provider.seed.len(),
            "internal seed loaded"
        );
        Ok(provider)
    }

    /// Number of seed phrases.
    pub fn len(&self) -> usize {
        self.seed.len()
    }

    /// Whether the seed has no phrases.
    pub fn is_empty(&self) -> bool {
        self.seed.is_empty()
    }

    /// Synchronous lookup shared by the async [`SearchProvider`] impl.
    pub fn lookup(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let key = query.trim().to_lowercase();
        self.seed
            .iter()
            .filter(|topic| {
                let phrase = topic.phrase.to_lowercase();
                phrase.contains(&key) || key.contains(&phrase)
            })
            .flat_map(|topic| topic.entries.iter())
            .take(limit)
            .map(|entry| SearchResult {
                title: entry.title.clone(),
                url: entry.url.clone(),
                snippet: entry.snippet.clone().unwrap_or_default(),
                source: ProviderKind::Internal.name().to_owned(),
                date: None,
            })
            .collect()
    }
}

impl SearchProvider for InternalProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self.lookup(query, limit))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Internal
    }
}
