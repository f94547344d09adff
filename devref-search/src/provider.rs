//! Trait definition for pluggable content sources.
//!
//! Each source (internal fixtures, Google, YouTube) implements
//! [`SearchProvider`]. The [`Provider`] enum closes over the known
//! variants so a request can hold a heterogeneous provider list.

use crate::error::SearchError;
use crate::providers::{GoogleProvider, InternalProvider, YouTubeProvider};
use crate::types::{ProviderKind, SearchResult};

/// A content source that answers a query with ranked candidates.
///
/// Implementors handle their own:
///
/// - request construction and query encoding
/// - translation of the source's item schema into [`SearchResult`]
/// - short-circuiting when credentials are missing
///
/// Ordering of the returned list is the source's own relevance order; there
/// is no global ranking across sources at this stage.
pub trait SearchProvider: Send + Sync {
    /// Search for `query` and return at most `limit` candidates.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, the source answers with
    /// a non-success status, or the response cannot be decoded. Callers are
    /// expected to absorb these into warnings.
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Returns which [`ProviderKind`] this implementation represents.
    fn kind(&self) -> ProviderKind;

    /// Returns the provider name recorded on candidates and warnings.
    fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// One configured provider of any supported kind.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Seeded fixture results.
    Internal(InternalProvider),
    /// Google Programmable Search.
    Google(GoogleProvider),
    /// YouTube video search.
    YouTube(YouTubeProvider),
}

impl SearchProvider for Provider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        match self {
            Self::Internal(p) => p.search(query, limit).await,
            Self::Google(p) => p.search(query, limit).await,
            Self::YouTube(p) => p.search(query, limit).await,
        }
    }

    fn kind(&self) -> ProviderKind {
        match self {
            Self::Internal(_) => ProviderKind::Internal,
            Self::Google(_) => ProviderKind::Google,
            Self::YouTube(_) => ProviderKind::YouTube,
        }
    }
}

impl From<InternalProvider> for Provider {
    fn from(p: InternalProvider) -> Self {
        Self::Internal(p)
    }
}

impl From<GoogleProvider> for Provider {
    fn from(p: GoogleProvider) -> Self {
        Self::Google(p)
    }
}

impl From<YouTubeProvider> for Provider {
    fn from(p: YouTubeProvider) -> Self {
        Self::YouTube(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;

    /// A mock provider for testing trait bounds and async execution.
    struct MockProvider {
        results: Vec<SearchResult>,
    }

    impl SearchProvider for MockProvider {
        async fn search(
            &self,
            _query: &str,
            limit: usize,
        ) -> Result<Vec<SearchResult>, SearchError> {
            if self.results.is_empty() {
                return Err(SearchError::Parse("mock provider failure".into()));
            }
            Ok(self.results.iter().take(limit).cloned().collect())
        }

        fn kind(&self) -> ProviderKind {
            ProviderKind::Internal
        }
    }

    #[test]
    fn provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockProvider>();
        assert_send_sync::<Provider>();
    }

    #[tokio::test]
    async fn mock_provider_respects_limit() {
        let provider = MockProvider {
            results: vec![
                SearchResult::new("A", "https://a.dev", "", "internal"),
                SearchResult::new("B", "https://b.dev", "", "internal"),
            ],
        };
        let results = provider.search("anything", 1).await.expect("should succeed");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "A");
    }

    #[tokio::test]
    async fn mock_provider_propagates_errors() {
        let provider = MockProvider { results: vec![] };
        let err = provider.search("anything", 5).await.unwrap_err();
        assert!(err.to_string().contains("mock provider failure"));
    }

    #[test]
    fn enum_reports_variant_kind() {
        let config = SearchConfig::default();
        let google = GoogleProvider::new(None, None, &config).expect("client");
        let provider = Provider::from(google);
        assert_eq!(provider.kind(), ProviderKind::Google);
        assert_eq!(provider.name(), "google");

        let internal = Provider::from(InternalProvider::default());
        assert_eq!(internal.kind(), ProviderKind::Internal);
    }
}
