//! The request pipeline: comment in, ranked resources out.
//!
//! ```text
//! comment + tags → extract → synthesize (capped) → providers (fan-out)
//!               → fuse → rank (blocking pool) → recommendations
//! ```
//!
//! [`Recommender::process`] never fails. Provider, ranking and setup
//! problems become entries in the response's `warnings` list.

use std::sync::Arc;

use devref_search::{
    fan_out, fuse, GoogleProvider, InternalProvider, Provider, ProviderKind, SearchResult,
    YouTubeProvider,
};
use serde::Serialize;
use tracing::{debug, info, trace, warn, Instrument};
use uuid::Uuid;

use crate::config::{CredentialsConfig, DevrefConfig};
use crate::error::Result;
use crate::nlp::{extract, synthesize};
use crate::request::{RecommendRequest, RecommendResponse, Recommendation, RequestSettings};
use crate::rerank::{rank_with_fallback, select_ranker, LexicalRanker, RankOutcome, Ranker};

/// What a request will search for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryPlan {
    /// Extracted topics followed by request tags.
    pub topics: Vec<String>,
    pub intents: Vec<String>,
    /// Queries sent to providers (at most `max_queries`).
    pub queries: Vec<String>,
    /// Text the ranker compares candidates against.
    pub query_text: String,
}

/// Long-lived recommendation service.
///
/// Holds only read-only state: configuration, the internal seed and the
/// ranking strategy. Every request builds its own providers.
pub struct Recommender {
    config: DevrefConfig,
    credentials: CredentialsConfig,
    internal: InternalProvider,
    ranker: Arc<dyn Ranker>,
    google_base_url: Option<String>,
    youtube_base_url: Option<String>,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("ranker", &self.ranker.name())
            .field("seed_topics", &self.internal.len())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl Recommender {
    /// Validate `config`, load the internal seed and pick the ranker.
    ///
    /// A missing or malformed seed file is logged and leaves the internal
    /// provider empty. Ranker selection may download the embedding model,
    /// so call this off the async runtime.
    ///
    /// # Errors
    ///
    /// Returns [`DevrefError::Config`](crate::DevrefError::Config) if the
    /// configuration is invalid.
    pub fn new(config: DevrefConfig) -> Result<Self> {
        config.validate()?;
        let seed_path = &config.internal.seed_path;
        let internal = match InternalProvider::from_yaml_file(seed_path) {
            Ok(provider) => {
                info!(path = %seed_path.display(), topics = provider.len(), "internal seed loaded");
                provider
            }
            Err(e) => {
                warn!(path = %seed_path.display(), "internal seed unavailable, serving no fixtures: {e}");
                InternalProvider::default()
            }
        };
        let ranker = select_ranker(&config.rerank);
        Self::with_parts(config, internal, ranker)
    }

    /// Assemble a recommender from an already-loaded seed and ranker.
    ///
    /// # Errors
    ///
    /// Returns [`DevrefError::Config`](crate::DevrefError::Config) if the
    /// configuration is invalid.
    pub fn with_parts(
        config: DevrefConfig,
        internal: InternalProvider,
        ranker: Arc<dyn Ranker>,
    ) -> Result<Self> {
        config.validate()?;
        let credentials = config.credentials.clone().with_env_fallback();
        Ok(Self {
            config,
            credentials,
            internal,
            ranker,
            google_base_url: None,
            youtube_base_url: None,
        })
    }

    /// Replace the fallback credentials, including any taken from the
    /// environment by [`Recommender::with_parts`].
    pub fn with_credentials(mut self, credentials: CredentialsConfig) -> Self {
        self.credentials = credentials;
        self
    }

    /// Send Google requests to `base_url` instead of the public API.
    pub fn with_google_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.google_base_url = Some(base_url.into());
        self
    }

    /// Send YouTube requests to `base_url` instead of the public API.
    pub fn with_youtube_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.youtube_base_url = Some(base_url.into());
        self
    }

    /// Name of the active ranking strategy.
    pub fn ranker_name(&self) -> &'static str {
        self.ranker.name()
    }

    /// Extract, synthesize and cap the queries for `request`.
    pub fn plan(&self, request: &RecommendRequest) -> QueryPlan {
        let extraction = extract(&request.comment);
        let topics: Vec<String> = extraction
            .topics
            .into_iter()
            .chain(request.tags.iter().cloned())
            .collect();

        let mut queries = synthesize(&topics, &extraction.intents);
        queries.truncate(self.config.search.max_queries);

        let query_text = if queries.is_empty() {
            request.comment.clone()
        } else {
            queries.join(" ")
        };

        QueryPlan {
            topics,
            intents: extraction.intents,
            queries,
            query_text,
        }
    }

    /// Run the whole pipeline for one request.
    pub async fn process(&self, request: &RecommendRequest) -> RecommendResponse {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("recommend", %request_id);
        self.process_inner(request).instrument(span).await
    }

    async fn process_inner(&self, request: &RecommendRequest) -> RecommendResponse {
        let plan = self.plan(request);
        info!(
            topics = ?plan.topics,
            intents = ?plan.intents,
            queries = plan.queries.len(),
            "query plan ready"
        );
        trace!(queries = ?plan.queries, "dispatching");

        let mut warnings = Vec::new();
        let providers = self.resolve_providers(&request.settings, &mut warnings);

        let dispatch = if plan.queries.is_empty() {
            vec![request.comment.clone()]
        } else {
            plan.queries.clone()
        };
        let search = &self.config.search.provider;
        let outcome = fan_out(&providers, &dispatch, search).await;
        warnings.extend(outcome.warnings);

        let pool = fuse(outcome.candidates, search.max_pool);
        debug!(pool = pool.len(), "candidates fused");

        let ranked = self
            .rank(plan.query_text, pool, request.settings.top_k())
            .await;
        warnings.extend(ranked.warning);

        let resources: Vec<Recommendation> = ranked
            .ranked
            .into_iter()
            .map(|scored| Recommendation {
                title: scored.result.title,
                url: scored.result.url,
                source: scored.result.source,
            })
            .collect();

        info!(resources = resources.len(), warnings = warnings.len(), "request complete");
        RecommendResponse {
            resources,
            warnings,
        }
    }

    /// Build providers for the requested source names.
    ///
    /// Unknown names and providers that cannot be constructed become
    /// warnings. Request credentials take precedence over configured ones.
    fn resolve_providers(
        &self,
        settings: &RequestSettings,
        warnings: &mut Vec<String>,
    ) -> Vec<Provider> {
        let search = &self.config.search.provider;
        let pick = |from_request: &Option<String>, fallback: &Option<String>| {
            from_request
                .clone()
                .filter(|k| !k.trim().is_empty())
                .or_else(|| fallback.clone())
        };

        let mut providers = Vec::new();
        for name in settings.source_names() {
            let kind = match name.parse::<ProviderKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    warn!(source = %name, "skipping unknown source");
                    warnings.push(e.to_string());
                    continue;
                }
            };
            let built = match kind {
                ProviderKind::Internal => Ok(Provider::from(self.internal.clone())),
                ProviderKind::Google => GoogleProvider::new(
                    pick(&settings.google_api_key, &self.credentials.google_api_key),
                    pick(&settings.google_cse_key, &self.credentials.google_cse_key),
                    search,
                )
                .map(|p| match &self.google_base_url {
                    Some(base) => p.with_base_url(base.as_str()),
                    None => p,
                })
                .map(Provider::from),
                ProviderKind::YouTube => YouTubeProvider::new(
                    pick(&settings.youtube_api_key, &self.credentials.youtube_api_key),
                    search,
                )
                .map(|p| match &self.youtube_base_url {
                    Some(base) => p.with_base_url(base.as_str()),
                    None => p,
                })
                .map(Provider::from),
            };
            match built {
                Ok(provider) => providers.push(provider),
                Err(e) => {
                    warn!(source = kind.name(), "provider setup failed: {e}");
                    warnings.push(format!("provider {kind} error: {e}"));
                }
            }
        }
        providers
    }

    /// Rank on the blocking pool; inference can take tens of milliseconds.
    ///
    /// A ranker that panics is treated like one that returned an error:
    /// the pool is re-ranked lexically on this task.
    async fn rank(&self, query_text: String, pool: Vec<SearchResult>, top_k: usize) -> RankOutcome {
        if pool.is_empty() || top_k == 0 {
            return RankOutcome::default();
        }
        let ranker = Arc::clone(&self.ranker);
        let query_text: Arc<str> = query_text.into();
        let pool = Arc::new(pool);
        let task = {
            let query_text = Arc::clone(&query_text);
            let pool = Arc::clone(&pool);
            tokio::task::spawn_blocking(move || {
                rank_with_fallback(ranker.as_ref(), &query_text, &pool, top_k)
            })
        };
        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(ranker = self.ranker.name(), "ranking task failed, using lexical overlap: {e}");
                RankOutcome {
                    ranked: LexicalRanker.rank_now(&query_text, &pool, top_k),
                    warning: Some(format!("semantic rerank error: ranking task failed: {e}")),
                }
            }
        }
    }
}
