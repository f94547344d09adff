//! # devref-search
//!
//! Content sources and candidate pooling for devref.
//!
//! This crate answers synthesized queries with learning-resource candidates
//! and merges them into one deduplicated pool ready for ranking.
//!
//! ## Design
//!
//! - [`InternalProvider`] serves curated fixtures seeded from YAML
//! - [`GoogleProvider`] and [`YouTubeProvider`] call the public search APIs
//! - Every provider is queried with every query; calls run concurrently but
//!   results keep submission order
//! - Graceful degradation: a failing or unconfigured provider contributes
//!   nothing and never aborts the request
//! - Fusion deduplicates by exact URL (first occurrence wins) and caps the pool
//!
//! ## Security
//!
//! - API keys never appear in error messages or `Debug` output
//! - Queries are logged only at trace level

pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use orchestrator::{fan_out, fuse, FanOutOutcome};
pub use provider::{Provider, SearchProvider};
pub use providers::{GoogleProvider, InternalProvider, YouTubeProvider};
pub use types::{ProviderKind, SearchResult};

/// Query every provider with every query, then fuse the candidates.
///
/// Convenience wrapper around [`fan_out`] followed by [`fuse`]. Returns the
/// fused pool together with any per-call warnings.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Provider failures
/// are never returned as errors; they appear in the warnings list.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> devref_search::Result<()> {
/// let internal = devref_search::InternalProvider::from_yaml_str(
///     "compose:\n  - title: Compose basics\n    url: https://developer.android.com/compose\n",
/// )?;
/// let providers = vec![devref_search::Provider::from(internal)];
/// let queries = vec!["compose tutorial".to_string()];
/// let (pool, warnings) =
///     devref_search::gather(&providers, &queries, &devref_search::SearchConfig::default()).await?;
/// assert!(warnings.is_empty());
/// for result in &pool {
///     println!("{}: {}", result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn gather<P: SearchProvider>(
    providers: &[P],
    queries: &[String],
    config: &SearchConfig,
) -> Result<(Vec<SearchResult>, Vec<String>)> {
    config.validate()?;
    let outcome = fan_out(providers, queries, config).await;
    let pool = fuse(outcome.candidates, config.max_pool);
    Ok((pool, outcome.warnings))
}
