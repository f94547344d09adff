//! Candidate ranking strategies.
//!
//! A [`Ranker`] orders the fused candidate pool by relevance to the
//! dispatched query text. Two strategies exist:
//!
//! - [`LexicalRanker`]: word overlap, always available, never fails
//! - `SemanticRanker`: sentence-embedding cosine similarity, built with the
//!   `semantic` feature and used only when the model loads
//!
//! The strategy is picked once at startup by [`select_ranker`]. Per request,
//! [`rank_with_fallback`] drops to lexical ranking if the chosen ranker fails.

#[cfg(feature = "semantic")]
pub mod embedding;
pub mod lexical;
#[cfg(feature = "semantic")]
pub mod semantic;

use std::sync::Arc;

use devref_search::SearchResult;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::RerankConfig;
use crate::error::{DevrefError, Result};

pub use lexical::LexicalRanker;
#[cfg(feature = "semantic")]
pub use semantic::SemanticRanker;

/// A candidate with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub result: SearchResult,
    /// Lexical scores lie in `[0, 1]`, semantic scores in `[-1, 1]`.
    pub score: f64,
}

/// Orders candidates by relevance to a query.
pub trait Ranker: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Return at most `top_k` candidates, best first.
    ///
    /// # Errors
    ///
    /// Returns an error if scoring fails. Callers fall back to lexical
    /// ranking through [`rank_with_fallback`].
    fn rank(
        &self,
        query_text: &str,
        candidates: &[SearchResult],
        top_k: usize,
    ) -> Result<Vec<ScoredCandidate>>;
}

/// Stable sort by descending score, then keep the first `top_k`.
pub(crate) fn sort_and_truncate(
    mut scored: Vec<ScoredCandidate>,
    top_k: usize,
) -> Vec<ScoredCandidate> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_k);
    scored
}

/// Ranked candidates plus the warning raised if the fallback was used.
#[derive(Debug, Clone, Default)]
pub struct RankOutcome {
    pub ranked: Vec<ScoredCandidate>,
    pub warning: Option<String>,
}

/// Rank with `primary`, dropping to [`LexicalRanker`] if it fails.
pub fn rank_with_fallback(
    primary: &dyn Ranker,
    query_text: &str,
    candidates: &[SearchResult],
    top_k: usize,
) -> RankOutcome {
    match primary.rank(query_text, candidates, top_k) {
        Ok(ranked) => RankOutcome {
            ranked,
            warning: None,
        },
        Err(e) => {
            warn!(ranker = primary.name(), error = %e, "ranking failed, using lexical overlap");
            RankOutcome {
                ranked: LexicalRanker.rank_now(query_text, candidates, top_k),
                warning: Some(format!("semantic rerank error: {}", reason(e))),
            }
        }
    }
}

fn reason(e: DevrefError) -> String {
    match e {
        DevrefError::Rerank(msg) => msg,
        other => other.to_string(),
    }
}

/// Pick the ranking strategy for the lifetime of the service.
///
/// Model loading can take a while on first run (download) and blocks the
/// calling thread.
pub fn select_ranker(config: &RerankConfig) -> Arc<dyn Ranker> {
    if config.semantic {
        if let Some(ranker) = load_semantic() {
            info!("semantic ranking enabled");
            return ranker;
        }
    }
    info!("lexical ranking enabled");
    Arc::new(LexicalRanker)
}

#[cfg(feature = "semantic")]
fn load_semantic() -> Option<Arc<dyn Ranker>> {
    match SemanticRanker::load() {
        Ok(ranker) => Some(Arc::new(ranker)),
        Err(e) => {
            warn!("semantic ranker unavailable, using lexical overlap: {e}");
            None
        }
    }
}

#[cfg(not(feature = "semantic"))]
fn load_semantic() -> Option<Arc<dyn Ranker>> {
    warn!("semantic ranking requested but the `semantic` feature is disabled");
    None
}
