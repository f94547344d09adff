//! Embedding-similarity ranking.

use std::sync::Mutex;

use devref_search::SearchResult;

use super::embedding::{cosine_similarity, EmbeddingEngine};
use super::{sort_and_truncate, Ranker, ScoredCandidate};
use crate::error::{DevrefError, Result};

/// Ranks candidates by cosine similarity between the query embedding and
/// each candidate's `"{title}. {snippet}"` embedding.
///
/// Inference is serialised through the engine mutex.
#[derive(Debug)]
pub struct SemanticRanker {
    engine: Mutex<EmbeddingEngine>,
}

impl SemanticRanker {
    pub fn new(engine: EmbeddingEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Download (or reuse the cached) model and build a ranker.
    ///
    /// # Errors
    ///
    /// Returns [`DevrefError::Model`] if the model cannot be fetched or loaded.
    pub fn load() -> Result<Self> {
        EmbeddingEngine::download_and_load().map(Self::new)
    }
}

/// Text embedded for a candidate.
pub(crate) fn candidate_text(result: &SearchResult) -> String {
    if result.snippet.is_empty() {
        result.title.clone()
    } else {
        format!("{}. {}", result.title, result.snippet)
    }
}

impl Ranker for SemanticRanker {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn rank(
        &self,
        query_text: &str,
        candidates: &[SearchResult],
        top_k: usize,
    ) -> Result<Vec<ScoredCandidate>> {
        if candidates.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = candidates.iter().map(candidate_text).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();

        let mut engine = self
            .engine
            .lock()
            .map_err(|_| DevrefError::Rerank("embedding engine lock poisoned".into()))?;
        let query = engine.embed(query_text)?;
        let embedded = engine.embed_batch(&refs)?;
        drop(engine);

        let scored = candidates
            .iter()
            .zip(&embedded)
            .map(|(c, v)| ScoredCandidate {
                score: f64::from(cosine_similarity(&query, v)),
                result: c.clone(),
            })
            .collect();
        Ok(sort_and_truncate(scored, top_k))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn candidate_text_joins_title_and_snippet() {
        let r = SearchResult::new("Compose basics", "https://a", "Build UIs", "internal");
        assert_eq!(candidate_text(&r), "Compose basics. Build UIs");
    }

    #[test]
    fn candidate_text_without_snippet_is_title() {
        let r = SearchResult::new("Compose basics", "https://a", "", "internal");
        assert_eq!(candidate_text(&r), "Compose basics");
    }

    #[test]
    #[ignore] // Requires network + model download
    fn semantic_ranking_prefers_related_candidate() {
        let ranker = SemanticRanker::load().expect("model");
        let pool = vec![
            SearchResult::new("Sourdough starter", "https://bread", "Feeding schedule", "internal"),
            SearchResult::new(
                "Migrate to Jetpack Compose",
                "https://compose",
                "Interop between views and composables",
                "internal",
            ),
        ];
        let ranked = ranker
            .rank("migrate from xml to compose Android Kotlin", &pool, 2)
            .expect("rank");
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].result.url, "https://compose");
        assert!(ranked.iter().all(|s| (-1.0..=1.0).contains(&s.score)));
    }
}
