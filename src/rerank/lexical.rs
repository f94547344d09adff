//! Word-overlap ranking.

use std::collections::HashSet;

use devref_search::SearchResult;

use super::{sort_and_truncate, Ranker, ScoredCandidate};
use crate::error::Result;

/// Scores a candidate by the fraction of query words it contains.
///
/// Words are lowercase whitespace-separated tokens compared as sets, so the
/// score lies in `[0, 1]`. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalRanker;

fn words(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

impl LexicalRanker {
    /// `|q ∩ c| / |q|`, or `0.0` when either side has no words.
    pub fn score(query_words: &HashSet<String>, candidate: &SearchResult) -> f64 {
        if query_words.is_empty() {
            return 0.0;
        }
        let candidate_words = words(&format!("{} {}", candidate.title, candidate.snippet));
        if candidate_words.is_empty() {
            return 0.0;
        }
        let shared = query_words.intersection(&candidate_words).count();
        shared as f64 / query_words.len() as f64
    }

    /// Infallible ranking used directly by the fallback path.
    pub fn rank_now(
        &self,
        query_text: &str,
        candidates: &[SearchResult],
        top_k: usize,
    ) -> Vec<ScoredCandidate> {
        let query_words = words(query_text);
        let scored = candidates
            .iter()
            .map(|c| ScoredCandidate {
                score: Self::score(&query_words, c),
                result: c.clone(),
            })
            .collect();
        sort_and_truncate(scored, top_k)
    }
}

impl Ranker for LexicalRanker {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn rank(
        &self,
        query_text: &str,
        candidates: &[SearchResult],
        top_k: usize,
    ) -> Result<Vec<ScoredCandidate>> {
        Ok(self.rank_now(query_text, candidates, top_k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, snippet: &str, url: &str) -> SearchResult {
        SearchResult::new(title, url, snippet, "internal")
    }

    #[test]
    fn score_is_overlap_fraction() {
        let q = words("compose xml migration");
        let c = result("Compose migration", "", "https://a");
        assert!((LexicalRanker::score(&q, &c) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn score_is_case_insensitive_and_set_based() {
        let q = words("Compose compose COMPOSE");
        let c = result("compose", "Compose", "https://a");
        assert_eq!(LexicalRanker::score(&q, &c), 1.0);
    }

    #[test]
    fn empty_sides_score_zero() {
        let c = result("Compose", "", "https://a");
        assert_eq!(LexicalRanker::score(&words("   "), &c), 0.0);
        let blank = result("", "", "https://b");
        assert_eq!(LexicalRanker::score(&words("compose"), &blank), 0.0);
    }

    #[test]
    fn ranks_descending_with_stable_ties() {
        let pool = vec![
            result("Unrelated", "nothing here", "https://0"),
            result("Kotlin flow", "", "https://1"),
            result("Kotlin flow guide", "", "https://2"),
            result("Room", "kotlin", "https://3"),
        ];
        let ranked = LexicalRanker.rank_now("kotlin flow", &pool, 10);
        let urls: Vec<_> = ranked.iter().map(|s| s.result.url.as_str()).collect();
        assert_eq!(urls, vec!["https://1", "https://2", "https://3", "https://0"]);
        assert_eq!(ranked[0].score, 1.0);
        assert_eq!(ranked[2].score, 0.5);
    }

    #[test]
    fn output_bounded_by_top_k_and_pool() {
        let pool: Vec<_> = (0..5)
            .map(|i| result(&format!("item {i}"), "", &format!("https://{i}")))
            .collect();
        assert_eq!(LexicalRanker.rank_now("item", &pool, 3).len(), 3);
        assert_eq!(LexicalRanker.rank_now("item", &pool, 10).len(), 5);
        assert!(LexicalRanker.rank_now("item", &pool, 0).is_empty());
        assert!(LexicalRanker.rank_now("item", &[], 3).is_empty());
    }

    #[test]
    fn scores_within_unit_interval() {
        let pool = vec![
            result("a b c", "d e f", "https://1"),
            result("x", "", "https://2"),
            result("a a a a", "b", "https://3"),
        ];
        for query in ["a", "a b c d e f g", "", "zzz", "A b"] {
            for scored in LexicalRanker.rank_now(query, &pool, 10) {
                assert!((0.0..=1.0).contains(&scored.score), "{query}: {}", scored.score);
            }
        }
    }
}
