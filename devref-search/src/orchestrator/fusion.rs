//! Result fusion: exact-URL deduplication and pool capping.
//!
//! The first candidate seen for a URL wins and input order is kept, so the
//! output is always a subsequence of the input. Candidates with an empty
//! URL cannot be deduplicated or surfaced and are dropped.

use std::collections::HashSet;

use crate::types::SearchResult;

/// Default upper bound on the fused pool handed to the ranker.
pub const DEFAULT_MAX_POOL: usize = 200;

/// Deduplicate `candidates` by URL and keep at most `max_pool` of them.
pub fn fuse(candidates: Vec<SearchResult>, max_pool: usize) -> Vec<SearchResult> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut fused = Vec::new();

    for candidate in candidates {
        if fused.len() >= max_pool {
            break;
        }
        if candidate.url.is_empty() || seen.contains(&candidate.url) {
            continue;
        }
        seen.insert(candidate.url.clone());
        fused.push(candidate);
    }

    fused
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(url: &str, source: &str) -> SearchResult {
        SearchResult::new(format!("Title from {source}"), url, "", source)
    }

    #[test]
    fn unique_urls_pass_through_in_order() {
        let fused = fuse(
            vec![make_result("https://a.com", "google"), make_result("https://b.com", "youtube")],
            DEFAULT_MAX_POOL,
        );
        let urls: Vec<&str> = fused.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn first_occurrence_wins() {
        let fused = fuse(
            vec![
                make_result("https://example.com/page", "internal"),
                make_result("https://example.com/page", "google"),
            ],
            DEFAULT_MAX_POOL,
        );
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].source, "internal");
    }

    #[test]
    fn empty_urls_dropped() {
        let fused = fuse(
            vec![
                make_result("", "youtube"),
                make_result("https://a.com", "google"),
                make_result("", "youtube"),
            ],
            DEFAULT_MAX_POOL,
        );
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].url, "https://a.com");
    }

    #[test]
    fn urls_compared_exactly() {
        // No normalisation: trailing slash and case make distinct identities.
        let fused = fuse(
            vec![
                make_result("https://Example.com/path/", "google"),
                make_result("https://example.com/path", "google"),
            ],
            DEFAULT_MAX_POOL,
        );
        assert_eq!(fused.len(), 2);
    }

    #[test]
    fn pool_is_capped() {
        let candidates: Vec<SearchResult> = (0..250)
            .map(|i| make_result(&format!("https://example{i}.com"), "google"))
            .collect();
        let fused = fuse(candidates, DEFAULT_MAX_POOL);
        assert_eq!(fused.len(), 200);
        assert_eq!(fused[199].url, "https://example199.com");
    }

    #[test]
    fn cap_counts_unique_results_only() {
        let mut candidates = vec![make_result("https://dup.com", "google"); 5];
        candidates.push(make_result("https://other.com", "google"));
        let fused = fuse(candidates, 2);
        assert_eq!(fused.len(), 2);
        assert_eq!(fused[1].url, "https://other.com");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(fuse(vec![], DEFAULT_MAX_POOL).is_empty());
    }

    #[test]
    fn output_is_subsequence_without_duplicates() {
        let urls = ["https://a", "", "https://b", "https://a", "https://c", "https://b"];
        let input: Vec<SearchResult> = urls.iter().map(|u| make_result(u, "google")).collect();
        let fused = fuse(input.clone(), DEFAULT_MAX_POOL);

        let mut seen = HashSet::new();
        assert!(fused.iter().all(|r| seen.insert(r.url.clone())));

        let mut cursor = input.iter();
        for r in &fused {
            assert!(cursor.any(|c| c == r), "{} out of order", r.url);
        }
    }
}
