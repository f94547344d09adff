//! Topic, keyword and intent extraction from free-text comments.
//!
//! Matching is plain substring search over the normalised text, not word
//! boundary matching: short keys such as `di` or `rx` also fire inside
//! longer words. This over-matching is a known tolerance.

use std::collections::BTreeSet;

use serde::Serialize;

use super::dictionary::{
    AVOID_MARKERS, DI_MARKERS, REPLACE_MARKERS, REPOSITORY_FALLBACK_TOPIC, REPOSITORY_TRIGGER,
    STACK_HINTS, SYNONYMS,
};

/// Intent label for "use X instead of Y" comments.
pub const INTENT_REPLACE_TECH: &str = "replace-tech";
/// Intent label for "avoid this pattern" comments.
pub const INTENT_AVOID_PATTERN: &str = "avoid-pattern";
/// Intent label for dependency-injection comments.
pub const INTENT_APPLY_DI: &str = "apply-di";

/// What a comment is about and what the author wants.
///
/// Every collection is sorted and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Canonical topic keys.
    pub topics: Vec<String>,
    /// Stack hints found verbatim in the text.
    pub keywords: Vec<String>,
    /// Intent labels.
    pub intents: Vec<String>,
}

/// Trim, lowercase and collapse runs of whitespace into single spaces.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Extract topics, keywords and intents from `comment`.
pub fn extract(comment: &str) -> ExtractionResult {
    let text = normalize(comment);

    let mut topics: BTreeSet<String> = SYNONYMS
        .iter()
        .filter(|(key, synonyms)| text.contains(key) || synonyms.iter().any(|s| text.contains(s)))
        .map(|(key, _)| (*key).to_owned())
        .collect();

    let keywords: BTreeSet<String> = STACK_HINTS
        .iter()
        .filter(|hint| text.contains(*hint))
        .map(|hint| (*hint).to_owned())
        .collect();

    let mut intents = BTreeSet::new();
    let mentions_any = |markers: &[&str]| markers.iter().any(|m| text.contains(m));
    if mentions_any(REPLACE_MARKERS) {
        intents.insert(INTENT_REPLACE_TECH.to_owned());
    }
    if mentions_any(AVOID_MARKERS) {
        intents.insert(INTENT_AVOID_PATTERN.to_owned());
    }
    if mentions_any(DI_MARKERS) {
        intents.insert(INTENT_APPLY_DI.to_owned());
    }

    if topics.is_empty() && text.contains(REPOSITORY_TRIGGER) {
        topics.insert(REPOSITORY_FALLBACK_TOPIC.to_owned());
    }

    ExtractionResult {
        topics: topics.into_iter().collect(),
        keywords: keywords.into_iter().collect(),
        intents: intents.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_sorted_unique(items: &[String]) -> bool {
        items.windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn normalize_trims_lowercases_and_collapses() {
        assert_eq!(normalize("  Use   Jetpack\tCompose\n NOW "), "use jetpack compose now");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn prefer_compose_instead_of_xml() {
        let result = extract("I prefer Compose instead of XML");
        assert_eq!(result.topics, vec!["compose", "xml"]);
        assert_eq!(result.keywords, vec!["compose", "xml"]);
        assert_eq!(result.intents, vec![INTENT_REPLACE_TECH]);
    }

    #[test]
    fn synonym_maps_to_canonical_key() {
        let result = extract("Move this to a StateFlow and use Dagger Hilt");
        assert!(result.topics.contains(&"flow".to_string()));
        assert!(result.topics.contains(&"hilt".to_string()));
        assert!(result.topics.contains(&"dagger".to_string()));
    }

    #[test]
    fn several_intents_co_occur() {
        let result = extract("Avoid the service locator; you should use dependency injection");
        assert_eq!(
            result.intents,
            vec![INTENT_APPLY_DI, INTENT_AVOID_PATTERN, INTENT_REPLACE_TECH]
        );
        assert!(result.topics.contains(&"dependency injection".to_string()));
    }

    #[test]
    fn dont_and_do_not_mean_avoid() {
        assert_eq!(extract("don't block here").intents, vec![INTENT_AVOID_PATTERN]);
        assert_eq!(extract("Do not block here").intents, vec![INTENT_AVOID_PATTERN]);
    }

    #[test]
    fn substring_matching_over_matches_short_keys() {
        // "di" inside "audio" counts as a DI marker and as a synonym.
        let result = extract("the audio buffer");
        assert_eq!(result.intents, vec![INTENT_APPLY_DI]);
        assert_eq!(result.topics, vec!["dependency injection"]);
    }

    #[test]
    fn repository_fallback_when_no_topic() {
        let result = extract("Move the query into a Repository");
        assert_eq!(result.topics, vec![REPOSITORY_FALLBACK_TOPIC]);
    }

    #[test]
    fn repository_fallback_skipped_when_topics_found() {
        let result = extract("Room repository");
        assert_eq!(result.topics, vec!["room"]);
    }

    #[test]
    fn unrecognised_text_is_empty() {
        let result = extract("please fix the typo");
        assert!(result.topics.is_empty());
        assert!(result.keywords.is_empty());
        assert!(result.intents.is_empty());
    }

    #[test]
    fn empty_comment_is_empty() {
        assert_eq!(extract(""), ExtractionResult::default());
    }

    #[test]
    fn keywords_are_independent_of_topics() {
        let result = extract("androidx camerax sample");
        assert_eq!(result.keywords, vec!["android", "androidx", "camerax"]);
        assert!(result.topics.contains(&"jetpack".to_string()));
        assert!(result.topics.contains(&"android".to_string()));
    }

    #[test]
    fn outputs_sorted_and_unique() {
        let comments = [
            "Prefer Retrofit with OkHttp and Moshi instead of Volley",
            "Use coroutines, Flow, Room and Hilt in the MVVM ViewModel",
            "Don't use RxJava; prefer Kotlin coroutines and StateFlow",
            "migrate gradle to ksp instead of kapt, avoid kapt",
        ];
        for comment in comments {
            let result = extract(comment);
            assert!(is_sorted_unique(&result.topics), "{comment}: {:?}", result.topics);
            assert!(is_sorted_unique(&result.keywords), "{comment}: {:?}", result.keywords);
            assert!(is_sorted_unique(&result.intents), "{comment}: {:?}", result.intents);
        }
    }

    #[test]
    fn no_dictionary_hit_and_no_repository_means_no_topics() {
        for comment in ["fix the typo", "rename this variable", "looks good to me"] {
            assert!(extract(comment).topics.is_empty(), "{comment}");
        }
    }
}
