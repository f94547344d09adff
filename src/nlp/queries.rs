//! Intent-aware search query synthesis.
//!
//! Topics are expanded into natural-language queries through template
//! buckets. Buckets fire additively: a comment can trigger the migration
//! and comparison batteries at once. The learning bucket also acts as the
//! default and fires whenever no intent was detected.
//!
//! The output is whitespace-collapsed and deduplicated case-insensitively,
//! keeping the first occurrence.

use std::collections::HashSet;

/// Topic left out of the stack-only docs query.
const STACK_FILLER: &str = "android";

const MIGRATION_INTENTS: &[&str] = &["replace-tech", "migrate", "migration"];
const COMPARISON_INTENTS: &[&str] = &["compare", "evaluation", "vs"];
const LEARNING_INTENTS: &[&str] = &["learn", "howto", "tutorial"];
const BEST_PRACTICE_INTENTS: &[&str] = &["best-practices", "architecture", "production"];
const EXAMPLE_INTENTS: &[&str] = &["example", "examples", "code"];

/// Order-preserving, case-insensitive query accumulator.
#[derive(Default)]
struct QueryList {
    queries: Vec<String>,
    seen: HashSet<String>,
}

impl QueryList {
    fn add(&mut self, query: impl AsRef<str>) {
        let collapsed = query.as_ref().split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return;
        }
        if self.seen.insert(collapsed.to_lowercase()) {
            self.queries.push(collapsed);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.queries
    }
}

/// Trim, drop blanks and dedup case-insensitively, keeping original casing.
fn clean_topics<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_lowercase()))
        .map(str::to_owned)
        .collect()
}

/// All unordered pairs `(items[i], items[j])` with `i < j`.
fn pairs(items: &[String]) -> impl Iterator<Item = (&str, &str)> {
    items.iter().enumerate().flat_map(move |(i, a)| {
        items[i + 1..].iter().map(move |b| (a.as_str(), b.as_str()))
    })
}

/// Build search queries for `topics` given the detected `intents`.
///
/// Returns an empty list when no usable topic remains; callers then fall
/// back to the raw comment.
pub fn synthesize<T: AsRef<str>, I: AsRef<str>>(topics: &[T], intents: &[I]) -> Vec<String> {
    let topics = clean_topics(topics);
    if topics.is_empty() {
        return Vec::new();
    }

    let intents: HashSet<String> = intents.iter().map(|i| i.as_ref().to_lowercase()).collect();
    let has_any = |labels: &[&str]| labels.iter().any(|l| intents.contains(*l));

    let full = topics.join(" ");
    let stack = topics
        .iter()
        .filter(|t| t.to_lowercase() != STACK_FILLER)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = QueryList::default();

    if has_any(MIGRATION_INTENTS) {
        for (a, b) in pairs(&topics) {
            out.add(format!("migrate from {a} to {b} Android Kotlin"));
            out.add(format!("migrate {a} to {b} tutorial"));
            out.add(format!("replace {a} with {b} Android"));
            out.add(format!("{b} migration guide (from {a})"));
            out.add(format!("{a} vs {b} (pros and cons)"));
            out.add(format!("{a} to {b} migration tutorial youtube"));
            out.add(format!("{b} vs {a} comparison youtube"));
        }
        out.add(format!("{full} migration guide"));
        out.add(format!("{full} replace tutorial"));
    }

    if has_any(COMPARISON_INTENTS) {
        for (a, b) in pairs(&topics) {
            out.add(format!("{a} vs {b} Android Kotlin"));
            out.add(format!("{a} vs {b} performance comparison"));
            out.add(format!("{a} vs {b} tutorial"));
            out.add(format!("{a} vs {b} youtube"));
        }
    }

    if intents.is_empty() || has_any(LEARNING_INTENTS) {
        for t in &topics {
            out.add(format!("{t} tutorial"));
            out.add(format!("{t} guide"));
            out.add(format!("{t} best practices"));
            out.add(format!("{t} implementation example"));
            out.add(format!("{t} android kotlin tutorial"));
            out.add(format!("{t} youtube tutorial"));
            out.add(format!("{t} github examples"));
            out.add(format!("{t} official docs"));
            out.add(format!("{t} site:developer.android.com"));
            out.add(format!("{t} site:github.com"));
        }
    }

    if has_any(BEST_PRACTICE_INTENTS) {
        for t in &topics {
            out.add(format!("{t} best practices"));
            out.add(format!("{t} architecture patterns"));
            out.add(format!("{t} production ready"));
            out.add(format!("{t} performance optimization"));
        }
    }

    if has_any(EXAMPLE_INTENTS) {
        for t in &topics {
            out.add(format!("{t} code example"));
            out.add(format!("{t} sample project github"));
            out.add(format!("{t} example implementation"));
        }
    }

    out.add(format!("{full} official docs"));
    if !stack.is_empty() {
        out.add(format!("{stack} official docs"));
    }
    out.add(format!("{full} developer.android.com"));
    out.add(format!("{full} github examples"));
    out.add(format!("{full} best practices guide"));
    out.add(format!("{full} tutorial android kotlin"));
    out.add(format!("{full} migration guide"));
    out.add(format!("{full} comparison"));
    out.add(format!("{full} youtube tutorial"));

    out.into_vec()
}
