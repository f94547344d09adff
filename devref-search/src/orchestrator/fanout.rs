//! Provider fan-out: every provider × every query, failures absorbed.
//!
//! Calls run concurrently, but candidates are concatenated in submission
//! order (provider-major, then query order) so that fusion's
//! first-occurrence rule is independent of completion order.

use crate::config::SearchConfig;
use crate::provider::SearchProvider;
use crate::types::SearchResult;

/// Raw candidates and per-call warnings gathered by [`fan_out`].
#[derive(Debug, Clone, Default)]
pub struct FanOutOutcome {
    /// All candidates, in submission order, before fusion.
    pub candidates: Vec<SearchResult>,
    /// One entry per failed provider call.
    pub warnings: Vec<String>,
}

/// Query each provider with each query.
///
/// # Pipeline
///
/// 1. Build one future per `(provider, query)` pair, provider-major
/// 2. Await them together with [`futures::future::join_all`], which keeps
///    submission order
/// 3. Log per-call errors at warn level and record a warning string
/// 4. Concatenate successful results
///
/// A failing call contributes zero candidates; nothing is retried.
pub async fn fan_out<P: SearchProvider>(
    providers: &[P],
    queries: &[String],
    config: &SearchConfig,
) -> FanOutOutcome {
    let limit = config.per_query_limit;

    let calls: Vec<_> = providers
        .iter()
        .flat_map(|provider| queries.iter().map(move |query| (provider, query)))
        .map(|(provider, query)| async move {
            let outcome = provider.search(query, limit).await;
            (provider.name(), outcome)
        })
        .collect();

    let outcomes = futures::future::join_all(calls).await;

    let mut fanned = FanOutOutcome::default();
    for (name, outcome) in outcomes {
        match outcome {
            Ok(results) => {
                tracing::debug!(provider = name, count = results.len(), "provider returned results");
                fanned.candidates.extend(results);
            }
            Err(err) => {
                tracing::warn!(provider = name, error = %err, "provider query failed");
                fanned.warnings.push(format!("provider {name} error: {err}"));
            }
        }
    }
    fanned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::types::ProviderKind;
    use std::time::Duration;

    /// Echoes the query back as a single candidate after an optional delay.
    struct EchoProvider {
        kind: ProviderKind,
        delay_ms: u64,
        fail_on: Option<&'static str>,
    }

    impl SearchProvider for EchoProvider {
        async fn search(
            &self,
            query: &str,
            _limit: usize,
        ) -> Result<Vec<SearchResult>, SearchError> {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            if self.fail_on == Some(query) {
                return Err(SearchError::Http("boom".into()));
            }
            Ok(vec![SearchResult::new(
                query,
                format!("https://{}.dev/{}", self.kind, query.replace(' ', "-")),
                "",
                self.kind.name(),
            )])
        }

        fn kind(&self) -> ProviderKind {
            self.kind
        }
    }

    fn queries(qs: &[&str]) -> Vec<String> {
        qs.iter().map(|q| q.to_string()).collect()
    }

    #[tokio::test]
    async fn order_follows_submission_not_completion() {
        let providers = vec![
            EchoProvider { kind: ProviderKind::Google, delay_ms: 30, fail_on: None },
            EchoProvider { kind: ProviderKind::YouTube, delay_ms: 0, fail_on: None },
        ];
        let out = fan_out(&providers, &queries(&["a", "b"]), &SearchConfig::default()).await;
        let urls: Vec<&str> = out.candidates.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://google.dev/a",
                "https://google.dev/b",
                "https://youtube.dev/a",
                "https://youtube.dev/b",
            ]
        );
        assert!(out.warnings.is_empty());
    }

    #[tokio::test]
    async fn failure_is_absorbed_into_warning() {
        let providers = vec![EchoProvider {
            kind: ProviderKind::Google,
            delay_ms: 0,
            fail_on: Some("b"),
        }];
        let out = fan_out(&providers, &queries(&["a", "b"]), &SearchConfig::default()).await;
        assert_eq!(out.candidates.len(), 1);
        assert_eq!(out.warnings, vec!["provider google error: HTTP error: boom".to_string()]);
    }

    #[tokio::test]
    async fn no_providers_yields_nothing() {
        let providers: Vec<EchoProvider> = vec![];
        let out = fan_out(&providers, &queries(&["a"]), &SearchConfig::default()).await;
        assert!(out.candidates.is_empty());
        assert!(out.warnings.is_empty());
    }
}
