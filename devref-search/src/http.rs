//! One `reqwest` client per provider, built from [`SearchConfig`].

use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;

const DEFAULT_USER_AGENT: &str = concat!("devref/", env!("CARGO_PKG_VERSION"));

/// Both web providers talk JSON to a single API host, so a short redirect
/// chain is plenty.
const MAX_REDIRECTS: usize = 5;

/// Client with the configured per-call timeout and User-Agent.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    reqwest::Client::builder()
        .user_agent(agent)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| SearchError::Http(format!("client setup failed: {e}")))
}
