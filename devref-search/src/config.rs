//! Provider call budgets.
//!
//! [`SearchConfig`] bounds each provider call (timeout, results per query)
//! and the size of the pool handed to ranking after fusion.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Budgets applied to every provider during one fan-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Seconds before a single provider call is abandoned.
    pub timeout_seconds: u64,
    /// Results asked of a provider for one query.
    pub per_query_limit: usize,
    /// Upper bound on fused candidates.
    pub max_pool: usize,
    /// Overrides the `devref/<version>` User-Agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 15,
            per_query_limit: 10,
            max_pool: 200,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Reject budgets of zero. The error names the offending field.
    pub fn validate(&self) -> Result<(), SearchError> {
        let budgets = [
            ("timeout_seconds", self.timeout_seconds as usize),
            ("per_query_limit", self.per_query_limit),
            ("max_pool", self.max_pool),
        ];
        match budgets.iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(SearchError::Config(format!(
                "{field} must be greater than 0"
            ))),
            None => Ok(()),
        }
    }
}
