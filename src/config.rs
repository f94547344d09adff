//! Configuration types for the recommendation service.

use devref_search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{DevrefError, Result};

/// Environment variable consulted for the Google API key.
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";
/// Environment variable consulted for the Google Programmable Search engine id.
pub const GOOGLE_CSE_KEY_ENV: &str = "GOOGLE_CSE_KEY";
/// Environment variable consulted for the YouTube Data API key.
pub const YOUTUBE_API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DevrefConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Fan-out, fusion and query budget.
    pub search: SearchSection,
    /// Ranking strategy.
    pub rerank: RerankConfig,
    /// Curated seed for the internal provider.
    pub internal: InternalConfig,
    /// Default provider credentials.
    pub credentials: CredentialsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to bind to. `0` picks a free port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
        }
    }
}

/// The `[search]` table: provider settings plus the query budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// How many synthesized queries are dispatched per request.
    pub max_queries: usize,
    /// Settings handed to the search crate.
    #[serde(flatten)]
    pub provider: SearchConfig,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            max_queries: 2,
            provider: SearchConfig::default(),
        }
    }
}

/// Ranking configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankConfig {
    /// Try the sentence-embedding ranker before falling back to lexical overlap.
    pub semantic: bool,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self { semantic: true }
    }
}

/// Internal provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalConfig {
    /// YAML seed mapping phrases to curated resources. When read from a
    /// config file, a relative path is taken from that file's directory.
    pub seed_path: PathBuf,
}

impl Default for InternalConfig {
    fn default() -> Self {
        Self {
            seed_path: PathBuf::from("data/internal_dataset.yaml"),
        }
    }
}

impl InternalConfig {
    fn anchor_at(&mut self, dir: &std::path::Path) {
        if self.seed_path.is_relative() {
            self.seed_path = dir.join(&self.seed_path);
        }
    }
}

/// Provider credentials used when a request carries none.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_cse_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_api_key: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("CredentialsConfig")
            .field("google_api_key", &mark(&self.google_api_key))
            .field("google_cse_key", &mark(&self.google_cse_key))
            .field("youtube_api_key", &mark(&self.youtube_api_key))
            .finish()
    }
}

impl CredentialsConfig {
    /// Fill unset keys from `GOOGLE_API_KEY`, `GOOGLE_CSE_KEY` and
    /// `YOUTUBE_API_KEY`.
    pub fn with_env_fallback(mut self) -> Self {
        let env = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        if self.google_api_key.is_none() {
            self.google_api_key = env(GOOGLE_API_KEY_ENV);
        }
        if self.google_cse_key.is_none() {
            self.google_cse_key = env(GOOGLE_CSE_KEY_ENV);
        }
        if self.youtube_api_key.is_none() {
            self.youtube_api_key = env(YOUTUBE_API_KEY_ENV);
        }
        self
    }
}

impl DevrefConfig {
    /// Parse a TOML file. Missing tables and keys take their defaults.
    ///
    /// A relative `internal.seed_path` is anchored at the file's directory,
    /// so the seed is found no matter where the process was started.
    ///
    /// # Errors
    ///
    /// [`DevrefError::Io`] when unreadable, [`DevrefError::Config`] when not valid TOML.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&text)
            .map_err(|e| DevrefError::Config(format!("{}: {e}", path.display())))?;
        if let Some(dir) = path.parent() {
            config.internal.anchor_at(dir);
        }
        Ok(config)
    }

    /// Write the whole configuration, defaults included, as pretty TOML.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let text = toml::to_string_pretty(self).map_err(|e| DevrefError::Config(e.to_string()))?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, text)?;
        Ok(())
    }

    /// `$XDG_CONFIG_HOME/devref/config.toml`, else `~/.config/devref/config.toml`.
    pub fn default_config_path() -> PathBuf {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(std::env::temp_dir);
        base.join("devref").join("config.toml")
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`DevrefError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(DevrefError::Config("server.host must not be empty".into()));
        }
        if self.search.max_queries == 0 {
            return Err(DevrefError::Config(
                "search.max_queries must be greater than 0".into(),
            ));
        }
        self.search
            .provider
            .validate()
            .map_err(|e| DevrefError::Config(format!("search: {e}")))
    }
}
