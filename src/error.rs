//! Error types for the devref service.

use devref_search::SearchError;

/// Top-level error type for the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum DevrefError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Embedding model download or loading error.
    #[error("model error: {0}")]
    Model(String),

    /// Ranking failure (tokenization, inference, task join).
    #[error("rerank error: {0}")]
    Rerank(String),

    /// HTTP server error.
    #[error("server error: {0}")]
    Server(String),

    /// Search provider setup error.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, DevrefError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes() {
        assert_eq!(DevrefError::Config("bad".into()).to_string(), "config error: bad");
        assert_eq!(DevrefError::Rerank("boom".into()).to_string(), "rerank error: boom");
    }

    #[test]
    fn search_error_is_transparent() {
        let err: DevrefError = SearchError::Seed("not a mapping".into()).into();
        assert_eq!(err.to_string(), "seed error: not a mapping");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DevrefError = io.into();
        assert!(matches!(err, DevrefError::Io(_)));
    }
}
