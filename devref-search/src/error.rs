//! Failure modes of a provider call.
//!
//! Messages end up verbatim in the response `warnings`, so they never
//! include credentials or request URLs.

/// Why a provider call (or provider setup) failed.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Transport failure: connect, timeout or unreadable body.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-2xx answer.
    #[error("unexpected status {status} from {provider}")]
    Status {
        provider: &'static str,
        status: u16,
    },

    /// Body arrived but did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Bad budgets or an unrecognised source name.
    #[error("config error: {0}")]
    Config(String),

    /// Seed file missing or malformed.
    #[error("seed error: {0}")]
    Seed(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        let cases = [
            (SearchError::Http("connection refused".into()), "HTTP error: connection refused"),
            (
                SearchError::Status { provider: "google", status: 403 },
                "unexpected status 403 from google",
            ),
            (SearchError::Parse("missing items".into()), "parse error: missing items"),
            (
                SearchError::Config("unknown source: bing".into()),
                "config error: unknown source: bing",
            ),
            (SearchError::Seed("no such file".into()), "seed error: no such file"),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn crosses_task_boundaries() {
        fn needs_send_sync<T: Send + Sync + 'static>() {}
        needs_send_sync::<SearchError>();
    }
}
