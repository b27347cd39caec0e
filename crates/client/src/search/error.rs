//! Search dispatcher failure taxonomy.
//!
//! None of these escape [`crate::SearchDispatcher::search`]: each variant's
//! `Display` is the user-facing string returned in place of results.

/// Failures that can occur while dispatching a search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The request did not complete within the configured timeout.
    #[error("Error: Request timeout for query '{query}'")]
    Timeout { query: String },

    /// Connection, TLS, redirect or body-read failure.
    #[error("Error: Request failed - {0}")]
    Transport(String),

    /// The provider answered with a non-200 status.
    #[error("Error: HTTP {status} - {reason}")]
    HttpStatus { status: u16, reason: String },

    /// The body could not be decoded as text.
    #[error("Search completed for '{query}' - error parsing response: {detail}")]
    Parse { query: String, detail: String },

    /// Anything else, e.g. a header that is not valid HTTP.
    #[error("Error: {0}")]
    Unknown(String),
}

impl SearchError {
    /// Classify a reqwest failure for the given query.
    pub fn from_reqwest(err: reqwest::Error, query: &str) -> Self {
        if err.is_timeout() {
            SearchError::Timeout { query: query.to_string() }
        } else if err.is_decode() {
            SearchError::Parse { query: query.to_string(), detail: err.to_string() }
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::Timeout { query: "rust async".to_string() };
        assert_eq!(err.to_string(), "Error: Request timeout for query 'rust async'");

        let err = SearchError::HttpStatus { status: 404, reason: "Not Found".to_string() };
        assert_eq!(err.to_string(), "Error: HTTP 404 - Not Found");

        let err = SearchError::Transport("connection refused".to_string());
        assert!(err.to_string().starts_with("Error: Request failed - "));

        let err = SearchError::Unknown("bad header".to_string());
        assert_eq!(err.to_string(), "Error: bad header");
    }
}
