//! Unified error types for toolbench.
//!
//! Every variant carries a stable code prefix and maps to a JSON-RPC error code
//! when surfaced through an MCP tool call.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the toolbench server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// HTTP error response or transport failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Content extraction failed.
    #[error("EXTRACT_FAILED: {0}")]
    ExtractFailed(String),

    /// SQL statement failed to prepare or execute.
    #[error("SQL_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Filesystem write failed.
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl Error {
    /// Message without the code prefix, for user-facing text.
    pub fn detail(&self) -> String {
        match self {
            Error::InvalidInput(msg)
            | Error::InvalidUrl(msg)
            | Error::FetchTimeout(msg)
            | Error::FetchTooLarge(msg)
            | Error::HttpError(msg)
            | Error::ExtractFailed(msg) => msg.clone(),
            Error::Database(tokio_rusqlite::Error::Error(e)) => e.to_string(),
            Error::Database(e) => e.to_string(),
            Error::Io(e) => e.to_string(),
        }
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::ExtractFailed(_) => -32000,
            Error::Database(_) => -32002,
            Error::InvalidUrl(_) => -32003,
            Error::FetchTimeout(_) => -32006,
            Error::FetchTooLarge(_) => -32007,
            Error::HttpError(_) => -32008,
            Error::Io(_) => -32013,
        };

        McpError { code: ErrorCode(code), message: err.detail().into(), data: None }
    }
}
