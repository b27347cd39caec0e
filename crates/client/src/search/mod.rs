//! Multi-provider web search.
//!
//! Builds a provider-specific URL, issues one GET, and turns whatever comes
//! back into a list of short result strings.
//!
//! ### Contract
//!
//! - **Providers**: Google, Bing (RSS), DuckDuckGo (Instant Answer API), or any
//!   generic endpoint taking the query as a URL parameter.
//! - **Requests**: one attempt, fixed timeout, browser-like User-Agent merged
//!   with provider and caller headers. TLS validation stays on unless the
//!   dispatcher is built with `accept_invalid_certs`.
//! - **Results**: never an error. Timeouts, transport failures, non-200
//!   statuses and unparseable bodies all come back as a single descriptive string.

pub mod error;
pub mod parse;
pub mod provider;
pub mod request;

pub use error::SearchError;
pub use parse::{RawResponse, ResponseParser};
pub use provider::{Endpoint, Provider};
pub use request::{SearchOptions, SearchRequest, build_url, merge_headers};

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::{Duration, Instant};
use toolbench_core::{AppConfig, Error, config::DEFAULT_USER_AGENT};

/// Default search request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Search dispatcher configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// Default User-Agent header.
    pub user_agent: String,
    /// Skip TLS certificate validation. Never enabled implicitly.
    pub accept_invalid_certs: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT, user_agent: DEFAULT_USER_AGENT.to_string(), accept_invalid_certs: false }
    }
}

impl From<&AppConfig> for SearchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            timeout: config.search_timeout(),
            user_agent: config.user_agent.clone(),
            accept_invalid_certs: config.accept_invalid_certs,
        }
    }
}

/// Web search client shared across tool calls.
#[derive(Debug, Clone)]
pub struct SearchDispatcher {
    http: reqwest::Client,
    config: SearchConfig,
}

impl SearchDispatcher {
    /// Create a dispatcher with the given configuration.
    pub fn new(config: SearchConfig) -> Result<Self, Error> {
        if config.accept_invalid_certs {
            tracing::warn!("search dispatcher accepts invalid TLS certificates");
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Run a search against the request's provider.
    pub async fn search(&self, request: &SearchRequest) -> Vec<String> {
        let endpoint = request.provider().endpoint();
        self.search_endpoint(&endpoint, request.query(), request.options()).await
    }

    /// Run a search against an explicit endpoint.
    ///
    /// Always returns at least one string; failures are rendered in place of results.
    pub async fn search_endpoint(&self, endpoint: &Endpoint, query: &str, options: &SearchOptions) -> Vec<String> {
        let start = Instant::now();

        match self.dispatch(endpoint, query, options).await {
            Ok(results) => {
                tracing::debug!("search completed in {:?}, {} results", start.elapsed(), results.len());
                results
            }
            Err(e) => {
                tracing::warn!(base_url = %endpoint.base_url, "search failed: {}", e);
                vec![e.to_string()]
            }
        }
    }

    async fn dispatch(&self, endpoint: &Endpoint, query: &str, options: &SearchOptions) -> Result<Vec<String>, SearchError> {
        let url = build_url(endpoint, query, options);
        let headers = header_map(&merge_headers(&self.config.user_agent, endpoint, options))?;

        tracing::debug!("searching: url={}", url);

        let response = self
            .http
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(e, query))?;

        let status = response.status();
        tracing::debug!("search response status: {}", status);

        if status != StatusCode::OK {
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await.map_err(|e| SearchError::from_reqwest(e, query))?;
        let raw = RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        };

        Ok(endpoint.parser.parse(&raw, query))
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, SearchError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SearchError::Unknown(format!("invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| SearchError::Unknown(format!("invalid header value for '{}': {}", name, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}
