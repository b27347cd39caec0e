//! Web search tools backed by the search dispatcher.
//!
//! `google`, `bing` and `duckduckgo` query a fixed provider; `web_search`
//! picks the provider by name and accepts per-call overrides.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use toolbench_client::{Provider, SearchDispatcher, SearchOptions, SearchRequest};

/// Input parameters for the single-provider search tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct QueryParams {
    /// Search query (required).
    pub query: String,
}

/// Input parameters for web_search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// Provider: google, bing, duckduckgo (or ddg), generic.
    pub provider: String,

    /// Search query (required).
    pub query: String,

    /// Endpoint URL. Required for generic; overrides the host of the others.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Name of the query parameter (default "q"). Generic provider only; rejected for the others.
    #[serde(default)]
    pub query_param: Option<String>,

    /// Extra URL parameters, replacing provider defaults with the same key.
    #[serde(default)]
    pub params: Option<BTreeMap<String, String>>,

    /// Extra HTTP headers.
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
}

/// Search a fixed provider and return one text item per result string.
pub async fn provider_search_impl(
    dispatcher: &SearchDispatcher, provider: Provider, params: QueryParams,
) -> Result<CallToolResult, McpError> {
    let request = SearchRequest::new(provider, params.query)?;
    let results = dispatcher.search(&request).await;
    Ok(into_result(results))
}

/// Search any provider by name with optional overrides.
pub async fn web_search_impl(dispatcher: &SearchDispatcher, params: WebSearchParams) -> Result<CallToolResult, McpError> {
    let provider = Provider::from_name(&params.provider, params.base_url.as_deref(), params.query_param.as_deref())?;
    let options = SearchOptions {
        extra_params: params.params.unwrap_or_default(),
        headers: params.headers.unwrap_or_default(),
    };
    let request = SearchRequest::with_options(provider, params.query, options)?;

    let results = match (request.provider(), params.base_url.as_deref()) {
        (Provider::Generic { .. }, _) | (_, None) => dispatcher.search(&request).await,
        (provider, Some(base_url)) => {
            let endpoint = provider.endpoint().with_base_url(base_url);
            dispatcher.search_endpoint(&endpoint, request.query(), request.options()).await
        }
    };

    Ok(into_result(results))
}

/// Canned response; makes no network request.
pub fn simple_search_impl(params: QueryParams) -> CallToolResult {
    CallToolResult::success(vec![Content::text(format!(
        "Web search performed for: '{}'. This is a mock search result demonstrating the search functionality.",
        params.query
    ))])
}

fn into_result(results: Vec<String>) -> CallToolResult {
    CallToolResult::success(results.into_iter().map(Content::text).collect())
}
