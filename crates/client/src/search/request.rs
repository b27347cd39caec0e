//! Search request types and URL construction.

use super::provider::{Endpoint, Provider};
use std::collections::BTreeMap;
use toolbench_core::Error;
use url::form_urlencoded::byte_serialize;

/// Caller-supplied overrides layered on top of a provider's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Extra query parameters; a key already set by the provider is replaced.
    pub extra_params: BTreeMap<String, String>,
    /// Extra HTTP headers; merged over the default User-Agent and provider headers.
    pub headers: BTreeMap<String, String>,
}

impl SearchOptions {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// A validated search: provider, non-empty query and overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    provider: Provider,
    query: String,
    options: SearchOptions,
}

impl SearchRequest {
    /// Build a request, rejecting blank queries.
    pub fn new(provider: Provider, query: impl Into<String>) -> Result<Self, Error> {
        Self::with_options(provider, query, SearchOptions::default())
    }

    pub fn with_options(provider: Provider, query: impl Into<String>, options: SearchOptions) -> Result<Self, Error> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("query cannot be empty".into()));
        }

        Ok(Self { provider, query, options })
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}

/// Build the request URL for `query` against `endpoint`.
///
/// Parameters are the endpoint's query parameter, then its defaults, with
/// option keys replacing defaults in place and new keys appended. Keys and
/// values are form-urlencoded, so spaces in the query become `+`.
pub fn build_url(endpoint: &Endpoint, query: &str, options: &SearchOptions) -> String {
    let mut params: Vec<(&str, &str)> = Vec::with_capacity(1 + endpoint.default_params.len());
    params.push((endpoint.query_param.as_str(), query));
    for (key, value) in &endpoint.default_params {
        merge_pair(&mut params, key, value);
    }
    for (key, value) in &options.extra_params {
        merge_pair(&mut params, key, value);
    }

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let separator = if endpoint.base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", endpoint.base_url, separator, query_string)
}

/// Headers in precedence order: User-Agent, provider defaults, caller overrides.
///
/// Names are compared case-insensitively; later entries win.
pub fn merge_headers(user_agent: &str, endpoint: &Endpoint, options: &SearchOptions) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = vec![("User-Agent".to_string(), user_agent.to_string())];

    let overrides = endpoint
        .default_headers
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .chain(options.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    for (name, value) in overrides {
        match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(existing) => existing.1 = value.to_string(),
            None => headers.push((name.to_string(), value.to_string())),
        }
    }

    headers
}

fn merge_pair<'a>(params: &mut Vec<(&'a str, &'a str)>, key: &'a str, value: &'a str) {
    match params.iter_mut().find(|(k, _)| *k == key) {
        Some(existing) => existing.1 = value,
        None => params.push((key, value)),
    }
}

fn encode(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect()
}
