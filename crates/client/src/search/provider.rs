//! Search providers and their endpoint descriptions.

use super::parse::ResponseParser;
use std::fmt;
use toolbench_core::Error;

const GOOGLE_URL: &str = "https://www.google.com/search";
const BING_URL: &str = "https://www.bing.com/search";
const DUCKDUCKGO_URL: &str = "https://api.duckduckgo.com/";

/// A search backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    Google,
    Bing,
    DuckDuckGo,
    /// Any endpoint that takes the query as a single URL parameter.
    Generic { base_url: String, query_param: String },
}

impl Provider {
    /// Generic provider using the conventional `q` parameter.
    pub fn generic(base_url: impl Into<String>) -> Self {
        Provider::Generic { base_url: base_url.into(), query_param: "q".into() }
    }

    /// Resolve a provider by name.
    ///
    /// `generic` requires a base URL. `query_param` only applies to `generic`
    /// and is rejected for the named providers.
    pub fn from_name(name: &str, base_url: Option<&str>, query_param: Option<&str>) -> Result<Self, Error> {
        let named = |provider: Provider| match query_param {
            Some(param) => Err(Error::InvalidInput(format!(
                "query_param '{}' is only supported by the generic provider, not {}",
                param, provider
            ))),
            None => Ok(provider),
        };

        match name.trim().to_ascii_lowercase().as_str() {
            "google" => named(Provider::Google),
            "bing" => named(Provider::Bing),
            "duckduckgo" | "ddg" => named(Provider::DuckDuckGo),
            "generic" => {
                let base_url = base_url
                    .filter(|u| !u.trim().is_empty())
                    .ok_or_else(|| Error::InvalidInput("generic provider requires base_url".into()))?;
                Ok(Provider::Generic {
                    base_url: base_url.to_string(),
                    query_param: query_param.unwrap_or("q").to_string(),
                })
            }
            other => Err(Error::InvalidInput(format!("unknown provider: {}", other))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Bing => "bing",
            Provider::DuckDuckGo => "duckduckgo",
            Provider::Generic { .. } => "generic",
        }
    }

    /// How this provider is queried and how its responses are read.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Provider::Google => Endpoint::new(GOOGLE_URL, ResponseParser::Google)
                .default_param("brd_json", "1")
                .default_param("num", "50"),
            Provider::Bing => Endpoint::new(BING_URL, ResponseParser::Bing)
                .default_param("format", "rss")
                .default_param("count", "10")
                .default_header("Accept", "application/rss+xml, application/xml, text/xml"),
            Provider::DuckDuckGo => Endpoint::new(DUCKDUCKGO_URL, ResponseParser::DuckDuckGo)
                .default_param("format", "json")
                .default_param("no_redirect", "1")
                .default_param("no_html", "1")
                .default_param("skip_disambig", "1"),
            Provider::Generic { base_url, query_param } => Endpoint {
                query_param: query_param.clone(),
                ..Endpoint::new(base_url.clone(), ResponseParser::Generic)
            },
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// URL shape, defaults and parser for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub query_param: String,
    pub default_params: Vec<(String, String)>,
    pub default_headers: Vec<(String, String)>,
    pub parser: ResponseParser,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>, parser: ResponseParser) -> Self {
        Self {
            base_url: base_url.into(),
            query_param: "q".into(),
            default_params: Vec::new(),
            default_headers: Vec::new(),
            parser,
        }
    }

    pub fn default_param(mut self, key: &str, value: &str) -> Self {
        self.default_params.push((key.into(), value.into()));
        self
    }

    pub fn default_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Point this endpoint at a different host, keeping its defaults and parser.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
