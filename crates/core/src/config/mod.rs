//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MCP_DEMO_*)
//! 2. TOML config file (if MCP_DEMO_CONFIG_FILE set)
//! 3. Built-in defaults

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Browser-like User-Agent sent with outbound search requests.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Which transport the server listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Streamable HTTP on `host:port`.
    Http,
    /// JSON-RPC over stdin/stdout.
    Stdio,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MCP_DEMO_*)
/// 2. TOML config file (if MCP_DEMO_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server name advertised during MCP initialization.
    #[serde(default = "default_name")]
    pub name: String,

    /// Listen address for the HTTP transport.
    ///
    /// Set via MCP_DEMO_HOST environment variable.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port for the HTTP transport.
    ///
    /// Set via MCP_DEMO_PORT environment variable.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Transport to serve on: "http" (default) or "stdio".
    #[serde(default = "default_transport")]
    pub transport: Transport,

    /// Timeout for outbound search requests in milliseconds.
    #[serde(default = "default_search_timeout_ms")]
    pub search_timeout_ms: u64,

    /// Server-level request timeout in milliseconds, applied to page fetches.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// User-Agent string for outbound HTTP requests.
    ///
    /// Set via MCP_DEMO_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Skip TLS certificate validation for outbound requests.
    ///
    /// Off unless explicitly enabled via MCP_DEMO_ACCEPT_INVALID_CERTS=true.
    /// Only meant for intercepting proxies in local debugging.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Maximum bytes to fetch per page.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Path to the SQLite database used by the SQL tools.
    ///
    /// Set via MCP_DEMO_SQL_DATABASE environment variable.
    #[serde(default = "default_sql_database")]
    pub sql_database: PathBuf,

    /// Maximum rows rendered in a SQL result table.
    #[serde(default = "default_sql_max_rows")]
    pub sql_max_rows: usize,

    /// Default directory for page extraction artifacts.
    ///
    /// When unset, extraction tools only write files if the caller passes a directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_name() -> String {
    "Demo".into()
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3001
}

fn default_transport() -> Transport {
    Transport::Http
}

fn default_search_timeout_ms() -> u64 {
    10_000
}

fn default_request_timeout_ms() -> u64 {
    60_000
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_sql_database() -> PathBuf {
    PathBuf::from("./mcp-demo.sqlite")
}

fn default_sql_max_rows() -> usize {
    50
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            host: default_host(),
            port: default_port(),
            transport: default_transport(),
            search_timeout_ms: default_search_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
            accept_invalid_certs: false,
            max_bytes: default_max_bytes(),
            sql_database: default_sql_database(),
            sql_max_rows: default_sql_max_rows(),
            output_dir: None,
        }
    }
}

impl AppConfig {
    /// Search timeout as Duration for use with reqwest.
    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }

    /// Request timeout as Duration for use with reqwest/tokio.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Socket address for the HTTP listener.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `host:port` does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid { field: "host".into(), reason: e.to_string() })
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MCP_DEMO_`
    /// 2. TOML file from `MCP_DEMO_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Build the layered figment without extracting it.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MCP_DEMO_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("MCP_DEMO_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    /// Extract and validate configuration from a figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
