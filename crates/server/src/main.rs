//! mcp-demo server entry point.
//!
//! Boots the MCP server on streamable HTTP (default) or stdio, per configuration.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use toolbench_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod app;
mod chat;
mod error;
mod handler;
mod resources;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::debug!(?config, "configuration loaded");

    app::run(config).await
}
