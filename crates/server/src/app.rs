//! Transport wiring.
//!
//! Over HTTP the MCP service is mounted at `/mcp` beside the SQL chat route;
//! over stdio the handler talks JSON-RPC on stdin/stdout.

use crate::chat::{self, ChatState};
use crate::handler::ToolbenchServer;

use anyhow::Result;
use axum::Router;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager};
use std::sync::Arc;
use toolbench_core::{AppConfig, SqlExecutor, Transport};

/// Serve until the transport closes or Ctrl-C is received.
pub async fn run(config: AppConfig) -> Result<()> {
    let config = Arc::new(config);
    let handler = ToolbenchServer::new(config.clone())?;

    match config.transport {
        Transport::Stdio => serve_stdio(handler).await,
        Transport::Http => serve_http(config, handler).await,
    }
}

async fn serve_stdio(handler: ToolbenchServer) -> Result<()> {
    tracing::info!("Starting mcp-demo server on stdio transport");

    let server = serve_server(handler, stdio()).await?;
    server.waiting().await?;

    Ok(())
}

async fn serve_http(config: Arc<AppConfig>, handler: ToolbenchServer) -> Result<()> {
    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Starting mcp-demo server on streamable HTTP transport");

    axum::serve(listener, router(&config, handler))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");

    Ok(())
}

/// MCP endpoint at `/mcp` plus `POST /v1/chat/completions`.
pub fn router(config: &AppConfig, handler: ToolbenchServer) -> Router {
    let mcp = StreamableHttpService::new(
        move || Ok(handler.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let chat = chat::router(ChatState {
        executor: SqlExecutor::new(config.sql_database.clone()),
        max_rows: config.sql_max_rows,
    });

    Router::new().nest_service("/mcp", mcp).merge(chat)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_router_serves_chat_route() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig { sql_database: dir.path().join("app.sqlite"), ..Default::default() };
        let handler = ToolbenchServer::new(Arc::new(config.clone())).unwrap();

        let request = Request::post("/v1/chat/completions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"messages":[{"role":"user","content":"SELECT 2 AS two"}]}"#))
            .unwrap();

        let response = router(&config, handler).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["choices"][0]["message"]["content"].as_str().unwrap().contains("| 2 |"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let config = AppConfig::default();
        let handler = ToolbenchServer::new(Arc::new(config.clone())).unwrap();

        let request = Request::get("/nope").body(Body::empty()).unwrap();
        let response = router(&config, handler).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
