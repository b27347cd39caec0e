//! Chat-completions style SQL endpoint.
//!
//! `POST /v1/chat/completions` pulls a SQL statement out of the last user
//! message, runs it and answers with a single assistant message.

use crate::error::ApiError;
use crate::tools::sql::run_sql;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use serde::{Deserialize, Serialize};
use toolbench_core::sql::extract_sql_query;
use toolbench_core::{ChatMessage, SqlExecutor};

/// Model name reported in responses.
const MODEL: &str = "sql-mcp-server";

/// Shared state for the chat route.
#[derive(Debug, Clone)]
pub struct ChatState {
    pub executor: SqlExecutor,
    pub max_rows: usize,
}

/// Incoming chat request. Sampling fields are accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub created: i64,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    pub finish_reason: String,
}

pub fn router(state: ChatState) -> Router {
    Router::new().route("/v1/chat/completions", post(completions)).with_state(state)
}

async fn completions(
    State(state): State<ChatState>, payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Internal(e.body_text()))?;

    let query = extract_sql_query(&request.messages)
        .ok_or_else(|| ApiError::BadRequest("No SQL query found in the messages".into()))?;

    tracing::info!(messages = request.messages.len(), "executing SQL from chat request");
    tracing::debug!(
        system = ?request.system,
        model = ?request.model,
        max_tokens = ?request.max_tokens,
        temperature = ?request.temperature,
        top_p = ?request.top_p,
        "ignored sampling fields"
    );

    let content = run_sql(&state.executor, &query, state.max_rows).await;

    Ok(Json(ChatResponse {
        choices: vec![Choice { message: ChatMessage::new("assistant", content), finish_reason: "stop".into() }],
        created: chrono::Utc::now().timestamp(),
        model: MODEL.into(),
    }))
}
