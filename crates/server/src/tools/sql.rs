//! execute_sql tool implementation.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use toolbench_core::sql::render_outcome;
use toolbench_core::{Error, SqlExecutor};

/// Input parameters for execute_sql.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExecuteSqlParams {
    /// A single SQL statement.
    pub query: String,
}

/// Run one statement and render the outcome as text.
///
/// Statement failures are part of the text, so callers always get a message back.
pub async fn run_sql(executor: &SqlExecutor, query: &str, max_rows: usize) -> String {
    match executor.execute(query).await {
        Ok(outcome) => render_outcome(&outcome, max_rows),
        Err(e) => format!("Error executing SQL query: {}", e.detail()),
    }
}

pub async fn execute_sql_impl(
    executor: &SqlExecutor, max_rows: usize, params: ExecuteSqlParams,
) -> Result<CallToolResult, McpError> {
    if params.query.trim().is_empty() {
        return Err(Error::InvalidInput("query cannot be empty".into()).into());
    }

    let text = run_sql(executor, &params.query, max_rows).await;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}
