//! Locating a SQL statement inside chat-style messages.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SQL_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```sql(.*?)(?:```|\z)").expect("invalid SQL fence regex"));

/// One message of a chat-completions style request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self { role: role.into(), content: content.into() }
    }
}

/// Find the SQL to run in the last user message.
///
/// A fenced ` ```sql ` block takes priority; otherwise the whole message is
/// treated as the statement. Returns `None` when there is no user message or
/// it is blank.
pub fn extract_sql_query(messages: &[ChatMessage]) -> Option<String> {
    let last = messages.iter().rev().find(|m| m.role == "user")?;

    if let Some(block) = SQL_FENCE.captures(&last.content).and_then(|c| c.get(1)) {
        let sql = block.as_str().trim();
        if !sql.is_empty() {
            return Some(sql.to_string());
        }
    }

    let text = last.content.trim();
    if text.is_empty() { None } else { Some(last.content.clone()) }
}
