//! Markdown rendering of SQL outcomes.

use super::connection::SqlOutcome;
use serde_json::Value;

/// Render an outcome as chat-friendly text.
///
/// Result sets become a Markdown table capped at `max_rows` lines, with a
/// trailing note when rows were cut.
pub fn render_outcome(outcome: &SqlOutcome, max_rows: usize) -> String {
    match outcome {
        SqlOutcome::Affected(n) => format!("Query executed successfully. Affected rows: {n}"),
        SqlOutcome::Rows { rows, .. } if rows.is_empty() => "Query executed successfully. No results returned.".to_string(),
        SqlOutcome::Rows { columns, rows } => {
            let header = columns.iter().map(|c| escape_cell(c)).collect::<Vec<_>>().join(" | ");
            let separator = vec!["---"; columns.len()].join(" | ");

            let body = rows
                .iter()
                .take(max_rows)
                .map(|row| format!("| {} |", row.iter().map(cell).collect::<Vec<_>>().join(" | ")))
                .collect::<Vec<_>>()
                .join("\n");

            let mut out = format!("Query executed successfully. Results:\n\n| {header} |\n| {separator} |\n{body}");

            if rows.len() > max_rows {
                out.push_str(&format!("\n\n*Showing {} of {} records.*", max_rows, rows.len()));
            }

            out
        }
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => escape_cell(s),
        other => escape_cell(&other.to_string()),
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
