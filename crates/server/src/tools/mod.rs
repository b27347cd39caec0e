//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mcp-demo server. Each
//! `*_impl` function is a thin adapter between tool parameters and the
//! core and client crates.

pub mod basic;
pub mod extract;
pub mod search;
pub mod sql;

/// Text items of a tool result, in order.
#[cfg(test)]
pub(crate) fn texts(result: &rmcp::model::CallToolResult) -> Vec<String> {
    result
        .content
        .iter()
        .filter_map(|c| c.as_text().map(|t| t.text.clone()))
        .collect()
}
