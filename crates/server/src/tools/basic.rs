//! Liveness and arithmetic demo tools.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use toolbench_core::Error;

/// Input parameters for the add tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddParams {
    /// First addend.
    pub a: i64,
    /// Second addend.
    pub b: i64,
}

/// Input parameters for example_tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExampleParams {
    /// Text to echo back.
    pub arg1: String,
}

pub fn ping_impl() -> CallToolResult {
    CallToolResult::success(vec![Content::text("pong")])
}

pub fn add_impl(params: AddParams) -> Result<CallToolResult, McpError> {
    let sum = params
        .a
        .checked_add(params.b)
        .ok_or_else(|| Error::InvalidInput(format!("{} + {} overflows a 64-bit integer", params.a, params.b)))?;

    Ok(CallToolResult::success(vec![Content::text(sum.to_string())]))
}

pub fn example_impl(params: ExampleParams) -> CallToolResult {
    CallToolResult::success(vec![Content::text(format!("Processed: {}", params.arg1))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::texts;

    #[test]
    fn test_ping() {
        assert_eq!(texts(&ping_impl()), vec!["pong"]);
    }

    #[test]
    fn test_add() {
        let result = add_impl(AddParams { a: 2, b: 3 }).unwrap();
        assert_eq!(texts(&result), vec!["5"]);

        let result = add_impl(AddParams { a: -7, b: 4 }).unwrap();
        assert_eq!(texts(&result), vec!["-3"]);
    }

    #[test]
    fn test_add_overflow() {
        let err = add_impl(AddParams { a: i64::MAX, b: 1 }).unwrap_err();
        assert_eq!(err.code, ErrorCode(-32602));
        assert!(err.message.contains("overflows"));
    }

    #[test]
    fn test_example_tool() {
        let result = example_impl(ExampleParams { arg1: "hello".into() });
        assert_eq!(texts(&result), vec!["Processed: hello"]);
    }
}
