//! MCP server handler implementation.
//!
//! This module defines the main server handler that routes tool calls to the
//! appropriate implementations and serves the resource templates.
use crate::resources;
use crate::tools::basic::{AddParams, ExampleParams, add_impl, example_impl, ping_impl};
use crate::tools::extract::{ExtractWebpageParams, extract_webpage_impl, extract_webpage_json_impl};
use crate::tools::search::{QueryParams, WebSearchParams, provider_search_impl, simple_search_impl, web_search_impl};
use crate::tools::sql::{ExecuteSqlParams, execute_sql_impl};

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListResourceTemplatesResult, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ReadResourceRequestParam, ReadResourceResult, ServerCapabilities,
        ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use toolbench_client::{FetchClient, FetchConfig, PageExtractor, Provider, SearchConfig, SearchDispatcher};
use toolbench_core::{AppConfig, Error, SqlExecutor};

/// The MCP server handler for mcp-demo.
///
/// Cheap to clone; the HTTP transport creates one per session.
#[derive(Clone)]
pub struct ToolbenchServer {
    config: Arc<AppConfig>,
    search: SearchDispatcher,
    pages: PageExtractor,
    sql: SqlExecutor,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl ToolbenchServer {
    /// Create a new server handler.
    pub fn new(config: Arc<AppConfig>) -> Result<Self, Error> {
        let search = SearchDispatcher::new(SearchConfig::from(config.as_ref()))?;
        let pages = PageExtractor::new(FetchClient::new(FetchConfig::from(config.as_ref()))?);
        let sql = SqlExecutor::new(config.sql_database.clone());

        Ok(Self { config, search, pages, sql, tool_router: Self::tool_router() })
    }

    #[tool(description = "Liveness check. Returns 'pong'.")]
    async fn ping(&self) -> Result<CallToolResult, McpError> {
        Ok(ping_impl())
    }

    #[tool(description = "Add two integers and return the sum.")]
    async fn add(&self, params: Parameters<AddParams>) -> Result<CallToolResult, McpError> {
        add_impl(params.0)
    }

    #[tool(description = "Echo the argument back prefixed with 'Processed: '.")]
    async fn example_tool(&self, params: Parameters<ExampleParams>) -> Result<CallToolResult, McpError> {
        Ok(example_impl(params.0))
    }

    #[tool(description = "Search Google. Returns result titles, or a status message when none could be read.")]
    async fn google(&self, params: Parameters<QueryParams>) -> Result<CallToolResult, McpError> {
        provider_search_impl(&self.search, Provider::Google, params.0).await
    }

    #[tool(description = "Search Bing via its RSS feed. Returns result titles.")]
    async fn bing(&self, params: Parameters<QueryParams>) -> Result<CallToolResult, McpError> {
        provider_search_impl(&self.search, Provider::Bing, params.0).await
    }

    #[tool(description = "Query the DuckDuckGo Instant Answer API. Returns answer, definition and related topics.")]
    async fn duckduckgo(&self, params: Parameters<QueryParams>) -> Result<CallToolResult, McpError> {
        provider_search_impl(&self.search, Provider::DuckDuckGo, params.0).await
    }

    /// Search any supported provider.
    ///
    /// The generic provider needs a base_url; for the named providers a base_url
    /// only replaces the host while keeping their parameters and parser.
    #[tool(
        description = "Web search over google, bing, duckduckgo or a generic endpoint (requires base_url). Accepts extra URL params and headers."
    )]
    async fn web_search(&self, params: Parameters<WebSearchParams>) -> Result<CallToolResult, McpError> {
        web_search_impl(&self.search, params.0).await
    }

    #[tool(description = "Mock web search. Makes no network request.")]
    async fn web_search_simple(&self, params: Parameters<QueryParams>) -> Result<CallToolResult, McpError> {
        Ok(simple_search_impl(params.0))
    }

    #[tool(description = "Execute one SQL statement. Returns a Markdown table, the affected row count, or the error.")]
    async fn execute_sql(&self, params: Parameters<ExecuteSqlParams>) -> Result<CallToolResult, McpError> {
        execute_sql_impl(&self.sql, self.config.sql_max_rows, params.0).await
    }

    #[tool(
        description = "Fetch a webpage and summarize its title, main content and links. Saves HTML, Markdown and JSON when an output directory is known."
    )]
    async fn extract_webpage(&self, params: Parameters<ExtractWebpageParams>) -> Result<CallToolResult, McpError> {
        extract_webpage_impl(&self.pages, self.config.output_dir.as_deref(), params.0).await
    }

    #[tool(description = "Fetch a webpage and return the full extraction as JSON. Errors come back as {\"error\": ...}.")]
    async fn extract_webpage_json(&self, params: Parameters<ExtractWebpageParams>) -> Result<CallToolResult, McpError> {
        extract_webpage_json_impl(&self.pages, self.config.output_dir.as_deref(), params.0).await
    }
}

impl ServerHandler for ToolbenchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.name.clone(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().enable_resources().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = %request.name, "tool call");
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }

    async fn list_resource_templates(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult { meta: None, resource_templates: resources::templates()?, next_cursor: None })
    }

    async fn read_resource(
        &self, request: ReadResourceRequestParam, _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        Ok(ReadResourceResult { contents: vec![resources::read(&request.uri)?] })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> ToolbenchServer {
        ToolbenchServer::new(Arc::new(AppConfig::default())).unwrap()
    }

    #[test]
    fn test_registers_all_tools() {
        let mut names: Vec<String> = server().tool_router.list_all().into_iter().map(|t| t.name.to_string()).collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "add",
                "bing",
                "duckduckgo",
                "example_tool",
                "execute_sql",
                "extract_webpage",
                "extract_webpage_json",
                "google",
                "ping",
                "web_search",
                "web_search_simple",
            ]
        );
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "Demo");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
    }

    #[test]
    fn test_add_schema_requires_both_operands() {
        let tools = server().tool_router.list_all();
        let add = tools.iter().find(|t| t.name == "add").unwrap();
        let required = add.input_schema.get("required").and_then(|r| r.as_array()).unwrap();

        assert!(required.iter().any(|v| v == "a"));
        assert!(required.iter().any(|v| v == "b"));
    }
}
