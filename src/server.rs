//! MCP server implementation using rmcp.
//!
//! Binds the tool registry to an MCP session and serves it over stdio.

use std::sync::Arc;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServiceExt,
    handler::server::ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
    transport::stdio,
};
use tracing::info;

use crate::tools::{ToolError, ToolRegistry};

/// MCP server that advertises the product tools and dispatches calls to them.
#[derive(Clone)]
pub struct BigblueServer {
    tool_registry: Arc<ToolRegistry>,
}

impl BigblueServer {
    pub fn new(tool_registry: Arc<ToolRegistry>) -> Self {
        Self { tool_registry }
    }

    /// Get the tool registry.
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Dispatch a `tools/call` request. Absent arguments are treated as an empty object.
    pub async fn handle_call(
        &self,
        tool_name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let args = arguments.unwrap_or_default();
        self.tool_registry
            .call_tool(tool_name, args)
            .await
            .map_err(|e| {
                tracing::warn!(tool = %tool_name, "Tool call rejected: {}", e);
                McpError::from(e)
            })
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        match err {
            // -32602: Invalid params (per MCP spec for unknown tools and bad arguments)
            ToolError::UnknownTool(_) | ToolError::InvalidArguments(_) => {
                McpError::invalid_params(err.to_string(), None)
            }
            ToolError::Internal(msg) => McpError::internal_error(msg, None),
        }
    }
}

impl ServerHandler for BigblueServer {
    fn get_info(&self) -> ServerInfo {
        InitializeResult {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Bigblue product tools: look up a product by SKU with `get-product`, \
                 or create one with `create-product`."
                    .to_string(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let result = ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
            ..Default::default()
        };
        std::future::ready(Ok(result))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        let tool_name = request.name.to_string();
        let server = self.clone();

        async move { server.handle_call(&tool_name, request.arguments).await }
    }
}

/// Serve `server` over stdin/stdout until the host closes the session.
pub async fn serve_stdio(server: BigblueServer) -> Result<()> {
    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!("serving error: {:?}", e))?;

    info!("Bigblue MCP server running on stdio");

    // Block until the MCP session ends.
    service.waiting().await?;
    info!("MCP stdio server session ended");
    Ok(())
}
