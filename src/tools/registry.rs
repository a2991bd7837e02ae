//! Tool registry for the MCP tool handlers.
//!
//! Provides a `ToolHandler` trait for implementing tools and a `ToolRegistry`
//! for advertising and dispatching them.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool as McpTool};
use serde_json::Value;
use tracing::debug;

use crate::schema::{self, Shape, ValidationError};

/// Ways a tool invocation can fail before producing an envelope.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error(transparent)]
    InvalidArguments(#[from] ValidationError),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ToolFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CallToolResult, ToolError>> + Send + 'a>>;

/// Trait for handling MCP tool invocations.
///
/// Arguments reaching [`ToolHandler::execute`] have already been checked
/// against [`ToolHandler::arguments_shape`].
pub trait ToolHandler: Send + Sync {
    /// Returns the tool's name (e.g., "get-product").
    fn name(&self) -> &str;

    /// Returns the tool's description.
    fn description(&self) -> &str;

    /// Declarative shape of the accepted arguments.
    fn arguments_shape(&self) -> &Shape;

    /// Returns the input schema for this tool.
    fn input_schema(&self) -> JsonObject {
        self.arguments_shape().to_json_schema()
    }

    /// Executes the tool with validated arguments (always a JSON object).
    fn execute(&self, args: Value) -> ToolFuture<'_>;

    /// Converts this handler to an `McpTool` for use in `list_tools`.
    fn to_mcp_tool(&self) -> McpTool {
        McpTool::new(
            self.name().to_string(),
            self.description().to_string(),
            Arc::new(self.input_schema()),
        )
    }
}

/// Registry for managing tool handlers. Tools are listed in registration order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool handler. A handler with the same name is replaced in place.
    pub fn register_handler<T: ToolHandler + 'static>(mut self, handler: T) -> Self {
        let handler: Arc<dyn ToolHandler> = Arc::new(handler);
        match self.handlers.iter().position(|h| h.name() == handler.name()) {
            Some(index) => self.handlers[index] = handler,
            None => self.handlers.push(handler),
        }
        self
    }

    /// Get a tool handler by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.iter().find(|h| h.name() == name).cloned()
    }

    /// Get all registered tools as `McpTool` instances for `list_tools`.
    pub fn list_tools(&self) -> Vec<McpTool> {
        self.handlers.iter().map(|h| h.to_mcp_tool()).collect()
    }

    /// Validate the arguments and execute the named tool.
    pub async fn call_tool(
        &self,
        name: &str,
        args: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let handler = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let args = Value::Object(args);
        schema::validate(handler.arguments_shape(), &args)?;
        debug!(tool = name, "Arguments validated");

        handler.execute(args).await
    }
}
