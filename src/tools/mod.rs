//! Tool handler registry for the product tools.
//!
//! Each tool validates its arguments through the registry, forwards one request
//! to the upstream API, and wraps the outcome in a single-text envelope.

mod registry;

pub use registry::{ToolError, ToolFuture, ToolHandler, ToolRegistry};

mod create_product;
mod get_product;

pub use create_product::CreateProductHandler;
pub use get_product::GetProductHandler;

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::upstream::UpstreamError;

/// Narrow validated arguments into the typed request and serialize the upstream body.
fn request_body<T>(args: Value) -> Result<String, ToolError>
where
    T: DeserializeOwned + Serialize,
{
    let request: T = serde_json::from_value(args)
        .map_err(|e| ToolError::Internal(format!("failed to decode arguments: {}", e)))?;
    serde_json::to_string(&request)
        .map_err(|e| ToolError::Internal(format!("failed to encode request body: {}", e)))
}

/// Wrap an upstream outcome for the host.
///
/// Upstream failures are not raised: the host receives a normal envelope whose
/// text is `failure_text`. The cause has already been logged by the client.
fn text_envelope(outcome: Result<String, UpstreamError>, failure_text: &str) -> CallToolResult {
    let text = match outcome {
        Ok(body) => body,
        Err(_) => failure_text.to_string(),
    };
    CallToolResult::success(vec![Content::text(text)])
}
