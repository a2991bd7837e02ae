//! MCP adapter exposing the Bigblue product API as `get-product` and
//! `create-product` tools.

mod config;
pub mod model;
pub mod schema;
pub mod server;
mod tools;
pub mod upstream;

pub use config::{DEFAULT_BASE_URL, UpstreamConfig};
pub use server::{BigblueServer, serve_stdio};
pub use tools::{
    CreateProductHandler, GetProductHandler, ToolError, ToolFuture, ToolHandler, ToolRegistry,
};
pub use upstream::{HttpUpstream, Operation, UpstreamClient, UpstreamError};

use std::sync::Arc;

use anyhow::Result;

/// Register both product tools against `upstream`.
pub fn build_registry(upstream: Arc<dyn UpstreamClient>, config: &UpstreamConfig) -> ToolRegistry {
    ToolRegistry::new()
        .register_handler(GetProductHandler::new(upstream.clone(), config))
        .register_handler(CreateProductHandler::new(upstream, config))
}

/// Convenience function to create a fully configured MCP server.
///
/// This builds the HTTP upstream client from `config`, registers the product
/// tools, and returns a server that implements rmcp's `ServerHandler`.
pub fn create_server(config: UpstreamConfig) -> Result<BigblueServer> {
    let upstream: Arc<dyn UpstreamClient> = Arc::new(HttpUpstream::new(&config)?);
    let tool_registry = build_registry(upstream, &config);
    Ok(BigblueServer::new(Arc::new(tool_registry)))
}
