//! Handler for the `get-product` tool.

use std::sync::Arc;

use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::model::{self, GetProductRequest};
use crate::schema::Shape;
use crate::tools::{ToolFuture, ToolHandler, request_body, text_envelope};
use crate::upstream::{Operation, UpstreamClient};

pub const FAILURE_TEXT: &str = "Failed to retrieve product data";

/// Looks a product up by SKU.
pub struct GetProductHandler {
    upstream: Arc<dyn UpstreamClient>,
    url: String,
}

impl GetProductHandler {
    pub fn new(upstream: Arc<dyn UpstreamClient>, config: &UpstreamConfig) -> Self {
        Self {
            upstream,
            url: config.operation_url(Operation::GetProduct),
        }
    }
}

impl ToolHandler for GetProductHandler {
    fn name(&self) -> &str {
        "get-product"
    }

    fn description(&self) -> &str {
        "Get product information for a given product"
    }

    fn arguments_shape(&self) -> &Shape {
        model::get_product_shape()
    }

    fn execute(&self, args: Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let body = request_body::<GetProductRequest>(args)?;
            let outcome = self.upstream.post(&self.url, body).await;
            Ok(text_envelope(outcome, FAILURE_TEXT))
        })
    }
}
