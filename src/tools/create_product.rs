//! Handler for the `create-product` tool.

use std::sync::Arc;

use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::model::{self, CreateProductRequest};
use crate::schema::Shape;
use crate::tools::{ToolFuture, ToolHandler, request_body, text_envelope};
use crate::upstream::{Operation, UpstreamClient};

pub const FAILURE_TEXT: &str = "Failed to create product";

/// Creates a product from a full product record.
pub struct CreateProductHandler {
    upstream: Arc<dyn UpstreamClient>,
    url: String,
}

impl CreateProductHandler {
    pub fn new(upstream: Arc<dyn UpstreamClient>, config: &UpstreamConfig) -> Self {
        Self {
            upstream,
            url: config.operation_url(Operation::CreateProduct),
        }
    }
}

impl ToolHandler for CreateProductHandler {
    fn name(&self) -> &str {
        "create-product"
    }

    fn description(&self) -> &str {
        "Create product with the given information"
    }

    fn arguments_shape(&self) -> &Shape {
        model::create_product_shape()
    }

    fn execute(&self, args: Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let body = request_body::<CreateProductRequest>(args)?;
            let outcome = self.upstream.post(&self.url, body).await;
            Ok(text_envelope(outcome, FAILURE_TEXT))
        })
    }
}
