//! HTTP client for the upstream product API.

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error};

use crate::config::UpstreamConfig;

/// Upstream operations exposed through tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetProduct,
    CreateProduct,
}

impl Operation {
    pub fn path(&self) -> &'static str {
        match self {
            Operation::GetProduct => "GetProduct",
            Operation::CreateProduct => "CreateProduct",
        }
    }
}

/// Why an upstream call produced no usable body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// The server answered outside the 2xx range.
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },
    /// The request never completed: connect, timeout, or body read failure.
    #[error("request failed: {0}")]
    Transport(String),
}

pub type UpstreamFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, UpstreamError>> + Send + 'a>>;

/// Sends one serialized JSON body to a fully-qualified operation URL.
pub trait UpstreamClient: Send + Sync {
    fn post<'a>(&'a self, url: &'a str, body: String) -> UpstreamFuture<'a>;
}

/// [`UpstreamClient`] backed by `reqwest`, authenticating with a static bearer key.
pub struct HttpUpstream {
    client: reqwest::Client,
    api_key: String,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key().to_string(),
        })
    }

    async fn send(&self, url: &str, body: String) -> Result<String, UpstreamError> {
        debug!(url, "POST upstream");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

impl UpstreamClient for HttpUpstream {
    fn post<'a>(&'a self, url: &'a str, body: String) -> UpstreamFuture<'a> {
        Box::pin(async move {
            let result = self.send(url, body).await;
            if let Err(e) = &result {
                error!(url, "Error making Bigblue API request: {}", e);
                if let UpstreamError::Status { body, .. } = e {
                    debug!(url, body = %body, "Upstream error body");
                }
            }
            result
        })
    }
}


#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;

    use super::*;

    type Seen = Arc<Mutex<Vec<(HeaderMap, String)>>>;

    /// Serve `status` + `reply` on every POST path and record what was received.
    async fn spawn_upstream(status: StatusCode, reply: &'static str) -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let app = Router::new().route(
            "/{operation}",
            post(move |headers: HeaderMap, body: String| {
                let recorder = recorder.clone();
                async move {
                    recorder.lock().unwrap().push((headers, body));
                    (status, reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), seen)
    }

    #[tokio::test]
    async fn test_post_sends_bearer_and_json_content_type() {
        let (base, seen) = spawn_upstream(StatusCode::OK, r#"{"product":{}}"#).await;
        let config = UpstreamConfig::new("test-key", &base).unwrap();
        let client = HttpUpstream::new(&config).unwrap();

        let url = config.operation_url(Operation::GetProduct);
        let text = client
            .post(&url, r#"{"id":"ABCD-123456-WXYZ"}"#.to_string())
            .await
            .unwrap();
        assert_eq!(text, r#"{"product":{}}"#);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (headers, body) = &seen[0];
        assert_eq!(headers["authorization"], "Bearer test-key");
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(body, r#"{"id":"ABCD-123456-WXYZ"}"#);
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let (base, _seen) = spawn_upstream(StatusCode::NOT_FOUND, "no such product").await;
        let config = UpstreamConfig::new("test-key", &base).unwrap();
        let client = HttpUpstream::new(&config).unwrap();

        let err = client
            .post(&config.operation_url(Operation::GetProduct), "{}".to_string())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            UpstreamError::Status {
                status: 404,
                body: "no such product".to_string(),
            }
        );
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        // Bind then drop to get a local port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = UpstreamConfig::new("test-key", &format!("http://{}", addr)).unwrap();
        let client = HttpUpstream::new(&config).unwrap();

        let err = client
            .post(&config.operation_url(Operation::CreateProduct), "{}".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)));
    }
}
