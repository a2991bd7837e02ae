use std::fmt;
use std::time::Duration;

use anyhow::{Context, bail};
use url::Url;

use crate::upstream::Operation;

/// Production endpoint of the Bigblue public store API.
pub const DEFAULT_BASE_URL: &str = "https://api.bigblue.co/bigblue.storeapi.v1.PublicAPI";

/// Connection settings for the upstream product API.
///
/// Built once at startup and handed to [`crate::create_server`]; nothing in the
/// crate reads credentials from process-wide state.
#[derive(Clone)]
pub struct UpstreamConfig {
    api_key: String,
    base_url: Url,
    timeout: Option<Duration>,
}

impl UpstreamConfig {
    pub fn new(api_key: impl Into<String>, base_url: &str) -> anyhow::Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            bail!("API key must not be empty");
        }

        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid base URL `{}`", base_url))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            bail!(
                "Base URL `{}` must use http or https, got `{}`",
                base_url,
                base_url.scheme()
            );
        }

        Ok(Self {
            api_key,
            base_url,
            timeout: None,
        })
    }

    /// Bound each upstream request. Without this the HTTP client's defaults apply.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Fully-qualified URL for an upstream operation, e.g. `<base>/GetProduct`.
    pub fn operation_url(&self, operation: Operation) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            operation.path()
        )
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}
