// reqwest-backed page fetcher

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::errors::{DownloadError, StrategyFault};
use super::models::{ClientIdentity, NetworkConfig};
use super::traits::PageFetcher;

/// Per-request deadline from network settings, `None` when disabled
pub fn request_timeout(config: &NetworkConfig) -> Option<Duration> {
    config.timeout.map(|secs| Duration::from_secs(u64::from(secs)))
}

/// Build the shared HTTP client from network settings.
///
/// Only the connect phase is bounded here. Callers bound the rest themselves:
/// page fetches per request, downloads per read.
pub fn build_client(config: &NetworkConfig) -> Result<reqwest::Client, DownloadError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = request_timeout(config) {
        builder = builder.connect_timeout(timeout);
    }

    if let Some(proxy_url) = config.proxy.as_deref() {
        let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
            DownloadError::Configuration(format!("invalid proxy URL {}: {}", proxy_url, e))
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| DownloadError::Configuration(format!("failed to build HTTP client: {}", e)))
}

/// Apply every header of `identity` to a request
pub fn with_identity(
    mut request: reqwest::RequestBuilder,
    identity: &ClientIdentity,
) -> reqwest::RequestBuilder {
    for (name, value) in &identity.headers {
        request = request.header(name.as_str(), value.as_str());
    }
    request
}

/// Unauthenticated GET over a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    pub fn new(config: &NetworkConfig) -> Result<Self, DownloadError> {
        Ok(Self {
            client: build_client(config)?,
            timeout: request_timeout(config),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str, identity: &ClientIdentity) -> Result<String, StrategyFault> {
        debug!(url, "GET");

        let mut request = with_identity(self.client.get(url), identity);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StrategyFault::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        debug!(url, bytes = body.len(), "body received");
        Ok(body)
    }
}
