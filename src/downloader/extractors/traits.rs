// Strategy trait and extractor configuration

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::diagnostics::diagnose_fault;
use crate::downloader::errors::{DownloadError, StrategyFault};
use crate::downloader::models::{ClientIdentity, NetworkConfig, PostReference, ResolvedMedia, StrategyOutcome};

/// Configuration injected into the strategies at construction time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Headers for the desktop page fetch
    pub desktop_identity: ClientIdentity,
    /// Headers for the mobile page fetch
    pub mobile_identity: ClientIdentity,
    /// Headers for the mirror API request
    pub mirror_identity: ClientIdentity,
    /// Headers for the media download itself
    pub download_identity: ClientIdentity,
    /// Host that serves the mobile rendering
    pub mobile_host: String,
    /// Base URL of the mirror API (`<base>/status/<id>`)
    pub mirror_api_base: String,
    /// Proxy and timeout
    pub network: NetworkConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            desktop_identity: ClientIdentity::desktop(),
            mobile_identity: ClientIdentity::mobile(),
            mirror_identity: ClientIdentity::mirror(),
            download_identity: ClientIdentity::download(),
            mobile_host: "m.twitter.com".to_string(),
            mirror_api_base: "https://api.fxtwitter.com".to_string(),
            network: NetworkConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// `<config dir>/twitter-video-downloader/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("twitter-video-downloader").join("config.json"))
    }

    /// Read a JSON config file; absent fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, DownloadError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DownloadError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            DownloadError::Configuration(format!("invalid config {}: {}", path.display(), e))
        })
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.network.proxy = proxy;
        self
    }

    pub fn with_timeout(mut self, seconds: Option<u32>) -> Self {
        self.network.timeout = seconds;
        self
    }

    pub fn with_mobile_host(mut self, host: impl Into<String>) -> Self {
        self.mobile_host = host.into();
        self
    }

    pub fn with_mirror_api_base(mut self, base: impl Into<String>) -> Self {
        self.mirror_api_base = base.into().trim_end_matches('/').to_string();
        self
    }
}

/// One independent, best-effort way of resolving a post's video
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Name of the strategy (for logging)
    fn name(&self) -> &'static str;

    /// Try once. Faults are absorbed and reported as `NoResult`.
    async fn attempt(&self, reference: &PostReference) -> StrategyOutcome;
}

/// Normalize a strategy's internal result at its boundary.
///
/// A fault is logged with its diagnosis and becomes `NoResult`.
pub fn settle(
    strategy: &'static str,
    result: Result<Option<ResolvedMedia>, StrategyFault>,
) -> StrategyOutcome {
    match result {
        Ok(Some(media)) => StrategyOutcome::Resolved(media),
        Ok(None) => {
            debug!(strategy, "no video candidates");
            StrategyOutcome::NoResult
        }
        Err(fault) => {
            let reason = diagnose_fault(&fault);
            warn!(
                strategy,
                reason = reason.description(),
                transient = reason.is_transient(),
                detail = %fault,
                "strategy failed"
            );
            StrategyOutcome::NoResult
        }
    }
}
