// Extraction orchestrator - ordered fallback chain
//
// Strategies run one at a time in registration order. The first one that
// resolves wins; later ones are never called. All empty -> NoVideoFound.

use std::sync::Arc;
use tracing::info;

use super::desktop::DesktopPageExtractor;
use super::mirror::MirrorApiExtractor;
use super::mobile::MobilePageExtractor;
use super::traits::{ExtractorConfig, Strategy};
use crate::downloader::errors::DownloadError;
use crate::downloader::models::{PostReference, ResolvedMedia, StrategyOutcome};
use crate::downloader::traits::PageFetcher;

/// Runs strategies in fixed priority order
pub struct ExtractionOrchestrator {
    strategies: Vec<Box<dyn Strategy>>,
}

impl ExtractionOrchestrator {
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Desktop page, then mobile page, then mirror API
    pub fn standard(config: &ExtractorConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let mut orchestrator = Self::new();
        orchestrator.add_strategy(Box::new(DesktopPageExtractor::new(
            fetcher.clone(),
            config.desktop_identity.clone(),
        )));
        orchestrator.add_strategy(Box::new(MobilePageExtractor::new(
            fetcher.clone(),
            config.mobile_identity.clone(),
            config.mobile_host.clone(),
        )));
        orchestrator.add_strategy(Box::new(MirrorApiExtractor::new(
            fetcher,
            config.mirror_identity.clone(),
            config.mirror_api_base.clone(),
        )));
        orchestrator
    }

    pub fn add_strategy(&mut self, strategy: Box<dyn Strategy>) {
        self.strategies.push(strategy);
    }

    /// Registered strategy names, in attempt order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve the post's video, first success wins
    pub async fn extract(&self, reference: &PostReference) -> Result<ResolvedMedia, DownloadError> {
        for strategy in &self.strategies {
            info!(strategy = strategy.name(), post = %reference, "trying strategy");

            match strategy.attempt(reference).await {
                StrategyOutcome::Resolved(media) => {
                    info!(strategy = strategy.name(), url = media.url(), "video resolved");
                    return Ok(media);
                }
                StrategyOutcome::NoResult => {
                    info!(strategy = strategy.name(), "no result, falling back");
                }
            }
        }

        Err(DownloadError::NoVideoFound)
    }
}

impl Default for ExtractionOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
