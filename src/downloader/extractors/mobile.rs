// Mobile page scraper - first fallback
//
// Different host, different markup, different client identity. No metadata
// scraping here: the title is a placeholder built from the post id.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::patterns::{collect_matches, looks_like_cdn_video, mobile_patterns};
use super::traits::{settle, Strategy};
use crate::downloader::errors::StrategyFault;
use crate::downloader::models::{ClientIdentity, PostReference, ResolvedMedia, StrategyOutcome};
use crate::downloader::traits::PageFetcher;
use crate::downloader::utils::{dedupe, sanitize_filename, DEFAULT_TITLE};

/// Scrapes the post's mobile rendering
pub struct MobilePageExtractor {
    fetcher: Arc<dyn PageFetcher>,
    identity: ClientIdentity,
    mobile_host: String,
}

impl MobilePageExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, identity: ClientIdentity, mobile_host: impl Into<String>) -> Self {
        Self {
            fetcher,
            identity,
            mobile_host: mobile_host.into(),
        }
    }

    async fn scrape(&self, reference: &PostReference) -> Result<Option<ResolvedMedia>, StrategyFault> {
        let url = reference.mobile_link(&self.mobile_host);
        let html = self.fetcher.fetch_text(&url, &self.identity).await?;

        Ok(Self::resolve_from_html(&html, reference))
    }

    /// First CDN video URL in pattern order, with a generated title
    pub fn resolve_from_html(html: &str, reference: &PostReference) -> Option<ResolvedMedia> {
        let pooled = collect_matches(html, mobile_patterns());
        let url = dedupe(pooled)
            .into_iter()
            .find(|url| looks_like_cdn_video(url))?;

        debug!(post = %reference, url = %url, "mobile candidate selected");

        let title = format!("{}_{}", DEFAULT_TITLE, reference.id());
        let filename = format!("{}.mp4", sanitize_filename(&title));

        Some(ResolvedMedia::new(url, title, filename, "auto"))
    }
}

#[async_trait]
impl Strategy for MobilePageExtractor {
    fn name(&self) -> &'static str {
        "mobile_page"
    }

    async fn attempt(&self, reference: &PostReference) -> StrategyOutcome {
        settle(self.name(), self.scrape(reference).await)
    }
}
