// Desktop page scraper - primary strategy
//
// Richest source (title metadata, several embedding styles) but the most
// sensitive to markup changes.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

use super::patterns::{collect_matches, desktop_patterns, looks_like_video};
use super::traits::{settle, Strategy};
use crate::downloader::errors::StrategyFault;
use crate::downloader::models::{ClientIdentity, PostReference, ResolvedMedia, StrategyOutcome};
use crate::downloader::traits::PageFetcher;
use crate::downloader::utils::{clean_title, dedupe, media_filename, DEFAULT_TITLE};

lazy_static! {
    static ref OG_DESCRIPTION_RE: Regex =
        Regex::new(r#"<meta property="og:description" content="([^"]*)""#).unwrap();
    static ref TITLE_RE: Regex = Regex::new(r"<title>([^<]*)</title>").unwrap();
}

/// Scrapes the post's desktop rendering
pub struct DesktopPageExtractor {
    fetcher: Arc<dyn PageFetcher>,
    identity: ClientIdentity,
}

impl DesktopPageExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, identity: ClientIdentity) -> Self {
        Self { fetcher, identity }
    }

    async fn scrape(&self, reference: &PostReference) -> Result<Option<ResolvedMedia>, StrategyFault> {
        let html = self
            .fetcher
            .fetch_text(reference.link(), &self.identity)
            .await?;

        Ok(Self::resolve_from_html(&html, reference))
    }

    /// Pick the video and title out of a desktop page body
    pub fn resolve_from_html(html: &str, reference: &PostReference) -> Option<ResolvedMedia> {
        let pooled = collect_matches(html, desktop_patterns());
        let candidates: Vec<String> = dedupe(pooled)
            .into_iter()
            .filter(|url| looks_like_video(url))
            .collect();

        debug!(post = %reference, candidates = candidates.len(), "desktop candidate pool");

        // Longest URL stands in for "most qualified" variant
        let url = candidates
            .into_iter()
            .reduce(|best, url| if url.len() > best.len() { url } else { best })?;

        let title = Self::extract_title(html);
        let filename = media_filename(&title, reference.id());

        Some(ResolvedMedia::new(url, title, filename, "auto"))
    }

    /// og:description, else `<title>`, minus the site-name suffix
    fn extract_title(html: &str) -> String {
        OG_DESCRIPTION_RE
            .captures(html)
            .or_else(|| TITLE_RE.captures(html))
            .and_then(|caps| caps.get(1))
            .map(|m| clean_title(m.as_str()))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }
}

#[async_trait]
impl Strategy for DesktopPageExtractor {
    fn name(&self) -> &'static str {
        "desktop_page"
    }

    async fn attempt(&self, reference: &PostReference) -> StrategyOutcome {
        settle(self.name(), self.scrape(reference).await)
    }
}
