// Mirror API resolver - last fallback
//
// Queries an unauthenticated third-party mirror keyed by post id and reads
// structured metadata instead of scraping markup.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::traits::{settle, Strategy};
use crate::downloader::errors::StrategyFault;
use crate::downloader::format_selector::VariantSelector;
use crate::downloader::models::{ClientIdentity, PostReference, ResolvedMedia, StrategyOutcome};
use crate::downloader::traits::PageFetcher;
use crate::downloader::utils::{media_filename, DEFAULT_TITLE};

#[derive(Debug, Deserialize)]
struct MirrorResponse {
    tweet: Option<MirrorPost>,
}

#[derive(Debug, Deserialize)]
struct MirrorPost {
    text: Option<String>,
    media: Option<MirrorMedia>,
}

#[derive(Debug, Deserialize)]
struct MirrorMedia {
    #[serde(default)]
    videos: Vec<MirrorVideo>,
}

#[derive(Debug, Deserialize)]
struct MirrorVideo {
    url: Option<String>,
    height: Option<u32>,
}

/// Resolves through the mirror's `/status/<id>` endpoint
pub struct MirrorApiExtractor {
    fetcher: Arc<dyn PageFetcher>,
    identity: ClientIdentity,
    api_base: String,
}

impl MirrorApiExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, identity: ClientIdentity, api_base: impl Into<String>) -> Self {
        Self {
            fetcher,
            identity,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint for one post
    pub fn endpoint(&self, reference: &PostReference) -> String {
        format!("{}/status/{}", self.api_base, reference.id())
    }

    async fn query(&self, reference: &PostReference) -> Result<Option<ResolvedMedia>, StrategyFault> {
        let body = self
            .fetcher
            .fetch_text(&self.endpoint(reference), &self.identity)
            .await?;

        Self::resolve_from_json(&body, reference)
    }

    /// Read the first video of the mirrored post
    pub fn resolve_from_json(
        body: &str,
        reference: &PostReference,
    ) -> Result<Option<ResolvedMedia>, StrategyFault> {
        let response: MirrorResponse = serde_json::from_str(body)?;

        let Some(post) = response.tweet else {
            debug!(post = %reference, "mirror response has no post");
            return Ok(None);
        };

        let Some(video) = post.media.and_then(|m| m.videos.into_iter().next()) else {
            debug!(post = %reference, "mirrored post has no videos");
            return Ok(None);
        };

        let Some(url) = video.url.filter(|u| !u.is_empty()) else {
            return Ok(None);
        };

        let title = post
            .text
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let filename = media_filename(&title, reference.id());
        let quality = VariantSelector::quality_label(video.height);

        Ok(Some(ResolvedMedia::new(url, title, filename, quality)))
    }
}

#[async_trait]
impl Strategy for MirrorApiExtractor {
    fn name(&self) -> &'static str {
        "mirror_api"
    }

    async fn attempt(&self, reference: &PostReference) -> StrategyOutcome {
        settle(self.name(), self.query(reference).await)
    }
}
