// Downloader facade: link -> reference -> strategies -> file

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use super::backends::HttpFileBackend;
use super::errors::DownloadError;
use super::extractors::{ExtractionOrchestrator, ExtractorConfig};
use super::fetch::HttpFetcher;
use super::models::{DownloadOptions, PostReference, ResolvedMedia};
use super::traits::MediaPersister;

pub struct Downloader {
    extraction: ExtractionOrchestrator,
    persister: Box<dyn MediaPersister>,
}

impl Downloader {
    /// Standard strategy chain over HTTP, file backend for persistence
    pub fn new(config: &ExtractorConfig) -> Result<Self, DownloadError> {
        let fetcher = Arc::new(HttpFetcher::new(&config.network)?);
        let persister = HttpFileBackend::new(&config.network, config.download_identity.clone())?;

        Ok(Self::from_parts(
            ExtractionOrchestrator::standard(config, fetcher),
            Box::new(persister),
        ))
    }

    pub fn from_parts(extraction: ExtractionOrchestrator, persister: Box<dyn MediaPersister>) -> Self {
        Self {
            extraction,
            persister,
        }
    }

    /// Resolve the video descriptor without downloading anything
    pub async fn resolve(&self, link: &str) -> Result<ResolvedMedia, DownloadError> {
        let reference = PostReference::parse(link)?;
        info!(post = %reference, "extracting video information");

        let media = self.extraction.extract(&reference).await?;
        info!(title = media.title(), quality = media.quality(), "found video");
        Ok(media)
    }

    /// Resolve, then hand the descriptor to the persister exactly once
    pub async fn download(&self, link: &str, options: &DownloadOptions) -> Result<PathBuf, DownloadError> {
        let media = self.resolve(link).await?;

        info!(backend = self.persister.name(), "persisting video");
        self.persister.persist(media, &options.output_dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::extractors::Strategy;
    use crate::downloader::models::StrategyOutcome;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedStrategy(Option<ResolvedMedia>);

    #[async_trait]
    impl Strategy for FixedStrategy {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn attempt(&self, _reference: &PostReference) -> StrategyOutcome {
            self.0.clone().into()
        }
    }

    struct CountingPersister {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MediaPersister for CountingPersister {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn persist(&self, media: ResolvedMedia, output_dir: &Path) -> Result<PathBuf, DownloadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(output_dir.join(media.filename()))
        }
    }

    fn downloader(media: Option<ResolvedMedia>) -> (Downloader, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut extraction = ExtractionOrchestrator::new();
        extraction.add_strategy(Box::new(FixedStrategy(media)));
        let persister = CountingPersister { calls: calls.clone() };
        (Downloader::from_parts(extraction, Box::new(persister)), calls)
    }

    #[tokio::test]
    async fn test_invalid_link_fails_before_any_strategy() {
        let (downloader, calls) = downloader(None);
        let result = downloader
            .download("https://example.com/watch?v=1", &DownloadOptions::default())
            .await;

        assert!(matches!(result, Err(DownloadError::InvalidReference(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_video_means_no_persistence() {
        let (downloader, calls) = downloader(None);
        let result = downloader
            .download("https://x.com/user/status/1", &DownloadOptions::default())
            .await;

        assert_eq!(result, Err(DownloadError::NoVideoFound));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolved_media_is_persisted_once() {
        let media = ResolvedMedia::new("https://video.twimg.com/a.mp4", "t", "t_1.mp4", "auto");
        let (downloader, calls) = downloader(Some(media));
        let options = DownloadOptions {
            output_dir: PathBuf::from("/tmp/out"),
        };

        let path = downloader
            .download("https://x.com/user/status/1", &options)
            .await
            .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/out/t_1.mp4"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
