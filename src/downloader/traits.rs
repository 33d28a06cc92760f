// Capability traits at the I/O seams

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::errors::{DownloadError, StrategyFault};
use super::models::{ClientIdentity, ResolvedMedia};

/// Fetches a page or API body as text
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` presenting `identity`; non-2xx is a fault
    async fn fetch_text(&self, url: &str, identity: &ClientIdentity) -> Result<String, StrategyFault>;
}

/// Writes a resolved resource to disk
#[async_trait]
pub trait MediaPersister: Send + Sync {
    /// Name of the backend (for logging)
    fn name(&self) -> &'static str;

    /// Store `media` as `<output_dir>/<filename>` and return that path
    async fn persist(&self, media: ResolvedMedia, output_dir: &Path) -> Result<PathBuf, DownloadError>;
}
