use async_trait::async_trait;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::downloader::errors::DownloadError;
use crate::downloader::fetch::{build_client, request_timeout, with_identity};
use crate::downloader::models::{ClientIdentity, NetworkConfig, ResolvedMedia};
use crate::downloader::traits::MediaPersister;

/// Streams the resolved resource into `<output_dir>/<filename>`
pub struct HttpFileBackend {
    client: reqwest::Client,
    identity: ClientIdentity,
    /// Longest wait for the response head or for the next body chunk
    idle_timeout: Option<Duration>,
}

/// In-progress name next to the final file
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

impl HttpFileBackend {
    pub fn new(network: &NetworkConfig, identity: ClientIdentity) -> Result<Self, DownloadError> {
        Ok(Self {
            client: build_client(network)?,
            identity,
            idle_timeout: request_timeout(network),
        })
    }

    /// Await `step`, failing if it stays silent longer than the idle timeout
    async fn within<T>(&self, step: impl Future<Output = T>) -> Result<T, DownloadError> {
        match self.idle_timeout {
            Some(limit) => tokio::time::timeout(limit, step).await.map_err(|_| {
                DownloadError::Persistence(format!("no data for {}s", limit.as_secs()))
            }),
            None => Ok(step.await),
        }
    }

    async fn open(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let response = self
            .within(with_identity(self.client.get(url), &self.identity).send())
            .await?
            .map_err(|e| DownloadError::Persistence(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Persistence(format!(
                "server answered {} for {}",
                status, url
            )));
        }

        Ok(response)
    }

    async fn stream_to(&self, mut response: reqwest::Response, path: &Path) -> Result<u64, DownloadError> {
        let mut file = fs::File::create(path)
            .await
            .map_err(|e| DownloadError::Persistence(format!("cannot create {}: {}", path.display(), e)))?;

        let mut written: u64 = 0;
        while let Some(chunk) = self
            .within(response.chunk())
            .await?
            .map_err(|e| DownloadError::Persistence(format!("transfer interrupted: {}", e)))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::Persistence(format!("write failed: {}", e)))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| DownloadError::Persistence(format!("write failed: {}", e)))?;

        Ok(written)
    }
}

#[async_trait]
impl MediaPersister for HttpFileBackend {
    fn name(&self) -> &'static str {
        "http_file"
    }

    async fn persist(&self, media: ResolvedMedia, output_dir: &Path) -> Result<PathBuf, DownloadError> {
        fs::create_dir_all(output_dir).await.map_err(|e| {
            DownloadError::Persistence(format!("cannot create {}: {}", output_dir.display(), e))
        })?;

        let path = output_dir.join(media.filename());
        let partial = partial_path(&path);
        info!(url = media.url(), path = %path.display(), "downloading video");

        let response = self.open(media.url()).await?;

        let bytes = match self.stream_to(response, &partial).await {
            Ok(bytes) => bytes,
            Err(e) => {
                if fs::remove_file(&partial).await.is_ok() {
                    warn!(path = %partial.display(), "removed partial file");
                }
                return Err(e);
            }
        };

        fs::rename(&partial, &path).await.map_err(|e| {
            DownloadError::Persistence(format!("cannot move into {}: {}", path.display(), e))
        })?;

        info!(bytes, path = %path.display(), "download complete");
        Ok(path)
    }
}
