pub mod downloader;
pub mod logging;

pub use downloader::{
    Downloader, DownloadError, DownloadOptions, ExtractorConfig, PostReference, ResolvedMedia,
};
