// Common data models for the resolution pipeline

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Stable identifier of a post, taken from the `/status/<digits>` segment.
///
/// Construct with [`PostReference::parse`]; the identifier is never invented.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostReference {
    pub(crate) id: String,
    pub(crate) link: String,
}

impl PostReference {
    /// Numeric post identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The link the identifier was parsed from
    pub fn link(&self) -> &str {
        &self.link
    }
}

impl fmt::Display for PostReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// One discovered media encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCandidate {
    pub url: String,
    /// Declared bitrate in bits per second, when the source reports one
    pub bitrate: Option<u64>,
    /// MIME type, e.g. "video/mp4" or "application/x-mpegURL"
    pub content_type: String,
}

impl MediaCandidate {
    pub fn new(url: impl Into<String>, bitrate: Option<u64>, content_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            bitrate,
            content_type: content_type.into(),
        }
    }

    /// Only progressive MP4 encodings count as downloadable video
    pub fn is_video(&self) -> bool {
        self.content_type.eq_ignore_ascii_case("video/mp4")
    }
}

/// Final descriptor handed to the persistence step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMedia {
    url: String,
    title: String,
    filename: String,
    quality: String,
}

impl ResolvedMedia {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        filename: impl Into<String>,
        quality: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            filename: filename.into(),
            quality: quality.into(),
        }
    }

    /// Directly fetchable resource URL
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sanitized file name, always ending in `.mp4`
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Best-effort label such as "720p" or "auto"
    pub fn quality(&self) -> &str {
        &self.quality
    }
}

/// Result of a single strategy attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    Resolved(ResolvedMedia),
    NoResult,
}

impl StrategyOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl From<Option<ResolvedMedia>> for StrategyOutcome {
    fn from(media: Option<ResolvedMedia>) -> Self {
        media.map_or(Self::NoResult, Self::Resolved)
    }
}

/// Download options
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub output_dir: PathBuf,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
        }
    }
}

/// Header set a request presents to the origin.
///
/// The origin serves different markup to non-browser clients, so each request
/// kind carries a browser-like identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientIdentity {
    pub headers: BTreeMap<String, String>,
}

impl ClientIdentity {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            headers: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Desktop Chrome on Windows
    pub fn desktop() -> Self {
        Self::from_pairs(&[
            ("User-Agent", DESKTOP_UA),
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.5"),
            ("Connection", "keep-alive"),
            ("Upgrade-Insecure-Requests", "1"),
        ])
    }

    /// Safari on iPhone
    pub fn mobile() -> Self {
        Self::from_pairs(&[
            (
                "User-Agent",
                "Mozilla/5.0 (iPhone; CPU iPhone OS 14_7_1 like Mac OS X) AppleWebKit/605.1.15 \
                 (KHTML, like Gecko) Version/14.1.2 Mobile/15E148 Safari/604.1",
            ),
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.5"),
            ("Connection", "keep-alive"),
        ])
    }

    /// Short desktop UA used for the mirror API
    pub fn mirror() -> Self {
        Self::from_pairs(&[(
            "User-Agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
        )])
    }

    /// Identity for fetching the media bytes
    pub fn download() -> Self {
        Self::from_pairs(&[("User-Agent", DESKTOP_UA)])
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.headers.get("User-Agent").map(String::as_str)
    }
}

const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Network configuration shared by the fetcher and the file backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// HTTP or SOCKS5 proxy URL (e.g., "socks5://127.0.0.1:1080")
    pub proxy: Option<String>,

    /// Timeout in seconds
    pub timeout: Option<u32>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: Some(30),
        }
    }
}
