// Error types for the resolution pipeline
//
// Two layers:
// - DownloadError: terminal, surfaced to the caller
// - StrategyFault: raised inside a single strategy, always absorbed there

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    /// Link does not look like a post link (`/<user>/status/<digits>`)
    #[error("Invalid Twitter/X URL: {0}")]
    InvalidReference(String),

    /// Every strategy came back empty
    #[error(
        "Failed to extract video information from the tweet. \
         This tweet may not contain a video or may be private."
    )]
    NoVideoFound,

    /// Creating the output directory or streaming the file failed
    #[error("Download failed: {0}")]
    Persistence(String),

    /// Bad config file, invalid proxy URL, HTTP client could not be built
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Failure inside one strategy attempt. Never leaves the strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyFault {
    /// Connection-level failure (DNS, refused, TLS, proxy)
    #[error("transport error: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Origin answered with a non-2xx status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Body could not be read or decoded
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for StrategyFault {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::Timeout;
        }

        if let Some(status) = e.status() {
            return Self::HttpStatus(status.as_u16());
        }

        if e.is_decode() || e.is_body() {
            return Self::Parse(e.to_string());
        }

        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for StrategyFault {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
