// Fault diagnostics - classifies why a strategy came back empty
//
// The orchestrator only sees NoResult; the reason goes into the log record.

use serde::{Deserialize, Serialize};

use crate::downloader::errors::StrategyFault;

/// Why a fetch inside a strategy failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultReason {
    /// HTTP 401/403 - origin refused the client identity
    Forbidden,

    /// HTTP 404/410 - post deleted, or the mirror does not know it
    NotFound,

    /// HTTP 429 - too many requests
    RateLimited,

    /// HTTP 5xx
    ServerError,

    /// Request exceeded the configured timeout
    Timeout,

    /// DNS, refused connection, TLS or proxy failure
    ConnectionFailed,

    /// Body was not what the strategy expected
    MalformedResponse,

    /// Anything else
    Unknown,
}

impl FaultReason {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Forbidden => "access denied",
            Self::NotFound => "post not found",
            Self::RateLimited => "rate limited",
            Self::ServerError => "server error",
            Self::Timeout => "request timed out",
            Self::ConnectionFailed => "connection failed",
            Self::MalformedResponse => "unexpected response body",
            Self::Unknown => "unknown failure",
        }
    }

    /// A later attempt (not within this run) might succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServerError | Self::Timeout | Self::ConnectionFailed
        )
    }
}

/// Classify a structured fault
pub fn diagnose_fault(fault: &StrategyFault) -> FaultReason {
    match fault {
        StrategyFault::Timeout => FaultReason::Timeout,
        StrategyFault::HttpStatus(status) => diagnose_status(*status),
        StrategyFault::Parse(_) => FaultReason::MalformedResponse,
        StrategyFault::Transport(message) => {
            diagnose_error(message).unwrap_or(FaultReason::ConnectionFailed)
        }
    }
}

fn diagnose_status(status: u16) -> FaultReason {
    match status {
        401 | 403 => FaultReason::Forbidden,
        404 | 410 => FaultReason::NotFound,
        429 => FaultReason::RateLimited,
        500..=599 => FaultReason::ServerError,
        _ => FaultReason::Unknown,
    }
}

/// Classify a free-form transport error message
pub fn diagnose_error(message: &str) -> Option<FaultReason> {
    let lower = message.to_lowercase();

    if lower.contains("timed out") || lower.contains("timeout") {
        return Some(FaultReason::Timeout);
    }

    if lower.contains("429") || lower.contains("too many requests") {
        return Some(FaultReason::RateLimited);
    }

    if lower.contains("403") || lower.contains("forbidden") {
        return Some(FaultReason::Forbidden);
    }

    let connection_patterns = [
        "dns error",
        "failed to lookup address",
        "connection refused",
        "connection reset",
        "error trying to connect",
        "certificate",
        "tls",
        "proxy",
    ];
    if connection_patterns.iter().any(|p| lower.contains(p)) {
        return Some(FaultReason::ConnectionFailed);
    }

    None
}
