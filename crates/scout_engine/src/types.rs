use std::fmt;
use std::hash::{Hash, Hasher};

use scout_core::ErrorCode;

/// Outcome of probing one candidate URL.
///
/// `size_bytes == 0` means the candidate was rejected or the probe failed.
/// Identity is the URL alone; size takes no part in equality.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub url: String,
    pub size_bytes: u64,
}

impl ProbeResult {
    pub fn new(url: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            url: url.into(),
            size_bytes,
        }
    }

    pub fn rejected(url: impl Into<String>) -> Self {
        Self::new(url, 0)
    }

    pub fn is_accepted(&self) -> bool {
        self.size_bytes > 0
    }
}

impl PartialEq for ProbeResult {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for ProbeResult {}

impl Hash for ProbeResult {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Scrape-level code reported to the caller for this failure.
    pub fn error_code(&self) -> ErrorCode {
        match self.kind {
            FailureKind::EmptyBody => ErrorCode::EmptyResponse,
            _ => ErrorCode::Io,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    EmptyBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::EmptyBody => write!(f, "empty body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
