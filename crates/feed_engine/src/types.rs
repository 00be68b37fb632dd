use std::fmt;

use feed_core::{CatalogKey, MediaRef, ObserverStatus, PageId};

use crate::DecodeError;

/// Counts for one `run_batch` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchReport {
    /// Items taken off the queue.
    pub popped: usize,
    /// Media lookups issued to the catalog.
    pub fetched: usize,
    /// Items handed to the sink.
    pub rendered: usize,
    /// Rendered items whose media came back empty.
    pub placeholders: usize,
    /// Malformed items dropped without rendering.
    pub skipped: usize,
}

/// What a feed session reports to its sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    CatalogLoaded { total: usize },
    Rendered { key: CatalogKey, media: MediaRef },
    Status(ObserverStatus),
    BatchCompleted(BatchReport),
}

/// A [`FeedEvent`] tagged with the page view that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEvent {
    pub page_id: PageId,
    pub event: FeedEvent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

impl From<DecodeError> for FetchError {
    fn from(err: DecodeError) -> Self {
        FetchError::new(FailureKind::Decode, err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
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
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
