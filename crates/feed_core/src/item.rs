use std::fmt;

/// Opaque identifier of one catalog entry. Uniqueness is the catalog's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogKey(String);

impl CatalogKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A blank key cannot address anything in the catalog.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CatalogKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CatalogKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Reference (usually a URL) to one piece of media. The empty value is the
/// placeholder rendered when resolution produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MediaRef(String);

impl MediaRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One element of the feed queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkItem {
    /// Media still has to be fetched for this key.
    Pending(CatalogKey),
    /// Media already known, e.g. when a detail view fetched everything up front.
    Resolved { key: CatalogKey, media: MediaRef },
}

impl WorkItem {
    pub fn key(&self) -> &CatalogKey {
        match self {
            WorkItem::Pending(key) => key,
            WorkItem::Resolved { key, .. } => key,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, WorkItem::Resolved { .. })
    }
}
