use crate::{CatalogKey, Page, PageId, VisibilityEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start a fresh page view; any previous one is abandoned.
    OpenPage { page_id: PageId, page: Page },
    /// Forward a sentinel visibility callback to the page view's trigger.
    ReportVisibility {
        page_id: PageId,
        entries: Vec<VisibilityEntry>,
    },
    /// Store the activated key under the fixed selection name.
    PersistSelection { key: CatalogKey },
}
