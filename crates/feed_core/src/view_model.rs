use crate::{CatalogKey, MediaRef, ObserverStatus, PageId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageView {
    #[default]
    Blank,
    Index,
    Detail {
        key: CatalogKey,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub page: PageView,
    pub page_id: PageId,
    pub cards: Vec<CardView>,
    pub status: ObserverStatus,
    pub selected: Option<usize>,
    pub catalog_total: Option<usize>,
    pub batches_completed: usize,
    /// Items rendered by the most recent batch.
    pub last_batch_rendered: Option<usize>,
    pub loading: bool,
    pub last_selection: Option<CatalogKey>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub key: CatalogKey,
    pub media: MediaRef,
}
