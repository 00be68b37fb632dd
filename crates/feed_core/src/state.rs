use crate::view_model::{AppViewModel, CardView, PageView};
use crate::{CatalogKey, MediaRef, ObserverStatus};

pub type PageId = u64;

/// A page view. Each one owns its own feed queue in the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Every catalog key, media resolved lazily.
    Index,
    /// All media of one key, resolved up front.
    Detail { key: CatalogKey },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Card {
    key: CatalogKey,
    media: MediaRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    page: Option<Page>,
    page_id: PageId,
    cards: Vec<Card>,
    status: ObserverStatus,
    selected: Option<usize>,
    catalog_total: Option<usize>,
    batches_completed: usize,
    last_batch_rendered: Option<usize>,
    loading: bool,
    last_selection: Option<CatalogKey>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let page = match &self.page {
            None => PageView::Blank,
            Some(Page::Index) => PageView::Index,
            Some(Page::Detail { key }) => PageView::Detail { key: key.clone() },
        };
        AppViewModel {
            page,
            page_id: self.page_id,
            cards: self
                .cards
                .iter()
                .map(|card| CardView {
                    key: card.key.clone(),
                    media: card.media.clone(),
                })
                .collect(),
            status: self.status,
            selected: self.selected,
            catalog_total: self.catalog_total,
            batches_completed: self.batches_completed,
            last_batch_rendered: self.last_batch_rendered,
            loading: self.loading,
            last_selection: self.last_selection.clone(),
            dirty: self.dirty,
        }
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Returns whether a dirty flag was set, clearing it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_current(&self, page_id: PageId) -> bool {
        self.page.is_some() && self.page_id == page_id
    }

    /// Replaces the current page view and returns the new page id.
    pub(crate) fn open_page(&mut self, page: Page) -> PageId {
        self.page_id += 1;
        self.page = Some(page);
        self.cards.clear();
        self.status = ObserverStatus::Off;
        self.selected = None;
        self.catalog_total = None;
        self.batches_completed = 0;
        self.last_batch_rendered = None;
        self.loading = true;
        self.mark_dirty();
        self.page_id
    }

    pub(crate) fn push_card(&mut self, key: CatalogKey, media: MediaRef) {
        self.cards.push(Card { key, media });
        if self.selected.is_none() {
            self.selected = Some(0);
        }
        self.mark_dirty();
    }

    pub(crate) fn set_status(&mut self, status: ObserverStatus) {
        if self.status != status {
            self.status = status;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_catalog_total(&mut self, total: usize) {
        self.catalog_total = Some(total);
        self.mark_dirty();
    }

    pub(crate) fn record_batch(&mut self, rendered: usize) {
        self.batches_completed += 1;
        self.last_batch_rendered = Some(rendered);
        self.loading = false;
        self.mark_dirty();
    }

    pub(crate) fn move_selection(&mut self, delta: i32) {
        let Some(last) = self.cards.len().checked_sub(1) else {
            return;
        };
        let current = self.selected.unwrap_or(0) as i64;
        let next = (current + i64::from(delta)).clamp(0, last as i64) as usize;
        if self.selected != Some(next) {
            self.selected = Some(next);
            self.mark_dirty();
        }
    }

    pub(crate) fn selected_key(&self) -> Option<CatalogKey> {
        self.selected
            .and_then(|index| self.cards.get(index))
            .map(|card| card.key.clone())
    }

    pub(crate) fn remember_selection(&mut self, key: CatalogKey) {
        self.last_selection = Some(key);
        self.mark_dirty();
    }
}
