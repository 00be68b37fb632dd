use crate::{CatalogKey, MediaRef, ObserverStatus, Page, PageId, VisibilityEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Navigate to a page (start-up, detail activation, back).
    PageRequested(Page),
    /// Restore the key persisted by an earlier run.
    RestoreSelection(CatalogKey),
    /// Engine fetched the catalog listing for a page view.
    CatalogLoaded { page_id: PageId, total: usize },
    /// Engine rendered one resolved item.
    ItemRendered {
        page_id: PageId,
        key: CatalogKey,
        media: MediaRef,
    },
    /// Trigger emitted a new status for the indicator.
    StatusChanged {
        page_id: PageId,
        status: ObserverStatus,
    },
    /// A batch finished after rendering `rendered` items.
    BatchFinished { page_id: PageId, rendered: usize },
    /// The UI recomputed sentinel visibility after a redraw.
    SentinelVisibility(Vec<VisibilityEntry>),
    /// User moved the selection by `delta` cards.
    SelectionMoved(i32),
    /// User activated the selected card.
    ItemActivated,
    /// User asked to leave the detail view.
    BackRequested,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Input with no binding, such as an unmapped key press.
    NoOp,
}
