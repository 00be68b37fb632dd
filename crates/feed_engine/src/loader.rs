use std::sync::{mpsc, Arc};

use feed_core::{FeedQueue, PageId, WorkItem};
use feed_logging::{feed_debug, feed_trace};

use crate::{BatchReport, CatalogClient, EngineEvent, FeedEvent};

/// Receives rendered items and trigger status for one page view.
///
/// Called once per resolved item, in pop order within a batch.
pub trait RenderSink: Send + Sync {
    fn emit(&self, event: FeedEvent);
}

/// Forwards events to the engine channel, tagged with their page view.
pub struct ChannelRenderSink {
    page_id: PageId,
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelRenderSink {
    pub fn new(page_id: PageId, tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { page_id, tx }
    }
}

impl RenderSink for ChannelRenderSink {
    fn emit(&self, event: FeedEvent) {
        let _ = self.tx.send(EngineEvent {
            page_id: self.page_id,
            event,
        });
    }
}

/// Drains bounded batches from a [`FeedQueue`].
#[derive(Clone)]
pub struct BatchLoader {
    client: Arc<dyn CatalogClient>,
}

impl BatchLoader {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self { client }
    }

    /// Pops up to `batch_size` items and renders them one after another.
    ///
    /// Item `i + 1` is not popped before item `i` was handed to the sink, so
    /// render order equals pop order. Returns as soon as the queue runs dry;
    /// an empty queue makes this a no-op without any fetch.
    pub async fn run_batch(
        &self,
        queue: &FeedQueue,
        batch_size: usize,
        sink: &dyn RenderSink,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        while report.popped < batch_size {
            let Some(item) = queue.pop() else {
                break;
            };
            report.popped += 1;

            if item.key().is_blank() {
                feed_debug!("Skipping malformed work item {:?}", item);
                report.skipped += 1;
                continue;
            }

            let (key, media) = match item {
                WorkItem::Resolved { key, media } => (key, media),
                WorkItem::Pending(key) => {
                    report.fetched += 1;
                    let media = self.client.resolve_first_media(&key).await;
                    (key, media)
                }
            };

            if media.is_placeholder() {
                report.placeholders += 1;
            }
            feed_trace!("Rendering {} -> {:?}", key, media.as_str());
            sink.emit(FeedEvent::Rendered { key, media });
            report.rendered += 1;
        }
        report
    }
}
