use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use feed_core::{
    FeedQueue, OverlapPolicy, Page, QueueError, TriggerDecision, TriggerState, VisibilityEntry,
    VisibilityTrigger,
};
use feed_logging::{feed_debug, feed_info};
use tokio::task::JoinHandle;

use crate::{BatchLoader, BatchReport, CatalogClient, FeedEvent, RenderSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSettings {
    pub batch_size: usize,
    pub overlap: OverlapPolicy,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            batch_size: 5,
            overlap: OverlapPolicy::Guarded,
        }
    }
}

/// One page view: its queue, its trigger and the loader feeding its sink.
///
/// Dropping the session abandons it. Batches already spawned keep running to
/// completion against their own `Arc`.
pub struct FeedSession {
    queue: FeedQueue,
    trigger: Mutex<VisibilityTrigger>,
    client: Arc<dyn CatalogClient>,
    loader: BatchLoader,
    sink: Arc<dyn RenderSink>,
    batch_size: usize,
}

impl FeedSession {
    pub fn new(
        client: Arc<dyn CatalogClient>,
        sink: Arc<dyn RenderSink>,
        settings: FeedSettings,
    ) -> Self {
        Self {
            queue: FeedQueue::new(),
            trigger: Mutex::new(VisibilityTrigger::new(settings.overlap)),
            loader: BatchLoader::new(Arc::clone(&client)),
            client,
            sink,
            batch_size: settings.batch_size,
        }
    }

    pub fn queue(&self) -> &FeedQueue {
        &self.queue
    }

    pub fn trigger_state(&self) -> TriggerState {
        self.lock_trigger().state(self.queue.is_empty())
    }

    pub fn batches_in_flight(&self) -> usize {
        self.lock_trigger().batches_in_flight()
    }

    /// Seeds the queue for `page`, renders the first batch, then starts
    /// observing the sentinel.
    pub async fn start(self: &Arc<Self>, page: &Page) -> Result<BatchReport, QueueError> {
        let seeded = match page {
            Page::Index => {
                let keys = self.client.list_keys().await;
                self.sink.emit(FeedEvent::CatalogLoaded { total: keys.len() });
                self.queue.seed(keys)?
            }
            Page::Detail { key } => {
                let media = self.client.resolve_media(key).await;
                self.sink.emit(FeedEvent::CatalogLoaded { total: media.len() });
                self.queue.seed_resolved(key, media)?
            }
        };
        feed_info!("Seeded {} work items for {:?}", seeded, page);

        let report = self
            .loader
            .run_batch(&self.queue, self.batch_size, self.sink.as_ref())
            .await;
        self.sink.emit(FeedEvent::BatchCompleted(report));

        let decision = self.lock_trigger().observe(self.queue.is_empty());
        self.apply(decision);
        Ok(report)
    }

    /// Feeds one observer callback to the trigger.
    ///
    /// Returns the handle of the batch task when the callback started one.
    pub fn on_visibility(self: &Arc<Self>, entries: &[VisibilityEntry]) -> Option<JoinHandle<()>> {
        let decision = self
            .lock_trigger()
            .on_visibility(entries, self.queue.is_empty())?;
        self.apply(decision)
    }

    fn apply(self: &Arc<Self>, decision: TriggerDecision) -> Option<JoinHandle<()>> {
        self.sink.emit(FeedEvent::Status(decision.status));
        if !decision.run_batch {
            return None;
        }
        let session = Arc::clone(self);
        Some(tokio::spawn(session.drive_batches()))
    }

    async fn drive_batches(self: Arc<Self>) {
        loop {
            let report = self
                .loader
                .run_batch(&self.queue, self.batch_size, self.sink.as_ref())
                .await;
            feed_debug!(
                "Batch done: popped={} rendered={} remaining={}",
                report.popped,
                report.rendered,
                self.queue.len()
            );
            self.sink.emit(FeedEvent::BatchCompleted(report));

            let next = self
                .lock_trigger()
                .on_batch_finished(self.queue.is_empty());
            let Some(decision) = next else {
                break;
            };
            self.sink.emit(FeedEvent::Status(decision.status));
            if !decision.run_batch {
                break;
            }
        }
    }

    fn lock_trigger(&self) -> MutexGuard<'_, VisibilityTrigger> {
        self.trigger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
