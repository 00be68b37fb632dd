use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{CatalogKey, MediaRef, WorkItem};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("feed queue was already seeded for this page view")]
    AlreadySeeded,
}

/// Ordered work for one page view.
///
/// Items are stored reversed and popped from the tail, so pops yield the seed
/// order. Seeding happens once; afterwards the queue only shrinks. Every
/// operation takes the lock for a single step and never across an `.await`,
/// so concurrent batches can pop without ever seeing a partial pop.
#[derive(Debug, Default)]
pub struct FeedQueue {
    inner: Mutex<QueueInner>,
}

#[derive(Debug, Default)]
struct QueueInner {
    items: Vec<WorkItem>,
    seeded: bool,
}

impl FeedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the queue with bare keys in catalog order. Returns the item count.
    pub fn seed<I>(&self, keys: I) -> Result<usize, QueueError>
    where
        I: IntoIterator<Item = CatalogKey>,
    {
        self.seed_items(keys.into_iter().map(WorkItem::Pending))
    }

    /// Seeds the queue with every media item of one key, already resolved.
    pub fn seed_resolved<I>(&self, key: &CatalogKey, media: I) -> Result<usize, QueueError>
    where
        I: IntoIterator<Item = MediaRef>,
    {
        self.seed_items(media.into_iter().map(|media| WorkItem::Resolved {
            key: key.clone(),
            media,
        }))
    }

    pub fn seed_items<I>(&self, items: I) -> Result<usize, QueueError>
    where
        I: IntoIterator<Item = WorkItem>,
    {
        let mut inner = self.lock();
        if inner.seeded {
            return Err(QueueError::AlreadySeeded);
        }
        let mut items: Vec<WorkItem> = items.into_iter().collect();
        items.reverse();
        let count = items.len();
        inner.items = items;
        inner.seeded = true;
        Ok(count)
    }

    /// Removes the next item. An empty queue yields `None`, never an error.
    pub fn pop(&self) -> Option<WorkItem> {
        self.lock().items.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Remaining items in the order they will be popped.
    pub fn snapshot(&self) -> Vec<WorkItem> {
        self.lock().items.iter().rev().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, QueueInner> {
        // Every mutation is a single Vec call, so a poisoned guard still holds
        // consistent data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
