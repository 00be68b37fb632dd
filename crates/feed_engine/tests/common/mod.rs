#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

use feed_core::{CatalogKey, MediaRef, ObserverStatus};
use feed_engine::{BatchReport, CatalogClient, FeedEvent, RenderSink};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feed_logging::initialize_for_tests);
}

pub fn media_for(key: &str) -> MediaRef {
    MediaRef::new(format!("https://img.example/{key}/1.jpg"))
}

/// In-memory catalog. Every key has two media items unless marked failing.
#[derive(Default)]
pub struct MockCatalog {
    keys: Vec<CatalogKey>,
    media: HashMap<String, Vec<MediaRef>>,
    delays: HashMap<String, Duration>,
    fetched: Mutex<Vec<String>>,
    list_calls: AtomicUsize,
}

impl MockCatalog {
    pub fn with_keys(names: &[&str]) -> Self {
        let keys = names.iter().map(|name| CatalogKey::new(*name)).collect();
        let media = names
            .iter()
            .map(|name| {
                let second = MediaRef::new(format!("https://img.example/{name}/2.jpg"));
                (name.to_string(), vec![media_for(name), second])
            })
            .collect();
        Self {
            keys,
            media,
            ..Self::default()
        }
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.media.remove(name);
        self
    }

    pub fn delayed(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CatalogClient for MockCatalog {
    async fn list_keys(&self) -> Vec<CatalogKey> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.keys.clone()
    }

    async fn resolve_media(&self, key: &CatalogKey) -> Vec<MediaRef> {
        self.fetched.lock().unwrap().push(key.to_string());
        if let Some(delay) = self.delays.get(key.as_str()) {
            tokio::time::sleep(*delay).await;
        }
        self.media.get(key.as_str()).cloned().unwrap_or_default()
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<FeedEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<FeedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn rendered(&self) -> Vec<(String, MediaRef)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                FeedEvent::Rendered { key, media } => Some((key.to_string(), media)),
                _ => None,
            })
            .collect()
    }

    pub fn rendered_keys(&self) -> Vec<String> {
        self.rendered().into_iter().map(|(key, _)| key).collect()
    }

    pub fn statuses(&self) -> Vec<ObserverStatus> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                FeedEvent::Status(status) => Some(status),
                _ => None,
            })
            .collect()
    }

    pub fn reports(&self) -> Vec<BatchReport> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                FeedEvent::BatchCompleted(report) => Some(report),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl RenderSink for RecordingSink {
    fn emit(&self, event: FeedEvent) {
        self.events.lock().unwrap().push(event);
    }
}
