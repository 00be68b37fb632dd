use std::path::PathBuf;

use anyhow::Context;
use feed_core::{Effect, Msg};
use feed_engine::{EngineEvent, EngineHandle, FeedEvent};
use feed_logging::{feed_debug, feed_info};

use super::config::AppConfig;
use super::persistence;

/// Carries effects out of the pure core and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    state_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(config.catalog_settings(), config.feed_settings())
            .context("failed to build the catalog client")?;
        Ok(Self {
            engine,
            state_dir: config.state_dir.clone(),
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::OpenPage { page_id, page } => {
                    feed_info!("OpenPage page_id={} page={:?}", page_id, page);
                    self.engine.open_page(page_id, page);
                }
                Effect::ReportVisibility { page_id, entries } => {
                    feed_debug!(
                        "ReportVisibility page_id={} visible={:?}",
                        page_id,
                        entries.first().map(|entry| entry.is_visible)
                    );
                    self.engine.report_visibility(page_id, entries);
                }
                Effect::PersistSelection { key } => {
                    feed_info!("PersistSelection key={}", key);
                    persistence::save_selection(&self.state_dir, &key);
                }
            }
        }
    }

    /// Drains whatever the engine has produced so far.
    pub fn poll_events(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            msgs.push(map_event(event));
        }
        msgs
    }
}

fn map_event(event: EngineEvent) -> Msg {
    let page_id = event.page_id;
    match event.event {
        FeedEvent::CatalogLoaded { total } => Msg::CatalogLoaded { page_id, total },
        FeedEvent::Rendered { key, media } => Msg::ItemRendered {
            page_id,
            key,
            media,
        },
        FeedEvent::Status(status) => Msg::StatusChanged { page_id, status },
        FeedEvent::BatchCompleted(report) => {
            if report.placeholders > 0 || report.skipped > 0 {
                feed_info!(
                    "Batch on page {}: {} placeholders, {} skipped",
                    page_id,
                    report.placeholders,
                    report.skipped
                );
            }
            Msg::BatchFinished {
                page_id,
                rendered: report.rendered,
            }
        }
    }
}
