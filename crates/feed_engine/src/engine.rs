use std::sync::{mpsc, Arc};
use std::thread;

use feed_core::{Page, PageId, VisibilityEntry};
use feed_logging::{feed_error, feed_info};

use crate::{
    CatalogClient, CatalogSettings, ChannelRenderSink, EngineEvent, FeedSession, FeedSettings,
    FetchError, ReqwestCatalogClient,
};

enum EngineCommand {
    OpenPage { page_id: PageId, page: Page },
    Visibility {
        page_id: PageId,
        entries: Vec<VisibilityEntry>,
    },
}

/// Runs feed sessions on a background tokio runtime.
///
/// Only the most recently opened page view is live; visibility reports for
/// any other page id are dropped.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(catalog: CatalogSettings, settings: FeedSettings) -> Result<Self, FetchError> {
        let client: Arc<dyn CatalogClient> = Arc::new(ReqwestCatalogClient::new(catalog)?);
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: Arc<dyn CatalogClient>, settings: FeedSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    feed_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let _guard = runtime.enter();
            let mut current: Option<(PageId, Arc<FeedSession>)> = None;
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&mut current, command, &client, settings, &event_tx);
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn open_page(&self, page_id: PageId, page: Page) {
        let _ = self.cmd_tx.send(EngineCommand::OpenPage { page_id, page });
    }

    pub fn report_visibility(&self, page_id: PageId, entries: Vec<VisibilityEntry>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Visibility { page_id, entries });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    current: &mut Option<(PageId, Arc<FeedSession>)>,
    command: EngineCommand,
    client: &Arc<dyn CatalogClient>,
    settings: FeedSettings,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::OpenPage { page_id, page } => {
            feed_info!("Opening page {} ({:?})", page_id, page);
            let sink = Arc::new(ChannelRenderSink::new(page_id, event_tx.clone()));
            let session = Arc::new(FeedSession::new(Arc::clone(client), sink, settings));
            *current = Some((page_id, Arc::clone(&session)));
            tokio::spawn(async move {
                if let Err(err) = session.start(&page).await {
                    feed_error!("Page {} failed to start: {}", page_id, err);
                }
            });
        }
        EngineCommand::Visibility { page_id, entries } => match current {
            Some((live_id, session)) if *live_id == page_id => {
                session.on_visibility(&entries);
            }
            _ => {}
        },
    }
}
