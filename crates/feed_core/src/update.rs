use crate::{AppState, Effect, Msg, Page};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageRequested(page) => {
            let page_id = state.open_page(page.clone());
            vec![Effect::OpenPage { page_id, page }]
        }
        Msg::RestoreSelection(key) => {
            state.remember_selection(key);
            Vec::new()
        }
        // Engine events from an abandoned page view are dropped; the engine
        // does not cancel their fetches.
        Msg::CatalogLoaded { page_id, total } => {
            if state.is_current(page_id) {
                state.set_catalog_total(total);
            }
            Vec::new()
        }
        Msg::ItemRendered {
            page_id,
            key,
            media,
        } => {
            if state.is_current(page_id) {
                state.push_card(key, media);
            }
            Vec::new()
        }
        Msg::StatusChanged { page_id, status } => {
            if state.is_current(page_id) {
                state.set_status(status);
            }
            Vec::new()
        }
        Msg::BatchFinished { page_id, rendered } => {
            if state.is_current(page_id) {
                state.record_batch(rendered);
            }
            Vec::new()
        }
        Msg::SentinelVisibility(entries) => {
            if entries.is_empty() || state.page().is_none() {
                Vec::new()
            } else {
                vec![Effect::ReportVisibility {
                    page_id: state.page_id(),
                    entries,
                }]
            }
        }
        Msg::SelectionMoved(delta) => {
            state.move_selection(delta);
            Vec::new()
        }
        Msg::ItemActivated => match state.selected_key() {
            Some(key) => {
                state.remember_selection(key.clone());
                let mut effects = vec![Effect::PersistSelection { key: key.clone() }];
                // A detail view is already scoped to this key.
                if state.page() == Some(&Page::Index) {
                    let page = Page::Detail { key };
                    let page_id = state.open_page(page.clone());
                    effects.push(Effect::OpenPage { page_id, page });
                }
                effects
            }
            None => Vec::new(),
        },
        Msg::BackRequested => match state.page() {
            Some(Page::Detail { .. }) => {
                let page_id = state.open_page(Page::Index);
                vec![Effect::OpenPage {
                    page_id,
                    page: Page::Index,
                }]
            }
            _ => Vec::new(),
        },
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
