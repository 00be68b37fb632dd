use std::sync::Once;

use feed_core::{
    update, AppState, CatalogKey, Effect, MediaRef, Msg, ObserverStatus, Page, PageView,
    VisibilityEntry,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feed_logging::initialize_for_tests);
}

fn open_index() -> AppState {
    let (state, effects) = update(AppState::new(), Msg::PageRequested(Page::Index));
    assert_eq!(
        effects,
        vec![Effect::OpenPage {
            page_id: 1,
            page: Page::Index,
        }]
    );
    state
}

fn render(state: AppState, page_id: u64, key: &str) -> AppState {
    let (state, _) = update(
        state,
        Msg::ItemRendered {
            page_id,
            key: CatalogKey::new(key),
            media: MediaRef::new(format!("https://img.example/{key}.jpg")),
        },
    );
    state
}

fn card_keys(state: &AppState) -> Vec<String> {
    state
        .view()
        .cards
        .iter()
        .map(|card| card.key.to_string())
        .collect()
}

#[test]
fn rendered_items_append_in_arrival_order() {
    init_logging();
    let state = open_index();
    let state = render(state, 1, "akita");
    let mut state = render(state, 1, "beagle");

    let view = state.view();
    assert_eq!(view.page, PageView::Index);
    assert_eq!(card_keys(&state), vec!["akita", "beagle"]);
    assert_eq!(view.selected, Some(0));
    assert!(view.loading);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn events_from_abandoned_page_views_are_dropped() {
    init_logging();
    let state = open_index();
    let (state, _) = update(state, Msg::PageRequested(Page::Index));
    assert_eq!(state.page_id(), 2);

    let state = render(state, 1, "stale");
    let (state, _) = update(
        state,
        Msg::StatusChanged {
            page_id: 1,
            status: ObserverStatus::Observing,
        },
    );
    let (state, _) = update(state, Msg::CatalogLoaded { page_id: 1, total: 99 });

    let view = state.view();
    assert!(view.cards.is_empty());
    assert_eq!(view.status, ObserverStatus::Off);
    assert_eq!(view.catalog_total, None);
}

#[test]
fn status_and_batches_are_tracked_for_current_page() {
    init_logging();
    let state = open_index();
    let (state, _) = update(state, Msg::CatalogLoaded { page_id: 1, total: 7 });
    let (state, _) = update(
        state,
        Msg::StatusChanged {
            page_id: 1,
            status: ObserverStatus::Observing,
        },
    );
    let (state, _) = update(
        state,
        Msg::BatchFinished {
            page_id: 1,
            rendered: 5,
        },
    );

    let view = state.view();
    assert_eq!(view.catalog_total, Some(7));
    assert_eq!(view.status, ObserverStatus::Observing);
    assert_eq!(view.batches_completed, 1);
    assert_eq!(view.last_batch_rendered, Some(5));
    assert!(!view.loading);

    let (state, _) = update(
        state,
        Msg::BatchFinished {
            page_id: 1,
            rendered: 2,
        },
    );
    let view = state.view();
    assert_eq!(view.batches_completed, 2);
    assert_eq!(view.last_batch_rendered, Some(2));

    // A new page view starts counting from scratch.
    let (state, _) = update(state, Msg::PageRequested(Page::Index));
    assert_eq!(state.view().last_batch_rendered, None);
}

#[test]
fn sentinel_visibility_is_forwarded_to_current_page() {
    init_logging();
    let state = open_index();
    let (state, effects) = update(
        state,
        Msg::SentinelVisibility(vec![VisibilityEntry::visible()]),
    );
    assert_eq!(
        effects,
        vec![Effect::ReportVisibility {
            page_id: 1,
            entries: vec![VisibilityEntry::visible()],
        }]
    );

    let (_, effects) = update(state, Msg::SentinelVisibility(Vec::new()));
    assert!(effects.is_empty());
}

#[test]
fn sentinel_visibility_before_any_page_is_ignored() {
    init_logging();
    let (_, effects) = update(
        AppState::new(),
        Msg::SentinelVisibility(vec![VisibilityEntry::visible()]),
    );
    assert!(effects.is_empty());
}

#[test]
fn selection_is_clamped_to_rendered_cards() {
    init_logging();
    let state = open_index();
    let (state, _) = update(state, Msg::SelectionMoved(3));
    assert_eq!(state.view().selected, None);

    let state = render(render(render(state, 1, "a"), 1, "b"), 1, "c");
    let (state, _) = update(state, Msg::SelectionMoved(10));
    assert_eq!(state.view().selected, Some(2));
    let (state, _) = update(state, Msg::SelectionMoved(-1));
    assert_eq!(state.view().selected, Some(1));
    let (state, _) = update(state, Msg::SelectionMoved(-10));
    assert_eq!(state.view().selected, Some(0));
}

#[test]
fn activation_persists_and_opens_detail_view() {
    init_logging();
    let state = render(render(open_index(), 1, "akita"), 1, "beagle");
    let (state, _) = update(state, Msg::SelectionMoved(1));

    let (state, effects) = update(state, Msg::ItemActivated);
    let key = CatalogKey::new("beagle");
    assert_eq!(
        effects,
        vec![
            Effect::PersistSelection { key: key.clone() },
            Effect::OpenPage {
                page_id: 2,
                page: Page::Detail { key: key.clone() },
            },
        ]
    );
    let view = state.view();
    assert_eq!(view.page, PageView::Detail { key: key.clone() });
    assert_eq!(view.last_selection, Some(key));
    assert!(view.cards.is_empty());
}

#[test]
fn activation_in_detail_view_only_persists() {
    init_logging();
    let key = CatalogKey::new("hound");
    let (state, _) = update(
        AppState::new(),
        Msg::PageRequested(Page::Detail { key: key.clone() }),
    );
    let state = render(state, 1, "hound");

    let (state, effects) = update(state, Msg::ItemActivated);
    assert_eq!(effects, vec![Effect::PersistSelection { key: key.clone() }]);
    assert_eq!(state.page_id(), 1);
}

#[test]
fn activation_without_cards_does_nothing() {
    init_logging();
    let (_, effects) = update(open_index(), Msg::ItemActivated);
    assert!(effects.is_empty());
}

#[test]
fn back_returns_from_detail_to_index() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::PageRequested(Page::Detail {
            key: CatalogKey::new("pug"),
        }),
    );
    let (state, effects) = update(state, Msg::BackRequested);
    assert_eq!(
        effects,
        vec![Effect::OpenPage {
            page_id: 2,
            page: Page::Index,
        }]
    );

    let (_, effects) = update(state, Msg::BackRequested);
    assert!(effects.is_empty());
}

#[test]
fn restored_selection_is_shown_without_effects() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::RestoreSelection(CatalogKey::new("corgi")),
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().last_selection, Some(CatalogKey::new("corgi")));
}
