use feed_core::{AppViewModel, CardView, ObserverStatus, PageView};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::constants::*;
use super::layout;

/// What the feed list looked like after a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedViewport {
    pub offset: usize,
    pub rows: u16,
    pub sentinel_visible: bool,
}

pub fn draw(frame: &mut Frame<'_>, view: &AppViewModel, offset: usize) -> FeedViewport {
    let full = frame.size();
    frame.render_widget(Block::default().style(Style::default().bg(COLOR_BG)), full);

    let areas = layout::split(full);
    draw_header(frame, view, areas.header);
    let viewport = draw_feed(frame, view, areas.feed, offset);
    draw_status(frame, view, areas.status);
    viewport
}

fn draw_header(frame: &mut Frame<'_>, view: &AppViewModel, area: Rect) {
    let title = match &view.page {
        PageView::Blank => String::new(),
        PageView::Index => TITLE_INDEX.to_string(),
        PageView::Detail { key } => format!("{TITLE_INDEX} / {key}"),
    };
    let mut spans = vec![Span::styled(
        title,
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(total) = view.catalog_total {
        spans.push(Span::styled(
            format!("  {} of {total}", view.cards.len()),
            Style::default().fg(COLOR_TEXT_SECONDARY),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(COLOR_PANEL_BG));
    frame.render_widget(header, area);
}

fn draw_feed(frame: &mut Frame<'_>, view: &AppViewModel, area: Rect, offset: usize) -> FeedViewport {
    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(COLOR_BORDER));
    let rows = block.inner(area).height;

    let heights = layout::item_heights(view.cards.len());
    let offset = layout::scroll_offset(&heights, offset, view.selected, rows);

    let mut items: Vec<ListItem> = view.cards.iter().map(card_item).collect();
    items.push(sentinel_item(view));

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(COLOR_SELECTED_BG)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default()
        .with_offset(offset)
        .with_selected(view.selected);
    frame.render_stateful_widget(list, area, &mut state);

    let offset = state.offset();
    FeedViewport {
        offset,
        rows,
        sentinel_visible: layout::sentinel_visible(&heights, offset, rows),
    }
}

fn card_item(card: &CardView) -> ListItem<'static> {
    let media = if card.media.is_placeholder() {
        Span::styled(NO_MEDIA, Style::default().fg(COLOR_TEXT_SECONDARY))
    } else {
        Span::styled(
            card.media.as_str().to_string(),
            Style::default().fg(COLOR_ACCENT),
        )
    };
    ListItem::new(vec![
        Line::from(Span::styled(
            card.key.to_string(),
            Style::default().fg(COLOR_TEXT_PRIMARY),
        )),
        Line::from(vec![Span::raw("  "), media]),
        Line::default(),
    ])
}

fn sentinel_item(view: &AppViewModel) -> ListItem<'static> {
    let text = if view.status.is_on() {
        SENTINEL_LOADING
    } else if view.loading {
        SENTINEL_WAITING
    } else {
        SENTINEL_END
    };
    ListItem::new(Line::from(Span::styled(
        text,
        Style::default()
            .fg(COLOR_TEXT_SECONDARY)
            .add_modifier(Modifier::ITALIC),
    )))
}

fn draw_status(frame: &mut Frame<'_>, view: &AppViewModel, area: Rect) {
    let indicator = match view.status {
        ObserverStatus::Observing => COLOR_OBSERVING,
        ObserverStatus::Off => COLOR_OFF,
    };
    let mut spans = vec![
        Span::styled(
            format!(" {} ", view.status.label()),
            Style::default()
                .fg(COLOR_BG)
                .bg(indicator)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  cards {}  batches {}",
            view.cards.len(),
            view.batches_completed
        )),
    ];
    if let Some(rendered) = view.last_batch_rendered {
        spans.push(Span::raw(format!(" (+{rendered})")));
    }
    if let Some(key) = &view.last_selection {
        spans.push(Span::raw(format!("  last {key}")));
    }
    let hints = match view.page {
        PageView::Detail { .. } => HINTS_DETAIL,
        _ => HINTS_INDEX,
    };
    spans.push(Span::styled(
        format!("  {hints}"),
        Style::default().fg(COLOR_TEXT_SECONDARY),
    ));

    let status = Paragraph::new(Line::from(spans))
        .style(
            Style::default()
                .fg(COLOR_TEXT_PRIMARY)
                .bg(COLOR_PANEL_BG),
        )
        .alignment(Alignment::Left);
    frame.render_widget(status, area);
}
