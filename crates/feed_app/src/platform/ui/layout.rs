use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows per card: caption, media line, spacer.
pub const CARD_HEIGHT: u16 = 3;
pub const SENTINEL_HEIGHT: u16 = 1;

pub struct Areas {
    pub header: Rect,
    pub feed: Rect,
    pub status: Rect,
}

pub fn split(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    Areas {
        header: chunks[0],
        feed: chunks[1],
        status: chunks[2],
    }
}

/// Heights of every list row; the sentinel is always last.
pub fn item_heights(cards: usize) -> Vec<u16> {
    let mut heights = vec![CARD_HEIGHT; cards];
    heights.push(SENTINEL_HEIGHT);
    heights
}

/// First row to draw so the selected card and the row after it fit in `rows`.
///
/// Keeping the following row on screen means scrolling to the last card also
/// brings the sentinel into view.
pub fn scroll_offset(heights: &[u16], current: usize, selected: Option<usize>, rows: u16) -> usize {
    let Some(last) = heights.len().checked_sub(1) else {
        return 0;
    };
    let Some(selected) = selected.map(|index| index.min(last)) else {
        return current.min(last);
    };
    let mut offset = current.min(selected);
    let target = (selected + 1).min(last);
    while offset < selected && span(heights, offset, target) > u32::from(rows) {
        offset += 1;
    }
    offset
}

/// Whether any part of the sentinel row is drawn when the list starts at `offset`.
pub fn sentinel_visible(heights: &[u16], offset: usize, rows: u16) -> bool {
    let Some(sentinel) = heights.len().checked_sub(1) else {
        return false;
    };
    if offset > sentinel {
        return false;
    }
    let above: u32 = heights[offset..sentinel].iter().map(|h| u32::from(*h)).sum();
    above < u32::from(rows)
}

fn span(heights: &[u16], from: usize, to: usize) -> u32 {
    heights[from..=to].iter().map(|h| u32::from(*h)).sum()
}
