//! Root layout: header, overview cards, feed + performance panel, status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Header: title line, subtitle line, spacer.
pub const HEADER_HEIGHT: u16 = 3;
/// Height of one overview card.
pub const CARD_HEIGHT: u16 = 5;
/// At or above this width the cards sit in one row and the feed and panel
/// sit side by side; below it the cards form a 2x2 grid and the panels stack.
pub const WIDE_THRESHOLD: u16 = 100;

/// Computed layout regions for a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    /// Critical, high, medium, low, in that order.
    pub cards: [Rect; 4],
    pub feed: Rect,
    pub panel: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

/// Arrangement chosen from the terminal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Wide,
    Narrow,
}

impl DashboardLayout {
    pub fn compute(area: Rect) -> (Self, LayoutMode) {
        let mode = if area.width >= WIDE_THRESHOLD {
            LayoutMode::Wide
        } else {
            LayoutMode::Narrow
        };

        let cards_height = match mode {
            LayoutMode::Wide => CARD_HEIGHT,
            LayoutMode::Narrow => CARD_HEIGHT * 2,
        };

        let rows = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(cards_height),
            Constraint::Min(1),    // Feed + panel
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let (header, cards_area, main, status) = (rows[0], rows[1], rows[2], rows[3]);

        let cards = match mode {
            LayoutMode::Wide => {
                let cols = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(cards_area);
                [cols[0], cols[1], cols[2], cols[3]]
            }
            LayoutMode::Narrow => {
                let card_rows =
                    Layout::vertical([Constraint::Ratio(1, 2); 2]).split(cards_area);
                let top = Layout::horizontal([Constraint::Ratio(1, 2); 2]).split(card_rows[0]);
                let bottom =
                    Layout::horizontal([Constraint::Ratio(1, 2); 2]).split(card_rows[1]);
                [top[0], top[1], bottom[0], bottom[1]]
            }
        };

        let halves = match mode {
            LayoutMode::Wide => Layout::horizontal([Constraint::Ratio(1, 2); 2]).split(main),
            LayoutMode::Narrow => Layout::vertical([Constraint::Ratio(1, 2); 2]).split(main),
        };

        (
            DashboardLayout {
                header,
                cards,
                feed: halves[0],
                panel: halves[1],
                status,
            },
            mode,
        )
    }
}
