//! Live threat feed: one entry per record, cursor navigation, select.

use chrono::Local;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::super::theme;
use crate::core::threat::ThreatRecord;

/// Rows per entry: description line, meta line, spacer.
pub const ENTRY_HEIGHT: u16 = 3;

/// Result of feed input handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedInput {
    Consumed,
    /// Operator selected the entry with this id.
    Select(String),
}

// ── State ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FeedViewState {
    /// Highlighted entry (not the same as the selected record).
    cursor: usize,
}

impl FeedViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Keep the cursor inside a list that was just replaced.
    pub fn clamp_to(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn move_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn handle_input(&mut self, event: &Event, threats: &[ThreatRecord]) -> Option<FeedInput> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        else {
            return None;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.move_down(threats.len());
                Some(FeedInput::Consumed)
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.move_up();
                Some(FeedInput::Consumed)
            }
            (KeyModifiers::NONE, KeyCode::Home) => {
                self.cursor = 0;
                Some(FeedInput::Consumed)
            }
            (KeyModifiers::SHIFT, KeyCode::Char('G')) | (KeyModifiers::NONE, KeyCode::End) => {
                self.cursor = threats.len().saturating_sub(1);
                Some(FeedInput::Consumed)
            }
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char(' ')) => threats
                .get(self.cursor)
                .map(|t| FeedInput::Select(t.id.clone())),
            _ => None,
        }
    }

    /// Entry under a terminal row, given the feed's outer area.
    ///
    /// Spacer rows and rows outside the list map to `None`. Uses the same
    /// scroll computation as `render`, so it matches what is on screen.
    pub fn index_at(&self, area: Rect, row: u16, len: usize) -> Option<usize> {
        let inner = feed_block().inner(area);
        if row < inner.y || row >= inner.bottom() {
            return None;
        }
        let offset = row - inner.y;
        if offset % ENTRY_HEIGHT == ENTRY_HEIGHT - 1 {
            return None;
        }
        let first = first_visible(self.cursor, visible_entries(inner.height));
        let index = first + (offset / ENTRY_HEIGHT) as usize;
        (index < len).then_some(index)
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        threats: &[ThreatRecord],
        selected_id: Option<&str>,
    ) {
        let block = feed_block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if threats.is_empty() {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::raw(""),
                    Line::from(Span::styled("  No threats in the feed", theme::muted())),
                    Line::raw(""),
                    Line::from(Span::styled("  Press r to reload", theme::dim())),
                ]),
                inner,
            );
            return;
        }

        let visible = visible_entries(inner.height);
        let first = first_visible(self.cursor, visible);

        let mut lines: Vec<Line<'static>> = Vec::new();
        for (i, threat) in threats.iter().enumerate().skip(first).take(visible) {
            let is_cursor = i == self.cursor;
            let is_selected = selected_id == Some(threat.id.as_str());
            lines.extend(entry_lines(threat, is_cursor, is_selected));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn feed_block() -> ratatui::widgets::Block<'static> {
    theme::block_focused("Live Threat Feed").title(Line::from(Span::styled(
        format!("{} ", theme::ICON_ACTIVITY),
        Style::default().fg(theme::PRIMARY),
    )))
}

fn visible_entries(height: u16) -> usize {
    (height / ENTRY_HEIGHT).max(1) as usize
}

/// First entry shown so that `cursor` stays in a window of `visible` entries.
fn first_visible(cursor: usize, visible: usize) -> usize {
    (cursor + 1).saturating_sub(visible)
}

fn entry_lines(threat: &ThreatRecord, is_cursor: bool, is_selected: bool) -> [Line<'static>; 3] {
    let tier_color = theme::severity_color(threat.severity);
    let marker = match (is_cursor, is_selected) {
        (true, _) => "▸",
        (false, true) => "◆",
        (false, false) => " ",
    };

    let desc_style = if is_cursor || is_selected {
        Style::default()
            .fg(theme::TEXT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme::TEXT)
    };

    let time = threat
        .timestamp
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string();

    [
        Line::from(vec![
            Span::styled(format!("{marker} "), Style::default().fg(theme::PRIMARY)),
            Span::styled(
                format!("{} ", theme::glyph_symbol(threat.category.glyph())),
                Style::default().fg(tier_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(threat.description.clone(), desc_style),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(threat.source.clone(), theme::muted()),
            Span::styled(" • ", theme::dim()),
            Span::styled(time, theme::muted()),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", threat.severity.as_str().to_uppercase()),
                theme::severity_badge(threat.severity),
            ),
            Span::raw(" "),
            Span::styled(format!(" {} ", threat.model.label()), theme::secondary_badge()),
        ]),
        Line::raw(""),
    ]
}

// ── Tests ──────────────────────────────────────────────────────────────────
