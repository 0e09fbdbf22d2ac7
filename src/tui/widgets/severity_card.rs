//! Overview card: one severity level, its count, and a caption.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::threat::Severity;
use crate::tui::theme;

/// Title, caption and icon for a card. `Safe` has no card of its own.
pub fn card_copy(severity: Severity) -> (&'static str, &'static str, &'static str) {
    match severity {
        Severity::Critical => ("Critical Threats", "Requires immediate attention", theme::ICON_ALERT),
        Severity::High => ("High Priority", "Elevated risk level", theme::ICON_TRENDING),
        Severity::Medium => ("Medium Alerts", "Monitor closely", theme::ICON_EYE),
        Severity::Low => ("Low Priority", "Routine monitoring", theme::ICON_ACTIVITY),
        Severity::Safe => ("Safe", "No action needed", theme::ICON_SHIELD),
    }
}

pub struct SeverityCard {
    severity: Severity,
    count: usize,
}

impl SeverityCard {
    pub fn new(severity: Severity, count: usize) -> Self {
        Self { severity, count }
    }
}

impl Widget for SeverityCard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, caption, icon) = card_copy(self.severity);
        let color = theme::severity_color(self.severity);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Line::from(vec![
                Span::styled(format!(" {title} "), Style::default().fg(theme::TEXT)),
                Span::styled(format!("{icon} "), Style::default().fg(color)),
            ]));

        let lines = vec![
            Line::from(Span::styled(
                format!(" {}", self.count),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(format!(" {caption}"), theme::muted())),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
