//! Model Performance panel: "ML Models" and "Analysis" tabs.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};

use super::super::theme;
use crate::core::dashboard::{AnalysisDetails, AnalysisPanel};
use crate::core::performance::{format_count, ModelAccuracy, MODEL_ACCURACY, SUMMARY};

// ── Tab ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PanelTab {
    #[default]
    Models,
    Analysis,
}

impl PanelTab {
    pub const ALL: [PanelTab; 2] = [PanelTab::Models, PanelTab::Analysis];

    pub fn label(self) -> &'static str {
        match self {
            Self::Models => "ML Models",
            Self::Analysis => "Analysis",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Models => Self::Analysis,
            Self::Analysis => Self::Models,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

// ── State ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct PerformancePanelState {
    tab: PanelTab,
}

impl PerformancePanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> PanelTab {
        self.tab
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
    }

    /// Direct tab jumps and arrow switching. Tab/BackTab are global.
    pub fn handle_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('m')) => {
                self.tab = PanelTab::Models;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('a')) => {
                self.tab = PanelTab::Analysis;
                true
            }
            (KeyModifiers::NONE, KeyCode::Left | KeyCode::Right) => {
                self.next_tab();
                true
            }
            _ => false,
        }
    }

    pub fn select_tab(&mut self, tab: PanelTab) {
        self.tab = tab;
    }

    /// Tab whose label is under `(column, row)`, given the panel's outer area.
    /// Separators and the strip's border map to `None`.
    pub fn tab_at(&self, area: Rect, column: u16, row: u16) -> Option<PanelTab> {
        let [strip, _] = regions(area);
        let labels = tab_strip_block().inner(strip);
        if row != labels.y || column < labels.x {
            return None;
        }

        let mut offset = column - labels.x;
        for tab in PanelTab::ALL {
            let width = tab_label(tab).chars().count() as u16;
            if offset < width {
                return Some(tab);
            }
            // Skip the label and its separator
            offset = offset.checked_sub(width + 1)?;
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, analysis: &AnalysisPanel) {
        let block = panel_block();
        frame.render_widget(block, area);

        let [strip, body] = regions(area);
        self.render_tabs(frame, strip);

        match self.tab {
            PanelTab::Models => render_models(frame, body),
            PanelTab::Analysis => render_analysis(frame, body, analysis),
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let spans: Vec<Span> = PanelTab::ALL
            .iter()
            .flat_map(|t| {
                let style = if *t == self.tab {
                    Style::default()
                        .fg(theme::PRIMARY)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme::TEXT_MUTED)
                };
                vec![Span::styled(tab_label(*t), style), Span::raw("│")]
            })
            .collect();

        let block = tab_strip_block();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}

// ── Regions ────────────────────────────────────────────────────────────────

fn panel_block() -> Block<'static> {
    theme::block_focused("Model Performance").title(Line::from(Span::styled(
        format!("{} ", theme::ICON_SERVER),
        Style::default().fg(theme::PRIMARY),
    )))
}

fn tab_strip_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_default())
}

/// Tab strip and tab body inside the panel's outer area.
fn regions(area: Rect) -> [Rect; 2] {
    let inner = panel_block().inner(area);
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(inner);
    [chunks[0], chunks[1]]
}

/// Padded label as drawn in the strip.
fn tab_label(tab: PanelTab) -> String {
    format!(" {} ", tab.label())
}

// ── Tab bodies ─────────────────────────────────────────────────────────────

fn render_models(frame: &mut Frame, area: Rect) {
    let mut constraints: Vec<Constraint> = MODEL_ACCURACY
        .iter()
        .map(|_| Constraint::Length(2))
        .collect();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));
    let rows = Layout::vertical(constraints).split(area);

    for (i, model) in MODEL_ACCURACY.iter().enumerate() {
        render_accuracy_gauge(frame, rows[i], model);
    }

    let stats = rows[MODEL_ACCURACY.len() + 1];
    let lines = vec![
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format_count(SUMMARY.threats_detected),
                Style::default()
                    .fg(theme::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Threats Detected", theme::muted()),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{}%", SUMMARY.uptime_pct),
                Style::default()
                    .fg(theme::SAFE)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Uptime", theme::muted()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), stats);
}

fn render_accuracy_gauge(frame: &mut Frame, area: Rect, model: &ModelAccuracy) {
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    let header = Line::from(vec![
        Span::raw("  "),
        Span::styled(
            model.model.full_name(),
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}% Accuracy", model.accuracy), theme::muted()),
    ]);
    frame.render_widget(Paragraph::new(header), rows[0]);

    let gauge = LineGauge::default()
        .ratio(model.ratio())
        .label("  ")
        .filled_style(Style::default().fg(theme::PRIMARY))
        .unfilled_style(Style::default().fg(theme::TEXT_DIM));
    frame.render_widget(gauge, rows[1]);
}

fn render_analysis(frame: &mut Frame, area: Rect, analysis: &AnalysisPanel) {
    let lines = match analysis {
        AnalysisPanel::Prompt => vec![
            Line::raw(""),
            Line::from(Span::styled(
                format!("  {}", theme::ICON_EYE),
                theme::dim(),
            )),
            Line::from(Span::styled(
                format!("  {}", AnalysisPanel::PROMPT),
                theme::muted(),
            )),
        ],
        AnalysisPanel::Details(details) => analysis_lines(details),
    };

    frame.render_widget(Paragraph::new(lines), area);
}

fn analysis_lines(details: &AnalysisDetails) -> Vec<Line<'static>> {
    let field = |label: &str, value: Span<'static>| {
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{label}: "),
                Style::default()
                    .fg(theme::TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
            value,
        ])
    };
    let plain = |value: &str| Span::styled(value.to_string(), Style::default().fg(theme::TEXT));

    vec![
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{} ", theme::ICON_LOCK), theme::title()),
            Span::styled("Threat Analysis", theme::title()),
        ]),
        Line::raw(""),
        field("Type", plain(&details.kind)),
        field(
            "Severity",
            Span::styled(
                details.severity.as_str(),
                Style::default().fg(theme::severity_color(details.severity)),
            ),
        ),
        field("Model", plain(&details.model)),
        field("Confidence", plain(&details.confidence)),
        field("Source", plain(&details.source)),
        Line::raw(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[g]", theme::key_hint()),
            Span::styled(" Generate Detailed Report", theme::muted()),
        ]),
    ]
}

// ── Tests ──────────────────────────────────────────────────────────────────
