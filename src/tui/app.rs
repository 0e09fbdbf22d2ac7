use std::io;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Notification, NotificationLevel};
use super::layout::DashboardLayout;
use super::theme;
use super::views::feed::{FeedInput, FeedViewState};
use super::views::performance::{PanelTab, PerformancePanelState};
use super::widgets::severity_card::SeverityCard;
use crate::config::AppConfig;
use crate::core::dashboard::{DashboardEvent, DashboardState};
use crate::core::feed;
use crate::core::report::{ReportError, ThreatReport};
use crate::core::threat::Severity;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Record list and selection.
    dashboard: DashboardState,
    /// Feed cursor.
    feed: FeedViewState,
    /// Performance panel tab.
    panel: PerformancePanelState,
    /// Whether a feed load is in flight.
    loading: bool,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Terminal area of the last rendered frame, for mouse hit-testing.
    last_area: Rect,
    config: AppConfig,
    /// Receiver for background events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender handed to background tasks.
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            dashboard: DashboardState::default(),
            feed: FeedViewState::new(),
            panel: PerformancePanelState::new(),
            loading: false,
            notifications: Vec::new(),
            show_help: false,
            last_area: Rect::default(),
            config,
            event_rx,
            event_tx,
        }
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        self.load_feed();

        while self.running {
            // Render
            let completed = terminal.draw(|frame| self.render(frame))?;
            self.last_area = completed.area;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Mouse
                if let Event::Mouse(mouse) = crossterm_event {
                    self.handle_mouse(mouse);
                    return;
                }

                // Priority 3: Feed
                match self
                    .feed
                    .handle_input(&crossterm_event, self.dashboard.threats())
                {
                    Some(FeedInput::Select(id)) => {
                        self.handle_action(Action::SelectThreat(id));
                        return;
                    }
                    Some(FeedInput::Consumed) => return,
                    None => {}
                }

                // Priority 4: Panel
                if self.panel.handle_input(&crossterm_event) {
                    return;
                }

                // Priority 5: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::FeedLoaded(loaded) => {
                self.loading = false;
                let count = loaded.records.len();
                if loaded.skipped > 0 {
                    self.push_notification(
                        format!("Skipped {} invalid threat records", loaded.skipped),
                        NotificationLevel::Warning,
                    );
                }
                self.update_dashboard(DashboardEvent::Replace(loaded.records));
                self.feed.clamp_to(count);
                log::info!("Feed loaded with {count} threats");
            }
            AppEvent::FeedFailed(error) => {
                self.loading = false;
                log::error!("Feed load failed: {error}");
                self.push_notification(error, NotificationLevel::Error);
            }
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.config.tui.mouse_enabled {
            return;
        }

        let (layout, _) = DashboardLayout::compute(self.last_area);
        let position = Position::new(mouse.column, mouse.row);
        let len = self.dashboard.threats().len();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if layout.feed.contains(position) => {
                if let Some(index) = self.feed.index_at(layout.feed, mouse.row, len) {
                    let id = self.dashboard.threats()[index].id.clone();
                    self.handle_action(Action::SelectThreat(id));
                }
            }
            MouseEventKind::Down(MouseButton::Left) if layout.panel.contains(position) => {
                if let Some(tab) = self.panel.tab_at(layout.panel, mouse.column, mouse.row) {
                    self.panel.select_tab(tab);
                }
            }
            MouseEventKind::ScrollDown if layout.feed.contains(position) => {
                self.feed.move_down(len);
            }
            MouseEventKind::ScrollUp if layout.feed.contains(position) => {
                self.feed.move_up();
            }
            _ => {}
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            // Ctrl+C → quit
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Char('r') => Some(Action::ReloadFeed),
                KeyCode::Char('g') => Some(Action::GenerateReport),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SelectThreat(id) => {
                log::debug!("Selected threat {id}");
                self.update_dashboard(DashboardEvent::Select(id));
            }
            Action::ReloadFeed => self.load_feed(),
            Action::TabNext => self.panel.next_tab(),
            Action::TabPrev => self.panel.prev_tab(),
            Action::GenerateReport => self.generate_report(),
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    fn update_dashboard(&mut self, event: DashboardEvent) {
        self.dashboard = std::mem::take(&mut self.dashboard).apply(event);
    }

    // ── Background work ─────────────────────────────────────────────────

    /// Spawn a feed load; the result arrives as `FeedLoaded`/`FeedFailed`.
    fn load_feed(&mut self) {
        if self.loading {
            return;
        }
        self.loading = true;

        let tx = self.event_tx.clone();
        let feed_config = self.config.feed.clone();

        tokio::spawn(async move {
            let event = match feed::load(&feed_config, Utc::now()).await {
                Ok(loaded) => AppEvent::FeedLoaded(loaded),
                Err(e) => AppEvent::FeedFailed(e.to_string()),
            };
            let _ = tx.send(event);
        });
    }

    fn generate_report(&mut self) {
        if self.panel.tab() != PanelTab::Analysis {
            self.panel.next_tab();
        }

        let report = match ThreatReport::for_selection(self.dashboard.selected(), Utc::now()) {
            Ok(report) => report,
            Err(ReportError::NoSelection) => {
                self.push_notification(
                    "Select a threat before generating a report".to_string(),
                    NotificationLevel::Info,
                );
                return;
            }
            Err(e) => {
                self.push_notification(e.to_string(), NotificationLevel::Error);
                return;
            }
        };

        let tx = self.event_tx.clone();
        let dir = self.config.reports_dir();

        tokio::spawn(async move {
            let notification = match report.write_to(&dir).await {
                Ok(path) => Notification::new(
                    format!("Report saved to {}", path.display()),
                    NotificationLevel::Success,
                ),
                Err(e) => {
                    log::error!("Report generation failed: {e}");
                    Notification::new(e.to_string(), NotificationLevel::Error)
                }
            };
            let _ = tx.send(AppEvent::Notification(notification));
        });
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notifications.push(Notification::new(message, level));

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let (layout, _) = DashboardLayout::compute(area);

        self.render_header(frame, layout.header);

        let tally = self.dashboard.tally();
        for (severity, card_area) in Severity::TALLIED.into_iter().zip(layout.cards) {
            frame.render_widget(SeverityCard::new(severity, tally.count(severity)), card_area);
        }

        self.feed.render(
            frame,
            layout.feed,
            self.dashboard.threats(),
            self.dashboard.selected().map(|t| t.id.as_str()),
        );
        self.panel
            .render(frame, layout.panel, &self.dashboard.analysis());

        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {} ", theme::ICON_SHIELD), theme::title()),
                Span::styled(
                    "Threat Detection Center",
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                "   AI-powered security monitoring with Random Forest and KNN models",
                theme::muted(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let feed_status = if self.loading {
            Span::styled("loading", Style::default().fg(theme::PRIMARY_LIGHT))
        } else {
            Span::styled(
                format!("{} threats", self.dashboard.threats().len()),
                theme::muted(),
            )
        };

        let status = Line::from(vec![
            Span::styled(" THREATWATCH ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled("Feed:", theme::dim()),
            Span::raw(" "),
            Span::styled(self.config.feed.describe(), theme::muted()),
            Span::raw(" "),
            feed_status,
            Span::raw(" │ "),
            Span::styled("j/k", theme::key_hint()),
            Span::raw(":move "),
            Span::styled("Enter", theme::key_hint()),
            Span::raw(":select "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":tab "),
            Span::styled("g", theme::key_hint()),
            Span::raw(":report "),
            Span::styled("r", theme::key_hint()),
            Span::raw(":reload "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = (self.notifications.len() as u16).min(area.height);
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1.min(area.height.saturating_sub(height));

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 70, area);

        let keybindings = [
            ("Global:", ""),
            ("q / Ctrl+C", "Quit"),
            ("?", "Toggle this help"),
            ("r", "Reload the threat feed"),
            ("", ""),
            ("Threat feed:", ""),
            ("j/k, ↑/↓", "Move cursor"),
            ("Home / End, G", "First / last entry"),
            ("Enter / Space", "Select threat for analysis"),
            ("Click", "Select threat or panel tab"),
            ("", ""),
            ("Model performance:", ""),
            ("Tab / Shift+Tab, ←/→", "Switch tab"),
            ("m / a", "ML Models / Analysis tab"),
            ("g", "Generate detailed report"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", theme::title())),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), theme::title())));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("{:<22}", key), theme::key_hint()),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", theme::key_hint()),
            Span::raw(" or "),
            Span::styled("Esc", theme::key_hint()),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme::border_focused());

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
