use crate::core::feed::LoadedFeed;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Feed load finished.
    FeedLoaded(LoadedFeed),
    /// Feed load failed; the previous list stays on screen.
    FeedFailed(String),
    /// Notification to display to the user.
    Notification(Notification),
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Feed
    SelectThreat(String),
    ReloadFeed,

    // Performance panel
    TabNext,
    TabPrev,
    GenerateReport,

    // Modals
    ShowHelp,
    CloseHelp,

    // Application
    Quit,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            level,
            ttl_ticks: 100,
        }
    }
}
