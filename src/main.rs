use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use threatwatch::config::AppConfig;
use threatwatch::core::logging;
use threatwatch::tui::app::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();

    // Logs go to a file; stdout belongs to the terminal UI
    let _log_guard = logging::init_tui(&config);
    log::info!("{} v{} starting", threatwatch::NAME, threatwatch::VERSION);
    log::info!("Feed source: {}", config.feed.describe());

    let mouse = config.tui.mouse_enabled;
    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms);

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(config);
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("event loop failed")?;
    log::info!("Shutting down");
    Ok(())
}
