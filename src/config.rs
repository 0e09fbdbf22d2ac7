use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub feed: FeedConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support (click to select a feed entry or a tab).
    pub mouse_enabled: bool,
}

/// Where threat records come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSourceKind {
    /// The four built-in mock detections.
    #[default]
    Mock,
    /// A JSON array of records at `feed.path`.
    File,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub source: FeedSourceKind,
    pub path: Option<PathBuf>,
}

impl FeedConfig {
    /// Short description for the status bar.
    pub fn describe(&self) -> String {
        match (self.source, &self.path) {
            (FeedSourceKind::Mock, _) => "mock".to_string(),
            (FeedSourceKind::File, Some(path)) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            (FeedSourceKind::File, None) => "file (unset)".to_string(),
        }
    }
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/threatwatch/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::parse(&contents, &config_path.display().to_string()),
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    fn parse(contents: &str, origin: &str) -> Self {
        match toml::from_str(contents) {
            Ok(config) => {
                log::info!("Loaded config from {origin}");
                config
            }
            Err(e) => {
                log::warn!("Failed to parse config at {origin}: {e}; using defaults");
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("threatwatch"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir().join("reports")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("threatwatch").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
