//! Threat feed loading.
//!
//! The dashboard starts from a fixed set of mock detections. A JSON file can
//! be configured instead; records read from it are validated before they
//! reach the view (confidence in `[0, 100]`, unique ids).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use thiserror::Error;

use super::threat::{DetectionModel, Severity, ThreatCategory, ThreatRecord};
use crate::config::{FeedConfig, FeedSourceKind};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed source is 'file' but no path is configured")]
    MissingPath,
    #[error("failed to read feed {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse feed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of a feed load: accepted records plus how many were rejected.
#[derive(Debug, Clone, Default)]
pub struct LoadedFeed {
    pub records: Vec<ThreatRecord>,
    pub skipped: usize,
}

// ============================================================================
// Mock data
// ============================================================================

/// The four fixed detections shown when no feed is configured.
///
/// Timestamps are `now` and 5, 10 and 15 minutes before it, in that order.
pub fn mock_threats(now: DateTime<Utc>) -> Vec<ThreatRecord> {
    vec![
        ThreatRecord {
            id: "1".to_string(),
            category: ThreatCategory::Malware,
            severity: Severity::Critical,
            description: "Trojan.Win32.Agent detected in system memory".to_string(),
            timestamp: now,
            model: DetectionModel::RandomForest,
            confidence: 94.2,
            source: "192.168.1.45".to_string(),
        },
        ThreatRecord {
            id: "2".to_string(),
            category: ThreatCategory::Ddos,
            severity: Severity::High,
            description: "Volumetric attack detected - 50k requests/min".to_string(),
            timestamp: now - Duration::minutes(5),
            model: DetectionModel::Knn,
            confidence: 87.6,
            source: "Multiple IPs".to_string(),
        },
        ThreatRecord {
            id: "3".to_string(),
            category: ThreatCategory::Network,
            severity: Severity::Medium,
            description: "Suspicious port scanning activity".to_string(),
            timestamp: now - Duration::minutes(10),
            model: DetectionModel::RandomForest,
            confidence: 76.3,
            source: "10.0.0.23".to_string(),
        },
        ThreatRecord {
            id: "4".to_string(),
            category: ThreatCategory::Ids,
            severity: Severity::Low,
            description: "Unusual user authentication pattern".to_string(),
            timestamp: now - Duration::minutes(15),
            model: DetectionModel::Knn,
            confidence: 62.1,
            source: "auth_server".to_string(),
        },
    ]
}

// ============================================================================
// File feed
// ============================================================================

/// Record shape accepted from a feed file. `id` and `timestamp` are optional.
#[derive(Debug, Deserialize)]
struct FeedEntry {
    id: Option<String>,
    #[serde(rename = "type")]
    category: ThreatCategory,
    severity: Severity,
    description: String,
    timestamp: Option<DateTime<Utc>>,
    /// Parsed per record so one unknown label does not reject the file.
    model: String,
    confidence: f64,
    source: String,
}

/// Parse and validate a JSON array of records.
///
/// Entries with an unknown model, a non-finite or out-of-range confidence,
/// or a duplicate id are skipped and counted in `LoadedFeed::skipped`.
pub fn parse_feed(json: &str, now: DateTime<Utc>) -> Result<LoadedFeed, serde_json::Error> {
    let entries: Vec<FeedEntry> = serde_json::from_str(json)?;
    let mut seen = HashSet::new();
    let mut loaded = LoadedFeed::default();

    for entry in entries {
        let id = entry
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let model = match entry.model.parse::<DetectionModel>() {
            Ok(model) => model,
            Err(e) => {
                log::warn!("Skipping threat {id}: {e}");
                loaded.skipped += 1;
                continue;
            }
        };

        if !entry.confidence.is_finite() || !(0.0..=100.0).contains(&entry.confidence) {
            log::warn!(
                "Skipping threat {id}: confidence {} outside [0, 100]",
                entry.confidence
            );
            loaded.skipped += 1;
            continue;
        }

        if !seen.insert(id.clone()) {
            log::warn!("Skipping threat {id}: duplicate id");
            loaded.skipped += 1;
            continue;
        }

        loaded.records.push(ThreatRecord {
            id,
            category: entry.category,
            severity: entry.severity,
            description: entry.description,
            timestamp: entry.timestamp.unwrap_or(now),
            model,
            confidence: entry.confidence,
            source: entry.source,
        });
    }

    Ok(loaded)
}

/// Read and validate a feed file.
pub async fn load_file(path: &Path, now: DateTime<Utc>) -> Result<LoadedFeed, FeedError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    parse_feed(&contents, now).map_err(|source| FeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load records from whichever source the config selects.
pub async fn load(config: &FeedConfig, now: DateTime<Utc>) -> Result<LoadedFeed, FeedError> {
    match config.source {
        FeedSourceKind::Mock => Ok(LoadedFeed {
            records: mock_threats(now),
            skipped: 0,
        }),
        FeedSourceKind::File => {
            let path = config.path.as_deref().ok_or(FeedError::MissingPath)?;
            let loaded = load_file(path, now).await?;
            log::info!(
                "Loaded {} threats from {} ({} skipped)",
                loaded.records.len(),
                path.display(),
                loaded.skipped
            );
            Ok(loaded)
        }
    }
}
