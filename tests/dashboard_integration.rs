//! Integration tests for the threat dashboard.
//!
//! These exercise the public API end to end: a feed file on disk is loaded,
//! folded into dashboard state, selected, and exported as a report.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test dashboard_integration -- --nocapture
//! ```

use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use rstest::rstest;
use tempfile::TempDir;

use threatwatch::config::{FeedConfig, FeedSourceKind};
use threatwatch::core::dashboard::{AnalysisPanel, DashboardEvent, DashboardState};
use threatwatch::core::feed::{self, FeedError};
use threatwatch::core::report::ThreatReport;
use threatwatch::core::threat::{DetectionModel, Glyph, Severity};

const FEED_JSON: &str = r#"[
  {"id": "a1", "type": "malware", "severity": "critical",
   "description": "Ransomware beacon", "timestamp": "2024-05-01T10:00:00Z",
   "model": "Random Forest", "confidence": 97.5, "source": "172.16.0.4"},
  {"id": "a2", "type": "phishing", "severity": "urgent",
   "description": "Odd login page", "timestamp": "2024-05-01T10:01:00Z",
   "model": "KNN", "confidence": 41.0, "source": "mail-gw"},
  {"id": "a3", "type": "ddos", "severity": "high",
   "description": "SYN flood", "model": "KNN", "confidence": 140.0,
   "source": "edge-1"},
  {"id": "a1", "type": "ids", "severity": "low",
   "description": "Duplicate id", "model": "KNN", "confidence": 10.0,
   "source": "ids-2"},
  {"type": "network", "severity": "medium",
   "description": "Port scan", "model": "Random Forest", "confidence": 66.6,
   "source": "10.1.1.1"}
]"#;

fn write_feed(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("feed.json");
    std::fs::write(&path, contents).expect("Failed to write feed file");
    (dir, path)
}

fn file_config(path: PathBuf) -> FeedConfig {
    FeedConfig {
        source: FeedSourceKind::File,
        path: Some(path),
    }
}

#[tokio::test]
async fn test_file_feed_validation_and_tally() {
    let (_dir, path) = write_feed(FEED_JSON);
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let loaded = feed::load(&file_config(path), now).await.unwrap();

    // Out-of-range confidence and duplicate id are dropped
    assert_eq!(loaded.skipped, 2);
    assert_eq!(loaded.records.len(), 3);

    // Unknown labels degrade instead of failing the whole feed
    let odd = &loaded.records[1];
    assert_eq!(odd.severity, Severity::Safe);
    assert_eq!(odd.category.glyph(), Glyph::Activity);

    // Missing id and timestamp are filled in
    let scan = &loaded.records[2];
    assert!(!scan.id.is_empty());
    assert_eq!(scan.timestamp, now);

    let state = DashboardState::new(loaded.records);
    let tally = state.tally();
    assert_eq!(tally.critical, 1);
    assert_eq!(tally.medium, 1);
    assert_eq!(tally.high, 0);
    assert_eq!(tally.total(), 2);
}

#[tokio::test]
async fn test_select_then_export_report() {
    let (dir, path) = write_feed(FEED_JSON);
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let loaded = feed::load(&file_config(path), now).await.unwrap();

    let state = DashboardState::new(loaded.records).apply(DashboardEvent::Select("a1".into()));
    let AnalysisPanel::Details(details) = state.analysis() else {
        panic!("expected analysis details after selection");
    };
    assert_eq!(details.kind, "MALWARE");
    assert_eq!(details.model, DetectionModel::RandomForest.label());
    assert_eq!(details.confidence, "97.5%");

    let report = ThreatReport::for_selection(state.selected(), now).unwrap();
    let written = report.write_to(&dir.path().join("reports")).await.unwrap();

    let contents = std::fs::read_to_string(&written).unwrap();
    assert!(contents.contains("Ransomware beacon"));
    assert!(contents.contains("| Source | 172.16.0.4 |"));
    assert!(written
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("threat-a1-")));
}

#[tokio::test]
async fn test_reload_keeps_selection_snapshot() {
    let now = Utc::now();
    let mock = feed::load(&FeedConfig::default(), now).await.unwrap();
    let state = DashboardState::new(mock.records).apply(DashboardEvent::Select("4".into()));

    let (_dir, path) = write_feed(FEED_JSON);
    let reloaded = feed::load(&file_config(path), now).await.unwrap();
    let state = state.apply(DashboardEvent::Replace(reloaded.records));

    assert_eq!(state.threats().len(), 3);
    let selected = state.selected().unwrap();
    assert_eq!(selected.id, "4");
    assert_eq!(selected.source, "auth_server");
}

#[rstest]
#[case::missing_path(None)]
#[case::absent_file(Some(PathBuf::from("/nonexistent/threatwatch/feed.json")))]
#[tokio::test]
async fn test_file_feed_errors(#[case] path: Option<PathBuf>) {
    let config = FeedConfig {
        source: FeedSourceKind::File,
        path,
    };
    let err = feed::load(&config, Utc::now()).await.unwrap_err();
    assert!(matches!(err, FeedError::MissingPath | FeedError::Io { .. }));
}

#[rstest]
#[case::not_json("threats: none")]
#[case::not_an_array(r#"{"id": "x"}"#)]
#[case::bad_timestamp(
    r#"[{"type": "ids", "severity": "low", "description": "d", "timestamp": "yesterday",
         "model": "KNN", "confidence": 1.0, "source": "s"}]"#
)]
#[tokio::test]
async fn test_malformed_feed_is_parse_error(#[case] contents: &str) {
    let (_dir, path) = write_feed(contents);
    let err = feed::load(&file_config(path), Utc::now()).await.unwrap_err();
    assert!(matches!(err, FeedError::Parse { .. }), "{err}");
}
