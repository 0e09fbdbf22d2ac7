//! Test Fixtures
//!
//! Builders for threat records and proptest strategies that generate them.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use crate::core::threat::{DetectionModel, Severity, ThreatCategory, ThreatRecord};

// =============================================================================
// Record Fixtures
// =============================================================================

/// Fixed reference time so generated timestamps are reproducible.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Create a record with the given id and severity; other fields are filler.
pub fn create_test_record(id: &str, severity: Severity) -> ThreatRecord {
    ThreatRecord {
        id: id.to_string(),
        category: ThreatCategory::Ids,
        severity,
        description: format!("Test detection {id}"),
        timestamp: fixed_now(),
        model: DetectionModel::Knn,
        confidence: 50.0,
        source: "10.0.0.1".to_string(),
    }
}

// =============================================================================
// Strategies
// =============================================================================

pub fn arb_severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

pub fn arb_category() -> impl Strategy<Value = ThreatCategory> {
    prop_oneof![
        Just(ThreatCategory::Malware),
        Just(ThreatCategory::Network),
        Just(ThreatCategory::Ddos),
        Just(ThreatCategory::Ids),
        Just(ThreatCategory::Other),
    ]
}

pub fn arb_model() -> impl Strategy<Value = DetectionModel> {
    prop::sample::select(DetectionModel::ALL.to_vec())
}

/// A record with every field drawn at random except the id.
pub fn arb_record(id: String) -> impl Strategy<Value = ThreatRecord> {
    (
        arb_category(),
        arb_severity(),
        "[a-zA-Z0-9 .]{1,60}",
        0i64..86_400,
        arb_model(),
        0.0f64..=100.0,
        "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
    )
        .prop_map(
            move |(category, severity, description, age, model, confidence, source)| {
                ThreatRecord {
                    id: id.clone(),
                    category,
                    severity,
                    description,
                    timestamp: fixed_now() - Duration::seconds(age),
                    model,
                    confidence,
                    source,
                }
            },
        )
}

/// Up to `max` records with distinct ids `"0"`, `"1"`, ...
pub fn arb_records(max: usize) -> impl Strategy<Value = Vec<ThreatRecord>> {
    (0..=max).prop_flat_map(|len| {
        (0..len)
            .map(|i| arb_record(i.to_string()))
            .collect::<Vec<_>>()
    })
}
