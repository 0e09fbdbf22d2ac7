//! Static model performance figures for the "ML Models" tab.

use super::threat::DetectionModel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelAccuracy {
    pub model: DetectionModel,
    /// Percentage
    pub accuracy: f64,
}

impl ModelAccuracy {
    /// Accuracy as a 0.0..=1.0 ratio for gauges.
    pub fn ratio(&self) -> f64 {
        (self.accuracy / 100.0).clamp(0.0, 1.0)
    }
}

pub const MODEL_ACCURACY: [ModelAccuracy; 2] = [
    ModelAccuracy {
        model: DetectionModel::RandomForest,
        accuracy: 92.4,
    },
    ModelAccuracy {
        model: DetectionModel::Knn,
        accuracy: 87.6,
    },
];

/// Headline figures below the accuracy gauges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionSummary {
    pub threats_detected: u64,
    pub uptime_pct: f64,
}

pub const SUMMARY: DetectionSummary = DetectionSummary {
    threats_detected: 1247,
    uptime_pct: 99.2,
};

/// Thousands-separated count, e.g. `1,247`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
