//! Threat Record Module
//!
//! The single entity the dashboard displays, plus the severity and
//! category vocabularies and their presentation mappings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Returned by the strict `FromStr` parsers below.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThreatParseError {
    #[error("unknown severity: {0}")]
    Severity(String),
    #[error("unknown threat category: {0}")]
    Category(String),
    #[error("unknown detection model: {0}")]
    Model(String),
}

// ============================================================================
// Severity
// ============================================================================

/// Threat severity. Declaration order gives `Safe < Low < ... < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Severity {
    Safe,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Most severe first, the order the overview cards are laid out in.
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Safe,
    ];

    /// The four severities the overview cards count. `Safe` is never tallied.
    pub const TALLIED: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Safe => "safe",
        }
    }

    /// Visual emphasis tier for a raw severity label.
    ///
    /// Total: any label that is not one of the four alert levels falls back
    /// to `Safe`. Idempotent: `tier_for(tier_for(x).as_str()) == tier_for(x)`.
    pub fn tier_for(label: &str) -> Severity {
        match label {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Safe,
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ThreatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" | "crit" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" | "med" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "safe" => Ok(Self::Safe),
            _ => Err(ThreatParseError::Severity(s.to_string())),
        }
    }
}

/// Lenient conversion used by deserialization: unknown labels become `Safe`.
impl From<String> for Severity {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Self::Safe)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Category
// ============================================================================

/// Kind of detection. Unrecognized labels deserialize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ThreatCategory {
    Malware,
    Network,
    Ddos,
    Ids,
    Other,
}

impl ThreatCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Malware => "malware",
            Self::Network => "network",
            Self::Ddos => "ddos",
            Self::Ids => "ids",
            Self::Other => "other",
        }
    }

    pub fn glyph(self) -> Glyph {
        match self {
            Self::Malware => Glyph::Bug,
            Self::Ddos => Glyph::Zap,
            Self::Network => Glyph::Network,
            Self::Ids => Glyph::Shield,
            Self::Other => Glyph::Activity,
        }
    }
}

impl std::str::FromStr for ThreatCategory {
    type Err = ThreatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "malware" => Ok(Self::Malware),
            "network" => Ok(Self::Network),
            "ddos" => Ok(Self::Ddos),
            "ids" => Ok(Self::Ids),
            _ => Err(ThreatParseError::Category(s.to_string())),
        }
    }
}

impl From<String> for ThreatCategory {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Self::Other)
    }
}

impl std::fmt::Display for ThreatCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Glyph
// ============================================================================

/// Icon identifier shown next to a feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Bug,
    Zap,
    Network,
    Shield,
    /// Fallback for categories outside the known set.
    Activity,
}

impl Glyph {
    /// Glyph for a raw category label, with `Activity` as the fallback.
    pub fn for_category(label: &str) -> Glyph {
        match label {
            "malware" => Glyph::Bug,
            "ddos" => Glyph::Zap,
            "network" => Glyph::Network,
            "ids" => Glyph::Shield,
            _ => Glyph::Activity,
        }
    }
}

// ============================================================================
// Detection model
// ============================================================================

/// Model the detection is attributed to. A label only; nothing is inferred.
///
/// Deserializes through the case-insensitive `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DetectionModel {
    #[serde(rename = "Random Forest")]
    RandomForest,
    #[serde(rename = "KNN")]
    Knn,
}

impl DetectionModel {
    pub const ALL: [DetectionModel; 2] = [DetectionModel::RandomForest, DetectionModel::Knn];

    /// Short badge label.
    pub fn label(self) -> &'static str {
        match self {
            Self::RandomForest => "Random Forest",
            Self::Knn => "KNN",
        }
    }

    /// Long name used on the performance tab.
    pub fn full_name(self) -> &'static str {
        match self {
            Self::RandomForest => "Random Forest",
            Self::Knn => "K-Nearest Neighbors",
        }
    }
}

impl std::str::FromStr for DetectionModel {
    type Err = ThreatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random forest" | "random_forest" | "rf" => Ok(Self::RandomForest),
            "knn" | "k-nearest neighbors" => Ok(Self::Knn),
            _ => Err(ThreatParseError::Model(s.to_string())),
        }
    }
}

impl TryFrom<String> for DetectionModel {
    type Error = ThreatParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for DetectionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Threat record
// ============================================================================

/// One detection entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatRecord {
    /// Unique within the loaded list
    pub id: String,
    #[serde(rename = "type")]
    pub category: ThreatCategory,
    pub severity: Severity,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub model: DetectionModel,
    /// Percentage. Not clamped.
    pub confidence: f64,
    /// Address or free-form label
    pub source: String,
}

impl ThreatRecord {
    /// Confidence as the analysis panel prints it, e.g. `94.2%`.
    pub fn confidence_label(&self) -> String {
        format!("{}%", self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert!(Severity::Low > Severity::Safe);
    }

    #[test]
    fn test_tier_for_known_labels() {
        for severity in Severity::ALL {
            assert_eq!(Severity::tier_for(severity.as_str()), severity);
        }
    }

    #[test]
    fn test_tier_for_unknown_falls_back_to_safe() {
        assert_eq!(Severity::tier_for("catastrophic"), Severity::Safe);
        assert_eq!(Severity::tier_for(""), Severity::Safe);
        // Case-sensitive, like the labels the feed emits
        assert_eq!(Severity::tier_for("CRITICAL"), Severity::Safe);
    }

    #[test]
    fn test_glyph_mapping() {
        assert_eq!(ThreatCategory::Malware.glyph(), Glyph::Bug);
        assert_eq!(ThreatCategory::Ddos.glyph(), Glyph::Zap);
        assert_eq!(ThreatCategory::Network.glyph(), Glyph::Network);
        assert_eq!(ThreatCategory::Ids.glyph(), Glyph::Shield);
        assert_eq!(ThreatCategory::Other.glyph(), Glyph::Activity);
        assert_eq!(Glyph::for_category("phishing"), Glyph::Activity);
        assert_eq!(Glyph::for_category("ids"), Glyph::Shield);
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        assert!("bogus".parse::<Severity>().is_err());
        assert_eq!(
            "ransomware".parse::<ThreatCategory>(),
            Err(ThreatParseError::Category("ransomware".into()))
        );
        assert_eq!("KNN".parse::<DetectionModel>(), Ok(DetectionModel::Knn));
    }

    #[test]
    fn test_lenient_deserialize() {
        let json = r#"{
            "id": "x",
            "type": "phishing",
            "severity": "apocalyptic",
            "description": "d",
            "timestamp": "2024-01-01T00:00:00Z",
            "model": "KNN",
            "confidence": 50.0,
            "source": "s"
        }"#;
        let record: ThreatRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, ThreatCategory::Other);
        assert_eq!(record.severity, Severity::Safe);
    }

    #[test]
    fn test_model_deserialize_ignores_case() {
        let model: DetectionModel = serde_json::from_str(r#""knn""#).unwrap();
        assert_eq!(model, DetectionModel::Knn);
        let model: DetectionModel = serde_json::from_str(r#""random forest""#).unwrap();
        assert_eq!(model, DetectionModel::RandomForest);
        assert!(serde_json::from_str::<DetectionModel>(r#""SVM""#).is_err());
    }

    #[test]
    fn test_serialize_wire_names() {
        let value = serde_json::to_value(DetectionModel::RandomForest).unwrap();
        assert_eq!(value, "Random Forest");
        let value = serde_json::to_value(Severity::Critical).unwrap();
        assert_eq!(value, "critical");
        let value = serde_json::to_value(ThreatCategory::Ddos).unwrap();
        assert_eq!(value, "ddos");
    }

    #[test]
    fn test_confidence_label() {
        let record = ThreatRecord {
            id: "1".into(),
            category: ThreatCategory::Malware,
            severity: Severity::Critical,
            description: String::new(),
            timestamp: Utc::now(),
            model: DetectionModel::RandomForest,
            confidence: 94.2,
            source: "192.168.1.45".into(),
        };
        assert_eq!(record.confidence_label(), "94.2%");
    }
}
