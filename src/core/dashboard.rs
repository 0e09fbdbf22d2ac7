//! Dashboard state: the record list and the selected record.
//!
//! Updates go through [`DashboardState::apply`], a pure
//! `(state, event) -> state` transition.

use super::tally::SeverityTally;
use super::threat::{Severity, ThreatRecord};

/// Inputs to the dashboard state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// Operator picked a feed entry (Enter or click).
    Select(String),
    /// Feed (re)loaded; the list is replaced wholesale.
    Replace(Vec<ThreatRecord>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    threats: Vec<ThreatRecord>,
    /// Snapshot of the last selected record. Never cleared automatically.
    selected: Option<ThreatRecord>,
}

impl DashboardState {
    pub fn new(threats: Vec<ThreatRecord>) -> Self {
        Self {
            threats,
            selected: None,
        }
    }

    pub fn apply(self, event: DashboardEvent) -> Self {
        match event {
            DashboardEvent::Select(id) => {
                let Some(record) = self.threats.iter().find(|t| t.id == id).cloned() else {
                    log::debug!("Ignoring selection of unknown threat {id}");
                    return self;
                };
                Self {
                    selected: Some(record),
                    ..self
                }
            }
            DashboardEvent::Replace(threats) => Self { threats, ..self },
        }
    }

    pub fn threats(&self) -> &[ThreatRecord] {
        &self.threats
    }

    pub fn selected(&self) -> Option<&ThreatRecord> {
        self.selected.as_ref()
    }

    pub fn tally(&self) -> SeverityTally {
        SeverityTally::from_records(&self.threats)
    }

    /// What the Analysis tab should show.
    pub fn analysis(&self) -> AnalysisPanel {
        match &self.selected {
            None => AnalysisPanel::Prompt,
            Some(record) => AnalysisPanel::Details(AnalysisDetails::from_record(record)),
        }
    }
}

/// Content of the Analysis tab: the empty prompt or a complete record.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPanel {
    Prompt,
    Details(AnalysisDetails),
}

impl AnalysisPanel {
    pub const PROMPT: &'static str = "Select a threat from the feed to view detailed analysis";
}

/// Display-ready fields of the selected record.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisDetails {
    pub id: String,
    /// Category, upper-cased
    pub kind: String,
    pub severity: Severity,
    pub model: String,
    pub confidence: String,
    pub source: String,
}

impl AnalysisDetails {
    pub fn from_record(record: &ThreatRecord) -> Self {
        Self {
            id: record.id.clone(),
            kind: record.category.as_str().to_uppercase(),
            severity: record.severity,
            model: record.model.label().to_string(),
            confidence: record.confidence_label(),
            source: record.source.clone(),
        }
    }
}
