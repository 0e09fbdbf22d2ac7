//! Per-severity counts shown on the overview cards.

use super::threat::{Severity, ThreatRecord};

/// Number of records at each alert level. `Safe` records are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityTally {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityTally {
    pub fn from_records(records: &[ThreatRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut tally, record| {
                match record.severity {
                    Severity::Critical => tally.critical += 1,
                    Severity::High => tally.high += 1,
                    Severity::Medium => tally.medium += 1,
                    Severity::Low => tally.low += 1,
                    Severity::Safe => {}
                }
                tally
            })
    }

    /// Count for one severity; always 0 for `Safe`.
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Safe => 0,
        }
    }

    /// Sum of the four tallied levels.
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}
