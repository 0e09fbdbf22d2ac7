//! "Generate Detailed Report": Markdown export of the selected threat.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use thiserror::Error;

use super::dashboard::AnalysisDetails;
use super::threat::ThreatRecord;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no threat selected")]
    NoSelection,
    #[error("failed to write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A report over one record, stamped with its generation time.
#[derive(Debug, Clone)]
pub struct ThreatReport {
    record: ThreatRecord,
    generated_at: DateTime<Utc>,
}

impl ThreatReport {
    pub fn new(record: ThreatRecord, generated_at: DateTime<Utc>) -> Self {
        Self {
            record,
            generated_at,
        }
    }

    /// Build from the current selection, if any.
    pub fn for_selection(
        selected: Option<&ThreatRecord>,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        selected
            .cloned()
            .map(|record| Self::new(record, generated_at))
            .ok_or(ReportError::NoSelection)
    }

    pub fn file_name(&self) -> String {
        let id: String = self
            .record
            .id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!(
            "threat-{id}-{}.md",
            self.generated_at.format("%Y%m%dT%H%M%S")
        )
    }

    pub fn render_markdown(&self) -> String {
        let details = AnalysisDetails::from_record(&self.record);
        let detected = self.record.timestamp.with_timezone(&Local);

        let mut out = String::new();
        out.push_str("# Threat Analysis Report\n\n");
        out.push_str(&format!("{}\n\n", self.record.description));
        out.push_str("| Field | Value |\n|---|---|\n");
        out.push_str(&format!("| ID | {} |\n", details.id));
        out.push_str(&format!("| Type | {} |\n", details.kind));
        out.push_str(&format!("| Severity | {} |\n", details.severity));
        out.push_str(&format!("| Model | {} |\n", details.model));
        out.push_str(&format!("| Confidence | {} |\n", details.confidence));
        out.push_str(&format!("| Source | {} |\n", details.source));
        out.push_str(&format!(
            "| Detected | {} |\n",
            detected.format("%Y-%m-%d %H:%M:%S %Z")
        ));
        out.push_str(&format!(
            "\n_Generated {}_\n",
            self.generated_at.to_rfc3339()
        ));
        out
    }

    /// Write into `dir` (created if missing). Returns the file path.
    pub async fn write_to(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| ReportError::Io {
                path: dir.to_path_buf(),
                source,
            })?;

        let path = dir.join(self.file_name());
        tokio::fs::write(&path, self.render_markdown())
            .await
            .map_err(|source| ReportError::Io {
                path: path.clone(),
                source,
            })?;

        log::info!("Wrote threat report {}", path.display());
        Ok(path)
    }
}
