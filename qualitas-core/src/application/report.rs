// qualitas-core/src/application/report.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

use crate::domain::quality::{ClassificationResult, PerValueBreakdown, QualitySummary};
use crate::error::QualitasError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

/// One bad row, with the rules it violates and its original fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadRow {
    /// Zero-based position in the dataset.
    pub index: usize,
    pub violations: Vec<String>,
    pub values: Map<String, JsonValue>,
}

impl BadRow {
    pub fn collect(result: &ClassificationResult<'_>) -> Vec<BadRow> {
        let columns = result.columns();
        result
            .bad_rows()
            .map(|classified| BadRow {
                index: classified.index,
                violations: classified.verdict.violations.clone(),
                values: columns
                    .iter()
                    .enumerate()
                    .map(|(i, name)| {
                        let value = serde_json::to_value(classified.row.get(i))
                            .unwrap_or(JsonValue::Null);
                        (name.clone(), value)
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Quality assessment of a single dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub name: String,
    pub columns: Vec<String>,
    pub summary: QualitySummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PerValueBreakdown>,
    /// Why the requested breakdown could not be built. The summary still stands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown_error: Option<String>,
    pub bad_rows: Vec<BadRow>,
}

/// Per-file outcome of a batch. A failed file never hides the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Assessed(DatasetReport),
    Failed {
        file: String,
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
}

impl FileOutcome {
    pub fn name(&self) -> &str {
        match self {
            FileOutcome::Assessed(report) => &report.name,
            FileOutcome::Failed { file, .. } => file,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    /// Rows of every assessed file pooled together.
    pub overall: QualitySummary,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<FileOutcome>) -> Self {
        let overall = QualitySummary::combine(outcomes.iter().filter_map(|o| match o {
            FileOutcome::Assessed(report) => Some(&report.summary),
            FileOutcome::Failed { .. } => None,
        }));
        Self {
            generated_at: Utc::now(),
            overall,
            outcomes,
        }
    }

    pub fn reports(&self) -> impl Iterator<Item = &DatasetReport> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Assessed(report) => Some(report),
            FileOutcome::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Reports whose quality percentage is strictly below `threshold`.
    pub fn below_threshold(&self, threshold: f64) -> Vec<&DatasetReport> {
        self.reports()
            .filter(|r| r.summary.quality_pct < threshold)
            .collect()
    }

    pub fn to_json(&self) -> Result<String, QualitasError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| QualitasError::Infrastructure(InfrastructureError::JsonError(e)))
    }
}

/// Writes the report as pretty JSON, atomically.
pub fn write_report(path: &Path, report: &BatchReport) -> Result<(), QualitasError> {
    let json = report.to_json()?;
    atomic_write(path, json)?;
    tracing::info!(path = ?path, "Quality report written");
    Ok(())
}
