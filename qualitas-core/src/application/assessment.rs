// qualitas-core/src/application/assessment.rs

use futures::StreamExt;
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::application::report::{BadRow, BatchReport, DatasetReport, FileOutcome};
use crate::domain::dataset::Dataset;
use crate::domain::quality::{RuleSet, breakdown_by_column, classify, summarize};
use crate::error::QualitasError;
use crate::infrastructure::readers::reader_for_path;

/// Files assessed at the same time in a batch.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Classifies one in-memory dataset and builds its report.
///
/// Missing rule columns fail the assessment. A missing `group_by` column only
/// drops the breakdown: the summary and bad rows are still reported, with the
/// reason in `breakdown_error`.
pub fn assess_dataset(
    name: &str,
    dataset: &Dataset,
    rules: &RuleSet,
    group_by: Option<&str>,
) -> Result<DatasetReport, QualitasError> {
    let result = classify(dataset, rules)?;
    let summary = summarize(&result);
    let (breakdown, breakdown_error) = match group_by.map(|c| breakdown_by_column(&result, c)) {
        None => (None, None),
        Some(Ok(breakdown)) => (Some(breakdown), None),
        Some(Err(e)) => {
            warn!(dataset = name, error = %e, "Breakdown skipped");
            (None, Some(e.to_string()))
        }
    };

    debug!(
        dataset = name,
        total = summary.total,
        bad = summary.bad,
        "Dataset classified"
    );

    Ok(DatasetReport {
        name: name.to_string(),
        columns: dataset.columns().to_vec(),
        summary,
        breakdown,
        breakdown_error,
        bad_rows: BadRow::collect(&result),
    })
}

/// Reads a file with the reader matching its extension, then classifies it
/// on the blocking pool.
#[instrument(skip(rules))]
pub async fn assess_file(
    path: &Path,
    rules: Arc<RuleSet>,
    group_by: Option<String>,
) -> Result<DatasetReport, QualitasError> {
    let reader = reader_for_path(path)?;
    let dataset = reader.read(path).await?;
    debug!(
        format = reader.format(),
        rows = dataset.len(),
        "Dataset loaded"
    );

    let name = display_name(path);
    tokio::task::spawn_blocking(move || {
        assess_dataset(&name, &dataset, &rules, group_by.as_deref())
    })
    .await
    .map_err(|e| QualitasError::InternalError(format!("Assessment task failed: {}", e)))?
}

/// Assesses every file concurrently. Outcomes keep the order of `paths` and a
/// failing file is reported as [`FileOutcome::Failed`] without stopping the others.
pub async fn assess_files(
    paths: Vec<PathBuf>,
    rules: Arc<RuleSet>,
    group_by: Option<String>,
) -> BatchReport {
    assess_files_with_concurrency(paths, rules, group_by, DEFAULT_CONCURRENCY).await
}

pub async fn assess_files_with_concurrency(
    paths: Vec<PathBuf>,
    rules: Arc<RuleSet>,
    group_by: Option<String>,
    concurrency: usize,
) -> BatchReport {
    info!(files = paths.len(), "Assessing data quality");

    let futures = paths.into_iter().map(|path| {
        let rules = Arc::clone(&rules);
        let group_by = group_by.clone();
        async move {
            match assess_file(&path, rules, group_by).await {
                Ok(report) => FileOutcome::Assessed(report),
                Err(e) => {
                    warn!(file = ?path, error = %e, "Assessment failed");
                    FileOutcome::Failed {
                        file: display_name(&path),
                        error: e.to_string(),
                        code: e.code().map(|c| c.to_string()),
                    }
                }
            }
        }
    });

    // `buffered` keeps input order, unlike `buffer_unordered`.
    let outcomes: Vec<FileOutcome> = futures::stream::iter(futures)
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let report = BatchReport::new(outcomes);
    info!(
        quality_pct = report.overall.quality_pct,
        failures = report.failures().count(),
        "Assessment complete"
    );
    report
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}
