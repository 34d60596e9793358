// qualitas-core/src/domain/quality/summary.rs

use serde::{Deserialize, Serialize};

use super::classifier::ClassificationResult;

/// Good/bad row counts and the resulting quality percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct QualitySummary {
    pub total: usize,
    pub bad: usize,
    pub good: usize,
    /// `good / total * 100`, rounded to two decimals. `0.0` for an empty dataset.
    pub quality_pct: f64,
}

impl QualitySummary {
    pub fn from_counts(total: usize, bad: usize) -> Self {
        let bad = bad.min(total);
        let good = total - bad;
        Self {
            total,
            bad,
            good,
            quality_pct: quality_percentage(good, total),
        }
    }

    /// Folds several summaries into one, as if the rows were a single dataset.
    pub fn combine<'a>(summaries: impl IntoIterator<Item = &'a QualitySummary>) -> Self {
        let (total, bad) = summaries
            .into_iter()
            .fold((0, 0), |(t, b), s| (t + s.total, b + s.bad));
        Self::from_counts(total, bad)
    }
}

pub fn summarize(result: &ClassificationResult<'_>) -> QualitySummary {
    QualitySummary::from_counts(result.len(), result.bad_count())
}

fn quality_percentage(good: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = good as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
