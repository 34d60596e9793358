// qualitas-core/src/domain/quality/classifier.rs

use serde::Serialize;

use super::rule::RuleSet;
use crate::domain::dataset::{Dataset, Row};
use crate::domain::error::DomainError;

/// Outcome for one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowVerdict {
    pub is_bad: bool,
    /// Names of the rules the row violates, in rule order. Empty for good rows.
    pub violations: Vec<String>,
}

/// A dataset with one verdict per row, same order, same fields.
#[derive(Debug, Clone)]
pub struct ClassificationResult<'a> {
    dataset: &'a Dataset,
    verdicts: Vec<RowVerdict>,
}

/// A borrowed view of one classified row.
#[derive(Debug, Clone, Copy)]
pub struct ClassifiedRow<'a> {
    pub index: usize,
    pub row: &'a Row,
    pub verdict: &'a RowVerdict,
}

impl ClassifiedRow<'_> {
    pub fn is_bad(&self) -> bool {
        self.verdict.is_bad
    }
}

impl<'a> ClassificationResult<'a> {
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn columns(&self) -> &'a [String] {
        self.dataset.columns()
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn verdicts(&self) -> &[RowVerdict] {
        &self.verdicts
    }

    /// The `is_bad` flags in row order.
    pub fn flags(&self) -> Vec<bool> {
        self.verdicts.iter().map(|v| v.is_bad).collect()
    }

    /// Every row with its verdict, in dataset order.
    pub fn rows(&self) -> impl Iterator<Item = ClassifiedRow<'_>> + '_ {
        self.dataset
            .rows()
            .iter()
            .zip(&self.verdicts)
            .enumerate()
            .map(|(index, (row, verdict))| ClassifiedRow {
                index,
                row,
                verdict,
            })
    }

    /// Only the rows flagged bad, in dataset order.
    pub fn bad_rows(&self) -> impl Iterator<Item = ClassifiedRow<'_>> + '_ {
        self.rows().filter(|r| r.is_bad())
    }

    pub fn bad_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.is_bad).count()
    }
}

/// Flags every row of `dataset` as bad or good.
///
/// A row is bad when at least one rule of `rules` matches it, and a rule matches
/// when all its conditions hold. Each verdict depends only on the row itself.
///
/// Fails with [`DomainError::MissingColumns`] naming every column the rules
/// reference that the dataset lacks.
pub fn classify<'a>(
    dataset: &'a Dataset,
    rules: &RuleSet,
) -> Result<ClassificationResult<'a>, DomainError> {
    let missing = dataset.missing_columns(rules.required_columns());
    if !missing.is_empty() {
        return Err(DomainError::MissingColumns { columns: missing });
    }

    // Resolve column positions once per rule set, not per row.
    let mut bound = Vec::with_capacity(rules.compiled().len());
    for rule in rules.compiled() {
        let mut conditions = Vec::with_capacity(rule.conditions.len());
        for condition in &rule.conditions {
            let index = dataset
                .column_index(&condition.column)
                .ok_or_else(|| DomainError::missing([condition.column.as_str()]))?;
            conditions.push((index, condition));
        }
        bound.push((rule.name.as_str(), conditions));
    }

    let verdicts = dataset
        .rows()
        .iter()
        .map(|row| {
            let violations: Vec<String> = bound
                .iter()
                .filter(|(_, conditions)| {
                    conditions
                        .iter()
                        .all(|(index, condition)| condition.evaluate(row.get(*index)))
                })
                .map(|(name, _)| (*name).to_string())
                .collect();
            RowVerdict {
                is_bad: !violations.is_empty(),
                violations,
            }
        })
        .collect();

    Ok(ClassificationResult { dataset, verdicts })
}
