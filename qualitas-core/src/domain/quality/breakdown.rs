// qualitas-core/src/domain/quality/breakdown.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::classifier::ClassificationResult;
use crate::domain::dataset::{Value, ValueKey};
use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub value: Value,
    pub bad: usize,
}

/// Bad-row count for each distinct value of one column.
///
/// Entries keep first-seen order; consumers that want a ranking call
/// [`PerValueBreakdown::sorted_by_count`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerValueBreakdown {
    pub column: String,
    pub entries: Vec<BreakdownEntry>,
}

impl PerValueBreakdown {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bad count for `value`, if the value occurs in the column.
    pub fn get(&self, value: &Value) -> Option<usize> {
        let key = ValueKey::from(value);
        self.entries
            .iter()
            .find(|e| ValueKey::from(&e.value) == key)
            .map(|e| e.bad)
    }

    pub fn total_bad(&self) -> usize {
        self.entries.iter().map(|e| e.bad).sum()
    }

    /// Entries by descending bad count; ties keep first-seen order.
    pub fn sorted_by_count(&self) -> Vec<&BreakdownEntry> {
        let mut sorted: Vec<&BreakdownEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.bad.cmp(&a.bad));
        sorted
    }
}

/// Groups the classified rows by the exact value of `column` and counts the
/// bad rows of each group. `Null` forms its own group.
pub fn breakdown_by_column(
    result: &ClassificationResult<'_>,
    column: &str,
) -> Result<PerValueBreakdown, DomainError> {
    let index = result
        .dataset()
        .column_index(column)
        .ok_or_else(|| DomainError::missing([column]))?;

    let mut positions: HashMap<ValueKey, usize> = HashMap::new();
    let mut entries: Vec<BreakdownEntry> = Vec::new();

    for classified in result.rows() {
        let value = classified.row.get(index);
        let slot = *positions.entry(ValueKey::from(value)).or_insert_with(|| {
            entries.push(BreakdownEntry {
                value: value.clone(),
                bad: 0,
            });
            entries.len() - 1
        });
        if classified.is_bad() {
            entries[slot].bad += 1;
        }
    }

    Ok(PerValueBreakdown {
        column: column.to_string(),
        entries,
    })
}
