// qualitas-core/src/domain/quality/condition.rs

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::dataset::Value;
use crate::domain::error::DomainError;

/// A predicate over one column of a row.
///
/// Conditions are plain data so rule sets can live in YAML:
///
/// ```yaml
/// - type: equals
///   column: responsible
///   value: tmm
/// - type: greater_than
///   column: goodsQuantity
///   threshold: 0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Text form of the cell equals `value` exactly. `Null` never matches.
    Equals { column: String, value: String },
    /// Text form of the cell contains `substring`. `Null` never matches.
    Contains { column: String, substring: String },
    /// Numeric form of the cell is strictly greater than `threshold`.
    /// Cells without a numeric form fail the comparison.
    GreaterThan { column: String, threshold: f64 },
    /// Text form of the cell matches the regular expression `pattern`.
    Matches { column: String, pattern: String },
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Equals { column, value } => write!(f, "{} == {:?}", column, value),
            Condition::Contains { column, substring } => {
                write!(f, "{} contains {:?}", column, substring)
            }
            Condition::GreaterThan { column, threshold } => write!(f, "{} > {}", column, threshold),
            Condition::Matches { column, pattern } => write!(f, "{} =~ /{}/", column, pattern),
        }
    }
}

impl Condition {
    pub fn equals(column: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::Equals {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn contains(column: impl Into<String>, substring: impl Into<String>) -> Self {
        Condition::Contains {
            column: column.into(),
            substring: substring.into(),
        }
    }

    pub fn greater_than(column: impl Into<String>, threshold: f64) -> Self {
        Condition::GreaterThan {
            column: column.into(),
            threshold,
        }
    }

    pub fn matches(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Condition::Matches {
            column: column.into(),
            pattern: pattern.into(),
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Condition::Equals { column, .. }
            | Condition::Contains { column, .. }
            | Condition::GreaterThan { column, .. }
            | Condition::Matches { column, .. } => column,
        }
    }

    /// Compiles the condition once so evaluation never re-parses a pattern.
    pub(crate) fn compile(&self, rule: &str) -> Result<CompiledCondition, DomainError> {
        let test = match self {
            Condition::Equals { value, .. } => CellTest::Equals(value.clone()),
            Condition::Contains { substring, .. } => CellTest::Contains(substring.clone()),
            Condition::GreaterThan { threshold, .. } => {
                if !threshold.is_finite() {
                    return Err(DomainError::InvalidRule {
                        rule: rule.to_string(),
                        reason: format!("threshold on '{}' must be a finite number", self.column()),
                    });
                }
                CellTest::GreaterThan(*threshold)
            }
            Condition::Matches { pattern, .. } => {
                let regex = Regex::new(pattern).map_err(|e| DomainError::InvalidRule {
                    rule: rule.to_string(),
                    reason: format!("invalid pattern '{}': {}", pattern, e),
                })?;
                CellTest::Matches(regex)
            }
        };
        Ok(CompiledCondition {
            column: self.column().to_string(),
            test,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledCondition {
    pub(crate) column: String,
    test: CellTest,
}

#[derive(Debug, Clone)]
enum CellTest {
    Equals(String),
    Contains(String),
    GreaterThan(f64),
    Matches(Regex),
}

impl CompiledCondition {
    pub(crate) fn evaluate(&self, cell: &Value) -> bool {
        match &self.test {
            CellTest::Equals(expected) => cell.as_text().is_some_and(|t| t == expected.as_str()),
            CellTest::Contains(needle) => cell.as_text().is_some_and(|t| t.contains(needle.as_str())),
            CellTest::GreaterThan(threshold) => cell.as_number().is_some_and(|n| n > *threshold),
            CellTest::Matches(regex) => cell.as_text().is_some_and(|t| regex.is_match(&t)),
        }
    }
}
