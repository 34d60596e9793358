// qualitas-core/src/domain/quality/rule.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::condition::{CompiledCondition, Condition};
use crate::domain::error::DomainError;

/// A named conjunction of conditions. A row violates the rule when every
/// condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QualityRule {
    #[validate(length(min = 1, message = "Rule name cannot be empty"))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "A rule needs at least one condition"))]
    pub conditions: Vec<Condition>,
}

impl QualityRule {
    pub fn new(name: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            name: name.into(),
            description: None,
            conditions,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) name: String,
    pub(crate) conditions: Vec<CompiledCondition>,
}

/// Ordered list of rules combined by logical OR.
///
/// Construction compiles every condition, so a `RuleSet` that exists is
/// always evaluable.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<QualityRule>,
    compiled: Vec<CompiledRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<QualityRule>) -> Result<Self, DomainError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in &rules {
            if rule.name.trim().is_empty() {
                return Err(DomainError::InvalidRule {
                    rule: rule.name.clone(),
                    reason: "rule name cannot be empty".to_string(),
                });
            }
            if rule.conditions.is_empty() {
                return Err(DomainError::InvalidRule {
                    rule: rule.name.clone(),
                    reason: "a rule needs at least one condition".to_string(),
                });
            }
            let conditions = rule
                .conditions
                .iter()
                .map(|c| c.compile(&rule.name))
                .collect::<Result<Vec<_>, _>>()?;
            compiled.push(CompiledRule {
                name: rule.name.clone(),
                conditions,
            });
        }
        Ok(Self { rules, compiled })
    }

    pub fn rules(&self) -> &[QualityRule] {
        &self.rules
    }

    pub(crate) fn compiled(&self) -> &[CompiledRule] {
        &self.compiled
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every column referenced by a condition, de-duplicated, in rule order.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for condition in self.rules.iter().flat_map(|r| &r.conditions) {
            let column = condition.column();
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns
    }
}
