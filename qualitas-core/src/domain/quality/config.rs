// qualitas-core/src/domain/quality/config.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

use super::condition::Condition;
use super::rule::{QualityRule, RuleSet};
use crate::domain::error::DomainError;

pub const DEFAULT_SENTINEL: &str = "tmm";
pub const DEFAULT_MARKER: &str = "BDE:";

pub const RULE_BOOKED_QUANTITY: &str = "sentinel_with_goods_quantity";
pub const RULE_BDE_REMARK: &str = "sentinel_with_bde_remark";

/// Maps the logical fields used by the default rules onto real spreadsheet headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default = "default_responsible")]
    pub responsible: String,
    #[serde(default = "default_goods_quantity")]
    pub goods_quantity: String,
    #[serde(default = "default_remarks")]
    pub remarks: String,
}

fn default_responsible() -> String {
    "responsible".to_string()
}
fn default_goods_quantity() -> String {
    "goodsQuantity".to_string()
}
fn default_remarks() -> String {
    "remarks".to_string()
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            responsible: default_responsible(),
            goods_quantity: default_goods_quantity(),
            remarks: default_remarks(),
        }
    }
}

impl ColumnMapping {
    /// Headers of the production-order exports the rules were written for.
    pub fn german_export() -> Self {
        Self {
            responsible: "Zuständiger Bearbeiter".to_string(),
            goods_quantity: "Rückgemeldete Gutmenge in Lagereinheit".to_string(),
            remarks: "Bemerkungen".to_string(),
        }
    }
}

/// Quality rule configuration, usually read from `qualitas.yaml`.
///
/// When `rules` is empty the two default rules are built from `columns`,
/// `sentinel` and `marker`; otherwise `rules` is used as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QualityConfig {
    #[serde(default)]
    pub columns: ColumnMapping,

    #[validate(length(min = 1, message = "Sentinel cannot be empty"))]
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    #[validate(length(min = 1, message = "Marker cannot be empty"))]
    #[serde(default = "default_marker")]
    pub marker: String,

    #[validate(nested)]
    #[validate(custom(function = "validate_unique_rule_names"))]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<QualityRule>,
}

fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}
fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            columns: ColumnMapping::default(),
            sentinel: default_sentinel(),
            marker: default_marker(),
            rules: Vec::new(),
        }
    }
}

fn validate_unique_rule_names(rules: &[QualityRule]) -> Result<(), validator::ValidationError> {
    let mut seen = HashSet::new();
    for rule in rules {
        if !seen.insert(rule.name.as_str()) {
            let mut err = validator::ValidationError::new("duplicate_rule_name");
            err.message = Some(format!("Rule name '{}' is used twice", rule.name).into());
            return Err(err);
        }
    }
    Ok(())
}

impl QualityConfig {
    /// The effective rules: explicit ones, or the defaults built from the mapping.
    pub fn effective_rules(&self) -> Vec<QualityRule> {
        if !self.rules.is_empty() {
            return self.rules.clone();
        }
        default_rules(&self.columns, &self.sentinel, &self.marker)
    }

    /// Settings that only shape the default rules but were changed while
    /// explicit `rules` are configured, so they have no effect.
    pub fn ignored_settings(&self) -> Vec<&'static str> {
        if self.rules.is_empty() {
            return Vec::new();
        }
        let mut ignored = Vec::new();
        if self.columns != ColumnMapping::default() {
            ignored.push("columns");
        }
        if self.sentinel != DEFAULT_SENTINEL {
            ignored.push("sentinel");
        }
        if self.marker != DEFAULT_MARKER {
            ignored.push("marker");
        }
        ignored
    }

    /// Validates the configuration and compiles it into a [`RuleSet`].
    pub fn rule_set(&self) -> Result<RuleSet, DomainError> {
        self.validate()
            .map_err(|e| DomainError::Configuration(e.to_string()))?;
        RuleSet::new(self.effective_rules())
    }
}

/// The two canonical rules:
/// 1. responsible party is the sentinel AND goods quantity > 0,
/// 2. responsible party is the sentinel AND remarks contain the marker.
pub fn default_rules(columns: &ColumnMapping, sentinel: &str, marker: &str) -> Vec<QualityRule> {
    vec![
        QualityRule::new(
            RULE_BOOKED_QUANTITY,
            vec![
                Condition::equals(&columns.responsible, sentinel),
                Condition::greater_than(&columns.goods_quantity, 0.0),
            ],
        )
        .with_description("Sentinel-owned row reports a positive goods quantity"),
        QualityRule::new(
            RULE_BDE_REMARK,
            vec![
                Condition::equals(&columns.responsible, sentinel),
                Condition::contains(&columns.remarks, marker),
            ],
        )
        .with_description("Sentinel-owned row carries a BDE remark"),
    ]
}
