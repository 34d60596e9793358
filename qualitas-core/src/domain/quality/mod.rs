// qualitas-core/src/domain/quality/mod.rs

pub mod breakdown;
pub mod classifier;
pub mod condition;
pub mod config;
pub mod rule;
pub mod summary;

// Re-exports
pub use breakdown::{BreakdownEntry, PerValueBreakdown, breakdown_by_column};
pub use classifier::{ClassificationResult, ClassifiedRow, RowVerdict, classify};
pub use condition::Condition;
pub use config::{ColumnMapping, QualityConfig, default_rules};
pub use rule::{QualityRule, RuleSet};
pub use summary::{QualitySummary, summarize};
