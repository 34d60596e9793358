// qualitas-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, PartialEq)]
pub enum DomainError {
    #[error("Required column(s) not found: {}", .columns.join(", "))]
    #[diagnostic(
        code(qualitas::domain::missing_columns),
        help("Check the spreadsheet headers or the column mapping in qualitas.yaml.")
    )]
    MissingColumns { columns: Vec<String> },

    #[error("Invalid rule '{rule}': {reason}")]
    #[diagnostic(code(qualitas::domain::rule))]
    InvalidRule { rule: String, reason: String },

    #[error("Quality configuration is invalid: {0}")]
    #[diagnostic(
        code(qualitas::domain::configuration),
        help("Each rule needs a unique, non-empty name and at least one condition.")
    )]
    Configuration(String),
}

impl DomainError {
    pub fn missing<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DomainError::MissingColumns {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}
