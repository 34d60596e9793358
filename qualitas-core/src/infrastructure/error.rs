// qualitas-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(qualitas::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(qualitas::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(qualitas::infra::config_missing))]
    ConfigNotFound(String),

    // --- DATASET INGESTION ---
    #[error("CSV Parsing Error: {0}")]
    #[diagnostic(
        code(qualitas::infra::csv),
        help("The file must start with a header row. Check the delimiter and quoting.")
    )]
    CsvError(#[from] csv::Error),

    #[error("JSON Error: {0}")]
    #[diagnostic(
        code(qualitas::infra::json),
        help("JSON datasets must be an array of flat objects.")
    )]
    JsonError(#[from] serde_json::Error),

    #[error("Spreadsheet Error: {0}")]
    #[diagnostic(
        code(qualitas::infra::xlsx),
        help("Only .xlsx workbooks are read. Re-save older .xls files as .xlsx.")
    )]
    SpreadsheetError(#[from] calamine::XlsxError),

    #[error("Malformed dataset: {0}")]
    #[diagnostic(code(qualitas::infra::dataset))]
    MalformedDataset(String),

    #[error("Unsupported file format: '{0}'")]
    #[diagnostic(
        code(qualitas::infra::format),
        help("Supported extensions are .csv, .tsv, .json and .xlsx.")
    )]
    UnsupportedFormat(String),
}
