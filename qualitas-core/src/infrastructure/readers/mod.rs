// qualitas-core/src/infrastructure/readers/mod.rs

pub mod delimited;
pub mod json;
pub mod spreadsheet;

pub use delimited::CsvReader;
pub use json::JsonReader;
pub use spreadsheet::XlsxReader;

use std::path::Path;

use crate::infrastructure::error::InfrastructureError;
use crate::ports::reader::DatasetReader;

pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["csv", "tsv", "json", "xlsx"];

/// Picks the reader matching the file extension (case-insensitive).
pub fn reader_for_path(path: &Path) -> Result<Box<dyn DatasetReader>, InfrastructureError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => Ok(Box::new(CsvReader::new())),
        "tsv" => Ok(Box::new(CsvReader::with_delimiter(b'\t'))),
        "json" => Ok(Box::new(JsonReader)),
        "xlsx" => Ok(Box::new(XlsxReader)),
        _ => Err(InfrastructureError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}

pub fn is_supported(path: &Path) -> bool {
    reader_for_path(path).is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_for_path() {
        assert_eq!(reader_for_path(Path::new("a.csv")).unwrap().format(), "csv");
        assert_eq!(reader_for_path(Path::new("a.TSV")).unwrap().format(), "csv");
        assert_eq!(reader_for_path(Path::new("dir/a.json")).unwrap().format(), "json");
        assert_eq!(reader_for_path(Path::new("a.XLSX")).unwrap().format(), "xlsx");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = reader_for_path(Path::new("orders.ods")).err().unwrap();
        assert!(matches!(err, InfrastructureError::UnsupportedFormat(p) if p == "orders.ods"));
        assert!(!is_supported(Path::new("no_extension")));
    }
}
