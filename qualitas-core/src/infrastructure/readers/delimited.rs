// qualitas-core/src/infrastructure/readers/delimited.rs

use async_trait::async_trait;
use std::collections::HashSet;
use tracing::debug;

use crate::domain::dataset::{Dataset, Value};
use crate::error::QualitasError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::reader::DatasetReader;

const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Delimited text reader.
///
/// - the first record is the header row,
/// - cells are trimmed and kept as text, empty cells become `Null`,
/// - short rows are padded with `Null`, long rows are truncated,
/// - any parse error rejects the whole file.
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    /// `None` sniffs the delimiter from the header line (`,`, `;` or tab).
    delimiter: Option<u8>,
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }

    fn resolve_delimiter(&self, content: &[u8]) -> u8 {
        if let Some(d) = self.delimiter {
            return d;
        }
        let header = content.split(|b| *b == b'\n').next().unwrap_or_default();
        CANDIDATE_DELIMITERS
            .iter()
            .copied()
            .max_by_key(|d| header.iter().filter(|b| *b == d).count())
            .filter(|d| header.contains(d))
            .unwrap_or(b',')
    }
}

#[async_trait]
impl DatasetReader for CsvReader {
    fn format(&self) -> &'static str {
        "csv"
    }

    fn parse(&self, content: &[u8]) -> Result<Dataset, QualitasError> {
        let delimiter = self.resolve_delimiter(content);
        debug!(delimiter = %char::from(delimiter).escape_default(), "Parsing delimited dataset");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content);

        let headers = reader.headers().map_err(InfrastructureError::from)?;
        let columns = normalize_headers(headers.iter())?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(InfrastructureError::from)?;
            rows.push(record.iter().map(Value::from_cell).collect::<Vec<_>>());
        }

        Ok(Dataset::new(columns, rows))
    }
}

/// Strips a UTF-8 BOM, names blank headers `column_N` and rejects duplicates.
pub(super) fn normalize_headers<'a>(
    headers: impl Iterator<Item = &'a str>,
) -> Result<Vec<String>, InfrastructureError> {
    let mut columns = Vec::new();
    let mut seen = HashSet::new();

    for (i, raw) in headers.enumerate() {
        let name = raw.trim_start_matches('\u{feff}').trim();
        let name = if name.is_empty() {
            format!("column_{}", i + 1)
        } else {
            name.to_string()
        };
        if !seen.insert(name.clone()) {
            return Err(InfrastructureError::MalformedDataset(format!(
                "duplicate column header '{}'",
                name
            )));
        }
        columns.push(name);
    }

    if columns.is_empty() {
        return Err(InfrastructureError::MalformedDataset(
            "no header row found".to_string(),
        ));
    }
    Ok(columns)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_types_and_nulls() {
        let content = b"responsible,goodsQuantity,remarks\ntmm,5,\nbob, 0 ,BDE: late\n";
        let ds = CsvReader::new().parse(content).unwrap();

        assert_eq!(ds.columns(), ["responsible", "goodsQuantity", "remarks"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.value(0, "goodsQuantity"), Some(&Value::from("5")));
        assert_eq!(ds.value(0, "remarks"), Some(&Value::Null));
        assert_eq!(ds.value(1, "goodsQuantity"), Some(&Value::from("0")));
        assert_eq!(ds.value(1, "remarks"), Some(&Value::from("BDE: late")));
    }

    #[test]
    fn test_ragged_rows_are_normalized() {
        let content = b"a,b,c\n1\n1,2,3,4\n";
        let ds = CsvReader::new().parse(content).unwrap();
        assert_eq!(
            ds.rows()[0].values(),
            [Value::from("1"), Value::Null, Value::Null]
        );
        assert_eq!(ds.rows()[1].len(), 3);
    }

    #[test]
    fn test_semicolon_delimiter_is_sniffed() {
        let content = "Zuständiger Bearbeiter;Rückgemeldete Gutmenge in Lagereinheit;Bemerkungen\ntmm;3;BDE: x\n";
        let ds = CsvReader::new().parse(content.as_bytes()).unwrap();
        assert_eq!(ds.columns().len(), 3);
        assert_eq!(
            ds.value(0, "Rückgemeldete Gutmenge in Lagereinheit"),
            Some(&Value::from("3"))
        );
    }

    #[test]
    fn test_identifiers_are_not_rewritten() {
        let content = b"order,qty
9007199254740993,1
9007199254740992,1
0042,1
42,1
";
        let ds = CsvReader::new().parse(content).unwrap();
        let orders: Vec<String> = ds.rows().iter().map(|r| r.get(0).to_string()).collect();
        assert_eq!(
            orders,
            ["9007199254740993", "9007199254740992", "0042", "42"]
        );
        assert_eq!(ds.value(0, "qty").and_then(Value::as_number), Some(1.0));
    }

    #[test]
    fn test_explicit_tab_delimiter() {
        let ds = CsvReader::with_delimiter(b'\t')
            .parse(b"a\tb\nx,y\tz\n")
            .unwrap();
        assert_eq!(ds.value(0, "a"), Some(&Value::from("x,y")));
    }

    #[test]
    fn test_bom_and_blank_headers() {
        let ds = CsvReader::new().parse("\u{feff}id,,name\n1,2,3\n".as_bytes()).unwrap();
        assert_eq!(ds.columns(), ["id", "column_2", "name"]);
    }

    #[test]
    fn test_duplicate_headers_reject_file() {
        let err = CsvReader::new().parse(b"a,a\n1,2\n").unwrap_err();
        assert!(matches!(
            err,
            QualitasError::Infrastructure(InfrastructureError::MalformedDataset(_))
        ));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert!(CsvReader::new().parse(b"").is_err());
    }

    #[test]
    fn test_invalid_utf8_rejects_file() {
        let err = CsvReader::new().parse(b"a,b\n\xff\xfe,1\n").unwrap_err();
        assert!(matches!(
            err,
            QualitasError::Infrastructure(InfrastructureError::CsvError(_))
        ));
    }
}
