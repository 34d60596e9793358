// qualitas-core/src/infrastructure/readers/spreadsheet.rs

use async_trait::async_trait;
use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use std::io::Cursor;
use tracing::debug;

use super::delimited::normalize_headers;
use crate::domain::dataset::{Dataset, Value};
use crate::error::QualitasError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::reader::DatasetReader;

/// Excel workbook reader. Only the first worksheet is read and its first
/// used row is the header row.
///
/// String cells stay text (a `0042` typed as text is not a number), numeric
/// cells become numbers unless an `f64` cannot hold them exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReader;

#[async_trait]
impl DatasetReader for XlsxReader {
    fn format(&self) -> &'static str {
        "xlsx"
    }

    fn parse(&self, content: &[u8]) -> Result<Dataset, QualitasError> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(content.to_vec()))
            .map_err(InfrastructureError::from)?;

        let sheet = workbook.sheet_names().first().cloned().unwrap_or_default();
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| {
                InfrastructureError::MalformedDataset("workbook has no worksheet".to_string())
            })?
            .map_err(InfrastructureError::from)?;
        debug!(sheet = %sheet, height = range.height(), "Parsing worksheet");

        let mut rows = range.rows();
        let header = rows
            .next()
            .map(|cells| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>())
            .unwrap_or_default();
        let columns = normalize_headers(header.iter().map(String::as_str))?;

        let rows = rows
            .map(|cells| cells.iter().map(to_cell).collect::<Vec<_>>())
            .collect();

        Ok(Dataset::new(columns, rows))
    }
}

fn to_cell(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::from_cell(s),
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) if i.unsigned_abs() <= MAX_EXACT_INTEGER => Value::Number(*i as f64),
        Data::Float(f) => Value::Number(*f),
        // dates, durations, error cells and oversized integers
        other => Value::from_cell(&other.to_string()),
    }
}

const MAX_EXACT_INTEGER: u64 = 1 << 53;
