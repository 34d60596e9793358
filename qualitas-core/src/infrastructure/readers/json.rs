// qualitas-core/src/infrastructure/readers/json.rs

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::dataset::{Dataset, Value};
use crate::error::QualitasError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::reader::DatasetReader;

/// Reads an array of flat JSON objects (the shape of a `records` export).
///
/// Column order is first-seen key order. Nested arrays and objects are kept
/// as their JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader;

#[async_trait]
impl DatasetReader for JsonReader {
    fn format(&self) -> &'static str {
        "json"
    }

    fn parse(&self, content: &[u8]) -> Result<Dataset, QualitasError> {
        let document: JsonValue =
            serde_json::from_slice(content).map_err(InfrastructureError::from)?;

        let JsonValue::Array(items) = document else {
            return Err(InfrastructureError::MalformedDataset(
                "expected a top-level array of objects".to_string(),
            )
            .into());
        };

        let mut records = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let JsonValue::Object(map) = item else {
                return Err(InfrastructureError::MalformedDataset(format!(
                    "element {} is not an object",
                    i
                ))
                .into());
            };
            records.push(
                map.into_iter()
                    .map(|(key, value)| (key, to_cell(value)))
                    .collect::<Vec<_>>(),
            );
        }

        Ok(Dataset::from_records(records))
    }
}

fn to_cell(value: JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => number_cell(&n),
        JsonValue::String(s) => Value::Text(s),
        nested @ (JsonValue::Array(_) | JsonValue::Object(_)) => Value::Text(nested.to_string()),
    }
}

/// Integers that an `f64` cannot hold exactly stay as their digits.
fn number_cell(n: &serde_json::Number) -> Value {
    let exact = match (n.as_i64(), n.as_u64()) {
        (Some(i), _) => i.unsigned_abs() <= MAX_EXACT_INTEGER,
        (None, Some(u)) => u <= MAX_EXACT_INTEGER,
        (None, None) => true,
    };
    match n.as_f64() {
        Some(f) if exact => Value::Number(f),
        _ => Value::Text(n.to_string()),
    }
}

const MAX_EXACT_INTEGER: u64 = 1 << 53;
