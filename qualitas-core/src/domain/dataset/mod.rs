// qualitas-core/src/domain/dataset/mod.rs

pub mod value;

pub use value::Value;
pub(crate) use value::ValueKey;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One record of a dataset. Values are stored in the dataset's column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Value at a column position. Positions past the end read as `Null`.
    pub fn get(&self, index: usize) -> &Value {
        static NULL: Value = Value::Null;
        self.values.get(index).unwrap_or(&NULL)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered collection of rows sharing one list of named columns.
///
/// The column set is whatever the ingested file provides; nothing here knows
/// which columns the quality rules need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Builds a dataset from positional rows. Short rows are padded with `Null`,
    /// long rows are truncated to the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut values| {
                values.resize(width, Value::Null);
                Row::new(values)
            })
            .collect();
        Self { columns, rows }
    }

    /// Builds a dataset from name/value records.
    ///
    /// Column order is first-seen order across all records; a record lacking a
    /// column gets `Null` there. A repeated key inside one record keeps the last value.
    pub fn from_records<R, K, V>(records: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut sparse_rows: Vec<Vec<(usize, Value)>> = Vec::new();

        for record in records {
            let mut cells = Vec::new();
            for (key, value) in record {
                let key: String = key.into();
                let index = match positions.get(&key) {
                    Some(i) => *i,
                    None => {
                        let i = columns.len();
                        positions.insert(key.clone(), i);
                        columns.push(key);
                        i
                    }
                };
                cells.push((index, value.into()));
            }
            sparse_rows.push(cells);
        }

        let width = columns.len();
        let rows = sparse_rows
            .into_iter()
            .map(|cells| {
                let mut values = vec![Value::Null; width];
                for (index, value) in cells {
                    values[index] = value;
                }
                Row::new(values)
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Columns from `required` that this dataset lacks, in the order given.
    pub fn missing_columns<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        required
            .into_iter()
            .filter(|name| !self.has_column(name))
            .map(str::to_string)
            .collect()
    }

    /// Cell lookup by row position and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|r| r.get(index))
    }
}
