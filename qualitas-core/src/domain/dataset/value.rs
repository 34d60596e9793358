// qualitas-core/src/domain/dataset/value.rs

use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A single spreadsheet cell.
///
/// Empty cells and absent fields are both `Null`. Coercions used by the
/// quality rules live here so they can be tested in one place:
/// - [`Value::as_text`] gives the text form used by equality and substring checks,
/// - [`Value::as_number`] gives the numeric form used by threshold checks.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// A cell read from a text export. The trimmed text is kept as-is, so
    /// `0042` and 17-digit order numbers survive; numeric rules convert it
    /// on demand through [`Value::as_number`]. Empty -> `Null`.
    pub fn from_cell(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Value::Null
        } else {
            Value::Text(trimmed.to_string())
        }
    }

    /// Text form of the cell. `Null` has none.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(format_number(*n))),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        }
    }

    /// The number as an integer when it has no fractional part and fits
    /// losslessly (|n| < 2^53).
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => Some(*n as i64),
            _ => None,
        }
    }

    /// Numeric form of the cell.
    ///
    /// Text is accepted when it parses as a finite number after trimming; a single
    /// decimal comma (`"1,5"`) is read as a decimal point. Booleans and `Null`
    /// have no numeric form.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => parse_lenient_number(s),
            Value::Bool(_) | Value::Null => None,
        }
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

fn parse_lenient_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = match trimmed.parse::<f64>() {
        Ok(n) => Some(n),
        Err(_) if trimmed.matches(',').count() == 1 && !trimmed.contains('.') => {
            trimmed.replace(',', ".").parse::<f64>().ok()
        }
        Err(_) => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Integral values print without a trailing `.0` so `5` reads like the spreadsheet cell.
fn format_number(n: f64) -> String {
    match Value::Number(n).as_integer() {
        Some(i) => i.to_string(),
        None => n.to_string(),
    }
}

// Integral numbers serialize as integers, so reports show `5` rather than `5.0`.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match self.as_integer() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => f.write_str("null"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// Hashable identity of a [`Value`], used for grouping.
///
/// Values of different kinds never collide: the number `1` and the text `"1"`
/// are distinct keys. `-0.0` and `0.0` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
    Null,
    Bool(bool),
    Number(u64),
    Text(String),
}

impl From<&Value> for ValueKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => ValueKey::Null,
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Number(n) => {
                let normalized = if *n == 0.0 { 0.0 } else { *n };
                ValueKey::Number(normalized.to_bits())
            }
            Value::Text(s) => ValueKey::Text(s.clone()),
        }
    }
}
