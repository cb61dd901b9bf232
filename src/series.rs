//! A single named column of cell values.

use std::collections::HashSet;

use crate::value::{Value, ValueKind};

/// A named, ordered column of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    name: Option<String>,
    values: Vec<Value>,
}

impl Series {
    /// Create a new series from values
    pub fn new(values: Vec<Value>, name: Option<String>) -> Self {
        Self { name, values }
    }

    /// Create a series by parsing raw text fields
    pub fn from_strings(fields: Vec<String>, name: Option<String>) -> Self {
        let values = fields.iter().map(|f| Value::parse(f)).collect();
        Self { name, values }
    }

    /// Get the series name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the series renamed
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of values in the series
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at `idx`, if in bounds
    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// Appends a value
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Promoted kind of the column
    pub fn kind(&self) -> ValueKind {
        self.values
            .iter()
            .fold(ValueKind::Null, |kind, value| kind.promote(value.kind()))
    }

    /// Number of missing values
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Number of distinct non-null values
    pub fn distinct_count(&self) -> usize {
        let mut seen = HashSet::new();
        for value in &self.values {
            if let Some(key) = value.distinct_key() {
                seen.insert(key);
            }
        }
        seen.len()
    }

    /// Coerces every value to a numeric reading; values without one become
    /// missing.
    pub fn to_numeric(&self) -> Series {
        let values = self
            .values
            .iter()
            .map(|value| match value {
                Value::Int(i) => Value::Int(*i),
                Value::Float(f) => Value::Float(*f),
                Value::Str(s) => match Value::parse(s) {
                    Value::Int(i) => Value::Int(i),
                    Value::Float(f) => Value::Float(f),
                    _ => Value::Null,
                },
                Value::Null => Value::Null,
            })
            .collect();
        Series {
            name: self.name.clone(),
            values,
        }
    }

    /// The non-null numeric values, in order
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }

    /// Returns the series with missing values replaced by `fill`
    pub fn fill_null(&self, fill: Value) -> Series {
        let values = self
            .values
            .iter()
            .map(|value| {
                if value.is_null() {
                    fill.clone()
                } else {
                    value.clone()
                }
            })
            .collect();
        Series {
            name: self.name.clone(),
            values,
        }
    }
}
