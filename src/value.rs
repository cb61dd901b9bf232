//! Scalar cell values and column typing.

use std::fmt;

/// A single cell in a tabular dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value
    Null,
    /// 64-bit integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// Text
    Str(String),
}

impl Value {
    /// Parses a raw text field, inferring the narrowest type.
    ///
    /// Empty fields are missing values; integer readings are preferred over
    /// float readings. Non-finite float readings stay text.
    pub fn parse(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }
        Value::Str(field.to_string())
    }

    /// Check if the value is missing
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Null | Value::Str(_) => None,
        }
    }

    /// The kind of this single value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
        }
    }

    /// Stable key for distinct counting; missing values have none.
    pub(crate) fn distinct_key(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Int(i) => Some(format!("i:{}", i)),
            Value::Float(f) => Some(format!("f:{}", f.to_bits())),
            Value::Str(s) => Some(format!("s:{}", s)),
        }
    }
}

impl fmt::Display for Value {
    /// Missing values render as the empty string, matching CSV output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

// Automatic conversion from Option<T>: absence becomes a missing value
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Promoted type of a column of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// All values missing (or no values)
    Null,
    Int,
    Float,
    Str,
}

impl ValueKind {
    /// Joins two kinds into the narrowest kind holding both.
    ///
    /// Integers widen to floats; anything mixed with text is text.
    pub fn promote(self, other: ValueKind) -> ValueKind {
        use ValueKind::*;
        match (self, other) {
            (Null, k) | (k, Null) => k,
            (Int, Int) => Int,
            (Int, Float) | (Float, Int) | (Float, Float) => Float,
            _ => Str,
        }
    }

    /// SQL column type used when materializing a frame as a table.
    pub fn sql_type(self) -> &'static str {
        match self {
            ValueKind::Int => "INTEGER",
            ValueKind::Float => "REAL",
            ValueKind::Null | ValueKind::Str => "TEXT",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => write!(f, "null"),
            ValueKind::Int => write!(f, "integer"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::Str => write!(f, "string"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_infers_narrowest_type() {
        assert_eq!(Value::parse("42"), Value::Int(42));
        assert_eq!(Value::parse(" 4.5 "), Value::Float(4.5));
        assert_eq!(Value::parse("hello"), Value::Str("hello".to_string()));
        assert_eq!(Value::parse(""), Value::Null);
        assert_eq!(Value::parse("   "), Value::Null);
        // Non-finite readings stay text
        assert_eq!(Value::parse("NaN"), Value::Str("NaN".to_string()));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_kind_promotion() {
        assert_eq!(ValueKind::Null.promote(ValueKind::Int), ValueKind::Int);
        assert_eq!(ValueKind::Int.promote(ValueKind::Float), ValueKind::Float);
        assert_eq!(ValueKind::Float.promote(ValueKind::Str), ValueKind::Str);
    }
}
