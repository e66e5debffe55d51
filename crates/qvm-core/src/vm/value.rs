//! Runtime Value Representation
//!
//! Defines the values that flow through the VM stack and appear as
//! instruction operands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed-point decimal kept as its source parts.
///
/// `3.05` is `{ integer: 3, fraction: 5, fraction_digits: 2 }`. The VM never
/// turns a decimal into a float; it only carries it to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decimal {
    pub integer: i64,
    pub fraction: u64,
    pub fraction_digits: u32,
}

impl Decimal {
    pub fn new(integer: i64, fraction: u64, fraction_digits: u32) -> Self {
        Decimal {
            integer,
            fraction,
            fraction_digits,
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fraction_digits == 0 {
            return write!(f, "{}", self.integer);
        }
        write!(
            f,
            "{}.{:0width$}",
            self.integer,
            self.fraction,
            width = self.fraction_digits as usize
        )
    }
}

/// Runtime value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Signed 64-bit integer
    Integer(i64),

    /// IEEE 754 double, optionally carrying the decimal it was produced from
    Float {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decimal: Option<Decimal>,
    },

    /// Decimal kept as parts
    Decimal(Decimal),

    /// Text
    String(String),

    /// Unused operand / no value
    #[default]
    Absent,
}

impl Value {
    /// Plain float without decimal metadata
    pub fn float(value: f64) -> Self {
        Value::Float {
            value,
            decimal: None,
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Float { .. } => ValueKind::Float,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::String(_) => ValueKind::String,
            Value::Absent => ValueKind::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::float(v)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float { value, .. } => write!(f, "{:.6}", value),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "{}", s),
            Value::Absent => write!(f, "NA"),
        }
    }
}

/// Type tag of a [`Value`], used in error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Float,
    Decimal,
    String,
    Absent,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "INTEGER",
            ValueKind::Float => "FLOAT",
            ValueKind::Decimal => "DECIMAL",
            ValueKind::String => "STRING",
            ValueKind::Absent => "NA",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::Integer(1).kind(), ValueKind::Integer);
        assert_eq!(Value::float(1.5).kind(), ValueKind::Float);
        assert_eq!(Value::Decimal(Decimal::new(1, 5, 1)).kind(), ValueKind::Decimal);
        assert_eq!(Value::string("x").kind(), ValueKind::String);
        assert_eq!(Value::default().kind(), ValueKind::Absent);
    }

    #[test]
    fn decimal_display_pads_fraction() {
        assert_eq!(Decimal::new(3, 5, 2).to_string(), "3.05");
        assert_eq!(Decimal::new(-12, 250, 3).to_string(), "-12.250");
        assert_eq!(Decimal::new(7, 0, 0).to_string(), "7");
    }

    #[test]
    fn float_display_uses_six_digits() {
        assert_eq!(Value::float(2.5).to_string(), "2.500000");
        assert_eq!(Value::Integer(-4).to_string(), "-4");
    }

    #[test]
    fn value_json_shape() {
        let json = serde_json::to_string(&Value::Integer(42)).unwrap();
        assert_eq!(json, r#"{"type":"integer","value":42}"#);

        let back: Value = serde_json::from_str(r#"{"type":"float","value":{"value":1.5}}"#).unwrap();
        assert_eq!(back, Value::float(1.5));

        let absent: Value = serde_json::from_str(r#"{"type":"absent"}"#).unwrap();
        assert!(absent.is_absent());
    }
}
