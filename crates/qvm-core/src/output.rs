//! Emitted Results
//!
//! Values that leave the VM, either stored by `STORE` or returned by a
//! function call. Only numeric shapes exist here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vm::value::{Decimal, Value};

/// One emitted column value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ResultValue {
    Integral(i64),

    Float {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decimal: Option<Decimal>,
    },

    Decimal(Decimal),
}

impl ResultValue {
    /// Plain float without decimal metadata
    pub fn float(value: f64) -> Self {
        ResultValue::Float {
            value,
            decimal: None,
        }
    }

    /// Convert a value popped by `STORE`.
    ///
    /// Strings and absent values have no result form and yield `None`.
    /// Floats are emitted as plain floats; their decimal parts are dropped.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(ResultValue::Integral(i)),
            Value::Float { value, .. } => Some(ResultValue::float(value)),
            Value::Decimal(d) => Some(ResultValue::Decimal(d)),
            Value::String(_) | Value::Absent => None,
        }
    }
}

/// Function results re-enter the stack unchanged in shape.
impl From<ResultValue> for Value {
    fn from(result: ResultValue) -> Self {
        match result {
            ResultValue::Integral(i) => Value::Integer(i),
            ResultValue::Float { value, decimal } => Value::Float { value, decimal },
            ResultValue::Decimal(d) => Value::Decimal(d),
        }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Integral(i) => write!(f, "{}", i),
            ResultValue::Float { value, .. } => write!(f, "{:.6}", value),
            ResultValue::Decimal(d) => write!(f, "{}", d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_conversion_drops_non_numeric() {
        assert_eq!(ResultValue::from_value(Value::Integer(3)), Some(ResultValue::Integral(3)));
        assert_eq!(ResultValue::from_value(Value::float(0.5)), Some(ResultValue::float(0.5)));
        assert_eq!(
            ResultValue::from_value(Value::Float {
                value: 1.5,
                decimal: Some(Decimal::new(1, 5, 1)),
            }),
            Some(ResultValue::float(1.5))
        );
        assert_eq!(
            ResultValue::from_value(Value::Decimal(Decimal::new(1, 25, 2))),
            Some(ResultValue::Decimal(Decimal::new(1, 25, 2)))
        );
        assert_eq!(ResultValue::from_value(Value::string("x")), None);
        assert_eq!(ResultValue::from_value(Value::Absent), None);
    }

    #[test]
    fn call_conversion_keeps_decimal_metadata_on_float() {
        let result = ResultValue::Float {
            value: 1.5,
            decimal: Some(Decimal::new(1, 5, 1)),
        };
        let value = Value::from(result);
        assert_eq!(
            value,
            Value::Float {
                value: 1.5,
                decimal: Some(Decimal::new(1, 5, 1)),
            }
        );
    }

    #[test]
    fn display() {
        assert_eq!(ResultValue::Integral(10).to_string(), "10");
        assert_eq!(ResultValue::float(0.25).to_string(), "0.250000");
        assert_eq!(ResultValue::Decimal(Decimal::new(0, 5, 3)).to_string(), "0.005");
    }
}
