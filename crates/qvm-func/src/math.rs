//! Numeric built-ins
//!
//! Every function takes its arguments in `CALL` pop order and restores
//! source order with [`source_order`] before reading them.

use qvm_core::Decimal;

use crate::{check_arity, numeric_arg, source_order};
use crate::{FunctionError, FunctionResult, ResultValue, Value};

fn unsupported(name: &str, index: usize, value: &Value) -> FunctionError {
    FunctionError::ArgumentType {
        name: name.to_string(),
        index,
        kind: value.kind(),
    }
}

fn out_of_range(name: &str, d: &Decimal) -> FunctionError {
    FunctionError::Domain {
        name: name.to_string(),
        message: format!("{} does not round to an integer in range", d),
    }
}

/// `ABS(x)`; keeps the argument's numeric shape
pub fn abs(args: &[Value]) -> FunctionResult<ResultValue> {
    check_arity("ABS", args, 1, 1)?;
    match &args[0] {
        Value::Integer(i) => Ok(ResultValue::Integral(i.wrapping_abs())),
        Value::Float { value, .. } => Ok(ResultValue::float(value.abs())),
        Value::Decimal(d) => Ok(ResultValue::Decimal(Decimal::new(
            d.integer.wrapping_abs(),
            d.fraction,
            d.fraction_digits,
        ))),
        other => Err(unsupported("ABS", 0, other)),
    }
}

/// `CEIL(x)`
pub fn ceil(args: &[Value]) -> FunctionResult<ResultValue> {
    check_arity("CEIL", args, 1, 1)?;
    match &args[0] {
        Value::Integer(i) => Ok(ResultValue::Integral(*i)),
        Value::Float { value, .. } => Ok(ResultValue::float(value.ceil())),
        Value::Decimal(d) if d.fraction != 0 && d.integer >= 0 => d
            .integer
            .checked_add(1)
            .map(ResultValue::Integral)
            .ok_or_else(|| out_of_range("CEIL", d)),
        Value::Decimal(d) => Ok(ResultValue::Integral(d.integer)),
        other => Err(unsupported("CEIL", 0, other)),
    }
}

/// `FLOOR(x)`
pub fn floor(args: &[Value]) -> FunctionResult<ResultValue> {
    check_arity("FLOOR", args, 1, 1)?;
    match &args[0] {
        Value::Integer(i) => Ok(ResultValue::Integral(*i)),
        Value::Float { value, .. } => Ok(ResultValue::float(value.floor())),
        Value::Decimal(d) if d.fraction != 0 && d.integer < 0 => d
            .integer
            .checked_sub(1)
            .map(ResultValue::Integral)
            .ok_or_else(|| out_of_range("FLOOR", d)),
        Value::Decimal(d) => Ok(ResultValue::Integral(d.integer)),
        other => Err(unsupported("FLOOR", 0, other)),
    }
}

/// `ROUND(x [, digits])`; halves round away from zero
pub fn round(args: &[Value]) -> FunctionResult<ResultValue> {
    check_arity("ROUND", args, 1, 2)?;
    let args = source_order(args);

    let digits = match args.get(1) {
        None => 0,
        Some(Value::Integer(d)) => i32::try_from(*d).map_err(|_| FunctionError::Domain {
            name: "ROUND".to_string(),
            message: format!("digit count {} out of range", d),
        })?,
        Some(other) => return Err(unsupported("ROUND", 1, other)),
    };

    match args[0] {
        Value::Integer(i) if digits >= 0 => Ok(ResultValue::Integral(*i)),
        value => {
            let x = numeric_arg("ROUND", 0, value)?;
            let scale = 10f64.powi(digits);
            Ok(ResultValue::float((x * scale).round() / scale))
        }
    }
}

/// `SQRT(x)`
pub fn sqrt(args: &[Value]) -> FunctionResult<ResultValue> {
    check_arity("SQRT", args, 1, 1)?;
    let x = numeric_arg("SQRT", 0, &args[0])?;
    if x < 0.0 {
        return Err(FunctionError::Domain {
            name: "SQRT".to_string(),
            message: format!("negative argument {}", x),
        });
    }
    Ok(ResultValue::float(x.sqrt()))
}

/// `POWER(base, exponent)`; integral when both are integers and the
/// exponent is non-negative
pub fn power(args: &[Value]) -> FunctionResult<ResultValue> {
    check_arity("POWER", args, 2, 2)?;
    let args = source_order(args);

    if let (Value::Integer(base), Value::Integer(exp)) = (args[0], args[1]) {
        if *exp >= 0 {
            let exp = u32::try_from(*exp).map_err(|_| FunctionError::Domain {
                name: "POWER".to_string(),
                message: format!("exponent {} out of range", exp),
            })?;
            return Ok(ResultValue::Integral(base.wrapping_pow(exp)));
        }
    }

    let base = numeric_arg("POWER", 0, args[0])?;
    let exp = numeric_arg("POWER", 1, args[1])?;
    Ok(ResultValue::float(base.powf(exp)))
}

/// `SIGN(x)`: -1, 0 or 1
pub fn sign(args: &[Value]) -> FunctionResult<ResultValue> {
    check_arity("SIGN", args, 1, 1)?;
    let sign = match &args[0] {
        Value::Integer(i) => i.signum(),
        Value::Decimal(d) if d.integer == 0 => i64::from(d.fraction != 0),
        value => {
            let x = numeric_arg("SIGN", 0, value)?;
            if x > 0.0 {
                1
            } else if x < 0.0 {
                -1
            } else {
                0
            }
        }
    };
    Ok(ResultValue::Integral(sign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qvm_core::ValueKind;

    #[test]
    fn abs_keeps_shape() {
        assert_eq!(abs(&[Value::Integer(-4)]), Ok(ResultValue::Integral(4)));
        assert_eq!(abs(&[Value::float(-1.5)]), Ok(ResultValue::float(1.5)));
        assert_eq!(
            abs(&[Value::Decimal(Decimal::new(-2, 5, 1))]),
            Ok(ResultValue::Decimal(Decimal::new(2, 5, 1)))
        );
        assert_eq!(
            abs(&[Value::string("x")]),
            Err(FunctionError::ArgumentType { name: "ABS".to_string(), index: 0, kind: ValueKind::String })
        );
    }

    #[test]
    fn ceil_and_floor() {
        assert_eq!(ceil(&[Value::float(1.2)]), Ok(ResultValue::float(2.0)));
        assert_eq!(floor(&[Value::float(-1.2)]), Ok(ResultValue::float(-2.0)));
        assert_eq!(ceil(&[Value::Decimal(Decimal::new(3, 1, 1))]), Ok(ResultValue::Integral(4)));
        assert_eq!(ceil(&[Value::Decimal(Decimal::new(-3, 1, 1))]), Ok(ResultValue::Integral(-3)));
        assert_eq!(floor(&[Value::Decimal(Decimal::new(-3, 1, 1))]), Ok(ResultValue::Integral(-4)));
        assert_eq!(floor(&[Value::Integer(9)]), Ok(ResultValue::Integral(9)));
    }

    #[test]
    fn ceil_and_floor_reject_results_past_i64() {
        assert!(matches!(
            ceil(&[Value::Decimal(Decimal::new(i64::MAX, 5, 1))]),
            Err(FunctionError::Domain { ref name, .. }) if name == "CEIL"
        ));
        assert!(matches!(
            floor(&[Value::Decimal(Decimal::new(i64::MIN, 5, 1))]),
            Err(FunctionError::Domain { ref name, .. }) if name == "FLOOR"
        ));
        assert_eq!(
            ceil(&[Value::Decimal(Decimal::new(i64::MAX, 0, 1))]),
            Ok(ResultValue::Integral(i64::MAX))
        );
        assert_eq!(
            floor(&[Value::Decimal(Decimal::new(i64::MIN, 0, 1))]),
            Ok(ResultValue::Integral(i64::MIN))
        );
    }

    fn assert_float(result: FunctionResult<ResultValue>, expected: f64) {
        match result {
            Ok(ResultValue::Float { value, .. }) => {
                assert!((value - expected).abs() < 1e-9, "{} != {}", value, expected)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn round_reads_digits_in_source_order() {
        // ROUND(2.346, 2) arrives as [2, 2.346]
        assert_float(round(&[Value::Integer(2), Value::float(2.346)]), 2.35);
        assert_eq!(round(&[Value::float(2.5)]), Ok(ResultValue::float(3.0)));
        assert_eq!(round(&[Value::Integer(7)]), Ok(ResultValue::Integral(7)));
        assert_float(round(&[Value::Integer(-1), Value::Integer(1234)]), 1230.0);
        assert!(matches!(
            round(&[Value::string("2"), Value::float(1.0)]),
            Err(FunctionError::ArgumentType { index: 1, .. })
        ));
    }

    #[test]
    fn sqrt_rejects_negative() {
        assert_eq!(sqrt(&[Value::Integer(9)]), Ok(ResultValue::float(3.0)));
        assert!(matches!(sqrt(&[Value::float(-1.0)]), Err(FunctionError::Domain { .. })));
    }

    #[test]
    fn power_argument_order() {
        // POWER(2, 10) arrives as [10, 2]
        assert_eq!(power(&[Value::Integer(10), Value::Integer(2)]), Ok(ResultValue::Integral(1024)));
        assert_eq!(power(&[Value::Integer(-1), Value::Integer(2)]), Ok(ResultValue::float(0.5)));
        assert_float(power(&[Value::float(0.5), Value::Integer(4)]), 2.0);
        assert!(matches!(power(&[Value::Integer(1)]), Err(FunctionError::Arity { .. })));
    }

    #[test]
    fn sign_of_each_shape() {
        assert_eq!(sign(&[Value::Integer(-8)]), Ok(ResultValue::Integral(-1)));
        assert_eq!(sign(&[Value::float(0.0)]), Ok(ResultValue::Integral(0)));
        assert_eq!(sign(&[Value::Decimal(Decimal::new(0, 5, 1))]), Ok(ResultValue::Integral(1)));
        assert_eq!(sign(&[Value::Decimal(Decimal::new(-2, 0, 0))]), Ok(ResultValue::Integral(-1)));
    }
}
