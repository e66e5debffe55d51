//! Built-in function table for the query VM
//!
//! The host side of `CALL`: a small set of numeric functions and the
//! argument helpers they share. The VM stays unaware of any of them; callers
//! hand [`builtins`] (or their own registry) to `qvm_core::run`.

use tracing::debug;

pub use qvm_core::{FunctionError, FunctionRegistry, FunctionResult, ResultValue, Value};

pub mod math;

/// Names registered by [`register_builtins`]
pub const BUILTIN_NAMES: [&str; 7] = ["ABS", "CEIL", "FLOOR", "ROUND", "SQRT", "POWER", "SIGN"];

/// Registry holding every built-in function
pub fn builtins() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    register_builtins(&mut registry);
    registry
}

/// Add the built-in functions to an existing registry, replacing entries
/// with the same names.
pub fn register_builtins(registry: &mut FunctionRegistry) {
    registry.register("ABS", math::abs);
    registry.register("CEIL", math::ceil);
    registry.register("FLOOR", math::floor);
    registry.register("ROUND", math::round);
    registry.register("SQRT", math::sqrt);
    registry.register("POWER", math::power);
    registry.register("SIGN", math::sign);
    debug!(count = BUILTIN_NAMES.len(), "built-in functions registered");
}

/// Put `CALL` arguments back in the order they were written.
///
/// The VM hands arguments over in pop order, last pushed first.
pub fn source_order(args: &[Value]) -> Vec<&Value> {
    args.iter().rev().collect()
}

/// Fail unless `args.len()` lies in `min..=max`
pub fn check_arity(name: &str, args: &[Value], min: usize, max: usize) -> FunctionResult<()> {
    let actual = args.len();
    if actual < min {
        return Err(FunctionError::Arity { name: name.to_string(), expected: min, actual });
    }
    if actual > max {
        return Err(FunctionError::Arity { name: name.to_string(), expected: max, actual });
    }
    Ok(())
}

/// Numeric view of an argument. `index` is the source-order position.
pub fn numeric_arg(name: &str, index: usize, value: &Value) -> FunctionResult<f64> {
    match value {
        Value::Integer(i) => Ok(*i as f64),
        Value::Float { value, .. } => Ok(*value),
        Value::Decimal(d) => {
            let fraction = d.fraction as f64 / 10f64.powi(d.fraction_digits as i32);
            if d.integer < 0 {
                Ok(d.integer as f64 - fraction)
            } else {
                Ok(d.integer as f64 + fraction)
            }
        }
        other => Err(FunctionError::ArgumentType {
            name: name.to_string(),
            index,
            kind: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qvm_core::{Decimal, FunctionTable, ValueKind};

    #[test]
    fn builtins_registers_every_name() {
        let registry = builtins();
        assert_eq!(registry.len(), BUILTIN_NAMES.len());
        for name in BUILTIN_NAMES {
            assert!(registry.lookup(name).is_some(), "{} missing", name);
        }
    }

    #[test]
    fn source_order_reverses_pop_order() {
        let popped = vec![Value::Integer(2), Value::Integer(1)];
        assert_eq!(source_order(&popped), vec![&Value::Integer(1), &Value::Integer(2)]);
    }

    #[test]
    fn arity_bounds() {
        let args = vec![Value::Integer(1), Value::Integer(2)];
        assert_eq!(check_arity("F", &args, 1, 2), Ok(()));
        assert_eq!(
            check_arity("F", &args, 1, 1),
            Err(FunctionError::Arity { name: "F".to_string(), expected: 1, actual: 2 })
        );
        assert_eq!(
            check_arity("F", &[], 1, 2),
            Err(FunctionError::Arity { name: "F".to_string(), expected: 1, actual: 0 })
        );
    }

    #[test]
    fn numeric_arg_accepts_numbers_only() {
        assert_eq!(numeric_arg("F", 0, &Value::Integer(3)), Ok(3.0));
        assert_eq!(numeric_arg("F", 0, &Value::float(0.5)), Ok(0.5));
        assert_eq!(numeric_arg("F", 0, &Value::Decimal(Decimal::new(-1, 25, 2))), Ok(-1.25));
        assert_eq!(
            numeric_arg("F", 1, &Value::string("x")),
            Err(FunctionError::ArgumentType { name: "F".to_string(), index: 1, kind: ValueKind::String })
        );
    }
}
