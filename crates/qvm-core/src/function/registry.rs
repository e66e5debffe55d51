//! Function Registry
//!
//! Name-keyed table of functions handed to the VM.
//! Names are matched exactly; an unregistered name is simply absent.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::function::{Function, FunctionTable};

/// Default [`FunctionTable`] implementation.
///
/// Cloning shares the underlying functions.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn Function>>,
}

impl FunctionRegistry {
    /// New registry has no functions
    pub fn new() -> Self {
        FunctionRegistry {
            functions: HashMap::new(),
        }
    }

    /// Register `function` under `name`, replacing any previous entry
    pub fn register(&mut self, name: impl Into<String>, function: impl Function + 'static) {
        let name = name.into();
        debug!(function = %name, "function registered");
        self.functions.insert(name, Arc::new(function));
    }

    /// Remove a function
    pub fn unregister(&mut self, name: &str) -> bool {
        self.functions.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FunctionTable for FunctionRegistry {
    fn lookup(&self, name: &str) -> Option<&dyn Function> {
        self.functions.get(name).map(|f| f.as_ref())
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{FunctionError, FunctionResult};
    use crate::output::ResultValue;
    use crate::vm::value::Value;

    fn count(args: &[Value]) -> FunctionResult<ResultValue> {
        Ok(ResultValue::Integral(args.len() as i64))
    }

    #[test]
    fn lookup_is_exact() {
        let mut registry = FunctionRegistry::new();
        registry.register("COUNT", count);

        assert!(registry.lookup("COUNT").is_some());
        assert!(registry.lookup("count").is_none());
        assert!(registry.lookup("MISSING").is_none());
    }

    #[test]
    fn registered_function_is_callable() {
        let mut registry = FunctionRegistry::new();
        registry.register("COUNT", count);
        registry.register("FAIL", |_: &[Value]| -> FunctionResult<ResultValue> {
            Err(FunctionError::Other("boom".to_string()))
        });

        let f = registry.lookup("COUNT").expect("registered");
        assert_eq!(f.call(&[Value::Integer(1), Value::Absent]), Ok(ResultValue::Integral(2)));

        let f = registry.lookup("FAIL").expect("registered");
        assert_eq!(f.call(&[]), Err(FunctionError::Other("boom".to_string())));
    }

    #[test]
    fn register_replaces_and_unregister_removes() {
        let mut registry = FunctionRegistry::new();
        registry.register("F", count);
        registry.register("F", |_: &[Value]| -> FunctionResult<ResultValue> {
            Ok(ResultValue::Integral(-1))
        });
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.lookup("F").expect("registered").call(&[]),
            Ok(ResultValue::Integral(-1))
        );

        assert!(registry.unregister("F"));
        assert!(!registry.unregister("F"));
        assert!(registry.is_empty());
    }

    #[test]
    fn names_sorted() {
        let mut registry = FunctionRegistry::new();
        registry.register("SQRT", count);
        registry.register("ABS", count);
        assert_eq!(registry.names(), vec!["ABS", "SQRT"]);
    }
}
