//! Callable functions
//!
//! The seam between `CALL` and host-provided implementations. The VM only
//! looks functions up by name; it never owns or mutates the table.

use thiserror::Error;

use crate::output::ResultValue;
use crate::vm::value::{Value, ValueKind};

/// Failure reported by a function implementation.
///
/// The VM hands it back to the caller of `run` unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunctionError {
    #[error("{name}: expected {expected} argument(s), got {actual}")]
    Arity {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("{name}: unsupported type {kind} for argument {index}")]
    ArgumentType {
        name: String,
        index: usize,
        kind: ValueKind,
    },

    #[error("{name}: {message}")]
    Domain { name: String, message: String },

    #[error("{0}")]
    Other(String),
}

pub type FunctionResult<T> = Result<T, FunctionError>;

/// A function reachable through `CALL`.
///
/// `args` arrive in stack pop order: the last pushed argument is `args[0]`.
pub trait Function: Send + Sync {
    fn call(&self, args: &[Value]) -> FunctionResult<ResultValue>;
}

impl<F> Function for F
where
    F: Fn(&[Value]) -> FunctionResult<ResultValue> + Send + Sync,
{
    fn call(&self, args: &[Value]) -> FunctionResult<ResultValue> {
        self(args)
    }
}

/// Read-only name lookup used by the VM
pub trait FunctionTable {
    fn lookup(&self, name: &str) -> Option<&dyn Function>;
}
