//! VM Stack Implementation
//!
//! Operand stack used during a single run.
//! No execution semantics.

use crate::error::{VmError, VmResult};
use super::value::Value;

/// VM operand stack
#[derive(Debug, Default)]
pub struct Stack {
    values: Vec<Value>,
}

impl Stack {
    /// Create an empty stack
    pub fn new() -> Self {
        Stack { values: Vec::new() }
    }

    /// Push value onto stack
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Pop value from stack
    pub fn pop(&mut self) -> VmResult<Value> {
        self.values.pop().ok_or(VmError::StackUnderflow)
    }

    /// Get current stack size
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
