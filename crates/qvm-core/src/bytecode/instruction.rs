//! Bytecode Instruction Representation
//!
//! Defines the instruction format consumed by the VM.
//! This layer contains no execution semantics.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::opcode::OpCode;
use crate::vm::value::Value;

/// One straight-line program step.
///
/// Unused operands are [`Value::Absent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: OpCode,
    #[serde(default)]
    pub operand1: Value,
    #[serde(default)]
    pub operand2: Value,
}

impl Instruction {
    /// Create an instruction with no operand
    pub fn new(opcode: OpCode) -> Self {
        Instruction {
            opcode,
            operand1: Value::Absent,
            operand2: Value::Absent,
        }
    }

    /// Create an instruction with a single operand
    pub fn with_operand(opcode: OpCode, operand: impl Into<Value>) -> Self {
        Instruction {
            opcode,
            operand1: operand.into(),
            operand2: Value::Absent,
        }
    }

    /// Create an instruction with both operands
    pub fn with_operands(opcode: OpCode, operand1: impl Into<Value>, operand2: impl Into<Value>) -> Self {
        Instruction {
            opcode,
            operand1: operand1.into(),
            operand2: operand2.into(),
        }
    }

    pub fn push(value: impl Into<Value>) -> Self {
        Self::with_operand(OpCode::Push, value)
    }

    pub fn pop() -> Self {
        Self::new(OpCode::Pop)
    }

    pub fn add() -> Self {
        Self::new(OpCode::Add)
    }

    pub fn sub() -> Self {
        Self::new(OpCode::Sub)
    }

    pub fn mul() -> Self {
        Self::new(OpCode::Mul)
    }

    pub fn div() -> Self {
        Self::new(OpCode::Div)
    }

    pub fn rem() -> Self {
        Self::new(OpCode::Mod)
    }

    pub fn store() -> Self {
        Self::new(OpCode::Store)
    }

    /// `CALL name`; the argument count must already be on the stack
    pub fn call(name: impl Into<String>) -> Self {
        Self::with_operand(OpCode::Call, Value::String(name.into()))
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Value) -> fmt::Result {
    match operand {
        Value::Integer(_) | Value::Float { .. } | Value::String(_) => write!(f, " {}", operand),
        // not part of the listing format
        Value::Decimal(_) | Value::Absent => Ok(()),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        write_operand(f, &self.operand1)?;
        write_operand(f, &self.operand2)
    }
}
