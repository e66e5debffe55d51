//! VM Error Types
//!
//! Defines every error condition a run of the query VM can end with.
//! All of them are terminal for the run that produced them.

use thiserror::Error;

use crate::bytecode::opcode::OpCode;
use crate::function::FunctionError;
use crate::vm::value::ValueKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VmError {
    // Stack errors
    #[error("stack underflow")]
    StackUnderflow,

    // Arithmetic errors
    #[error("unsupported operand types for {op}: {left} and {right}")]
    UnsupportedOperandTypes {
        op: OpCode,
        left: ValueKind,
        right: ValueKind,
    },

    #[error("division by zero")]
    DivisionByZero,

    // Function call errors
    #[error("function {name} is not implemented")]
    UnknownFunction { name: String },

    #[error(transparent)]
    Function(#[from] FunctionError),

    // Resource limits
    #[error("instruction budget of {limit} exhausted")]
    BudgetExhausted { limit: usize },
}

pub type VmResult<T> = Result<T, VmError>;
