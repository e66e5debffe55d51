//! Query Expression VM - Core Library
//!
//! Public API surface for the qvm core: instructions, values, the function
//! table seam and the executor.

pub mod error;
pub mod config;
pub mod bytecode;
pub mod vm;
pub mod output;
pub mod function;

// Re-export commonly used types
pub use error::{VmError, VmResult};
pub use config::VmConfig;
pub use bytecode::{Instruction, OpCode};
pub use vm::{run, Decimal, Value, ValueKind, VirtualMachine};
pub use output::ResultValue;
pub use function::{Function, FunctionError, FunctionRegistry, FunctionResult, FunctionTable};
