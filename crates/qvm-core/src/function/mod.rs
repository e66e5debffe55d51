pub mod function;
pub mod registry;

pub use function::{Function, FunctionError, FunctionResult, FunctionTable};
pub use registry::FunctionRegistry;
