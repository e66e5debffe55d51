pub mod stack;
pub mod value;
pub mod vm;

pub use vm::{run, VirtualMachine};
pub use value::{Decimal, Value, ValueKind};
