//! Virtual Machine Core
//!
//! Executes a straight-line instruction sequence against a fresh operand
//! stack and collects the values emitted by `STORE`.

use tracing::{debug, instrument, trace};

use crate::bytecode::instruction::Instruction;
use crate::bytecode::opcode::OpCode;
use crate::config::VmConfig;
use crate::error::{VmError, VmResult};
use crate::function::FunctionTable;
use crate::output::ResultValue;

use super::stack::Stack;
use super::value::{Value, ValueKind};

/// Two-operand arithmetic with numeric promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn opcode(self) -> OpCode {
        match self {
            BinaryOp::Add => OpCode::Add,
            BinaryOp::Sub => OpCode::Sub,
            BinaryOp::Mul => OpCode::Mul,
            BinaryOp::Div => OpCode::Div,
        }
    }

    /// Integers wrap on overflow. Division truncates toward zero.
    fn apply_integer(self, left: i64, right: i64) -> VmResult<i64> {
        match self {
            BinaryOp::Add => Ok(left.wrapping_add(right)),
            BinaryOp::Sub => Ok(left.wrapping_sub(right)),
            BinaryOp::Mul => Ok(left.wrapping_mul(right)),
            BinaryOp::Div => {
                if right == 0 {
                    return Err(VmError::DivisionByZero);
                }
                Ok(left.wrapping_div(right))
            }
        }
    }

    fn apply_float(self, left: f64, right: f64) -> VmResult<f64> {
        match self {
            BinaryOp::Add => Ok(left + right),
            BinaryOp::Sub => Ok(left - right),
            BinaryOp::Mul => Ok(left * right),
            BinaryOp::Div => {
                if right == 0.0 {
                    return Err(VmError::DivisionByZero);
                }
                Ok(left / right)
            }
        }
    }

    /// Evaluate `left <op> right`, widening an integer paired with a float.
    fn evaluate(self, left: Value, right: Value) -> VmResult<Value> {
        match (&left, &right) {
            (Value::Integer(l), Value::Integer(r)) => {
                self.apply_integer(*l, *r).map(Value::Integer)
            }
            (Value::Float { value: l, .. }, Value::Float { value: r, .. }) => {
                self.apply_float(*l, *r).map(Value::float)
            }
            (Value::Float { value: l, .. }, Value::Integer(r)) => {
                self.apply_float(*l, *r as f64).map(Value::float)
            }
            (Value::Integer(l), Value::Float { value: r, .. }) => {
                self.apply_float(*l as f64, *r).map(Value::float)
            }
            _ => Err(VmError::UnsupportedOperandTypes {
                op: self.opcode(),
                left: left.kind(),
                right: right.kind(),
            }),
        }
    }
}

/// Mutable state owned by a single run
#[derive(Debug, Default)]
struct RunState {
    stack: Stack,
    results: Vec<ResultValue>,
}

/// Query expression virtual machine.
///
/// Holds only configuration and a borrowed function table, so one instance
/// can serve any number of runs. Each run gets its own stack and result
/// sequence.
#[derive(Debug)]
pub struct VirtualMachine<'t, T: ?Sized> {
    config: VmConfig,
    functions: &'t T,
}

impl<'t, T> VirtualMachine<'t, T>
where
    T: FunctionTable + ?Sized,
{
    /// Create a new VM instance
    pub fn new(config: VmConfig, functions: &'t T) -> Self {
        VirtualMachine { config, functions }
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    /// Execute `program` top to bottom.
    ///
    /// Returns the values emitted by `STORE` in emission order. The first
    /// failing instruction aborts the run and any partial output is dropped.
    #[instrument(level = "trace", skip_all, fields(instructions = program.len()))]
    pub fn run(&self, program: &[Instruction]) -> VmResult<Vec<ResultValue>> {
        let mut state = RunState::default();

        for (ip, instruction) in program.iter().enumerate() {
            if let Some(limit) = self.config.max_instructions {
                if ip >= limit {
                    return Err(VmError::BudgetExhausted { limit });
                }
            }
            trace!(ip, %instruction, depth = state.stack.len(), "execute");
            self.step(&mut state, instruction)?;
        }

        debug!(results = state.results.len(), "run complete");
        Ok(state.results)
    }

    /// Execute a single instruction
    fn step(&self, state: &mut RunState, instruction: &Instruction) -> VmResult<()> {
        match instruction.opcode {
            OpCode::Push => {
                state.stack.push(instruction.operand1.clone());
                Ok(())
            }
            OpCode::Pop => state.stack.pop().map(drop),

            OpCode::Add => Self::binary(state, BinaryOp::Add),
            OpCode::Sub => Self::binary(state, BinaryOp::Sub),
            OpCode::Mul => Self::binary(state, BinaryOp::Mul),
            OpCode::Div => Self::binary(state, BinaryOp::Div),
            OpCode::Mod => Self::modulo(state),

            OpCode::Store => {
                let value = state.stack.pop()?;
                match ResultValue::from_value(value) {
                    Some(result) => state.results.push(result),
                    None => trace!("non-numeric value dropped by STORE"),
                }
                Ok(())
            }

            OpCode::Call => self.call(state, &instruction.operand1),
        }
    }

    /// Right operand is on top of the stack
    fn binary(state: &mut RunState, op: BinaryOp) -> VmResult<()> {
        let right = state.stack.pop()?;
        let left = state.stack.pop()?;
        let value = op.evaluate(left, right)?;
        state.stack.push(value);
        Ok(())
    }

    /// Integer remainder.
    ///
    /// The divisor is read through its integer field, which every non-integer
    /// value leaves at zero, so anything but a nonzero `Integer` divisor fails
    /// with `DivisionByZero` before the left operand is popped.
    fn modulo(state: &mut RunState) -> VmResult<()> {
        let divisor = match state.stack.pop()? {
            Value::Integer(r) if r != 0 => r,
            _ => return Err(VmError::DivisionByZero),
        };
        match state.stack.pop()? {
            Value::Integer(l) => {
                state.stack.push(Value::Integer(l.wrapping_rem(divisor)));
                Ok(())
            }
            left => Err(VmError::UnsupportedOperandTypes {
                op: OpCode::Mod,
                left: left.kind(),
                right: ValueKind::Integer,
            }),
        }
    }

    /// Pops the argument count, then the arguments. Arguments are passed in
    /// pop order, so the last pushed argument comes first.
    ///
    /// The count and the name are read through their integer and string
    /// fields: a non-integer or negative count collects no arguments, and a
    /// non-string name looks up the empty name.
    fn call(&self, state: &mut RunState, name: &Value) -> VmResult<()> {
        let count = match state.stack.pop()? {
            Value::Integer(n) => usize::try_from(n).unwrap_or(0),
            _ => 0,
        };

        let mut args = Vec::with_capacity(count.min(state.stack.len()));
        for _ in 0..count {
            args.push(state.stack.pop()?);
        }

        let name = match name {
            Value::String(name) => name.as_str(),
            _ => "",
        };
        let function = self
            .functions
            .lookup(name)
            .ok_or_else(|| VmError::UnknownFunction { name: name.to_string() })?;

        let result = function.call(&args)?;
        trace!(function = %name, argc = args.len(), %result, "call returned");
        state.stack.push(Value::from(result));
        Ok(())
    }
}

/// Run `program` with the default configuration
pub fn run<T>(program: &[Instruction], functions: &T) -> VmResult<Vec<ResultValue>>
where
    T: FunctionTable + ?Sized,
{
    VirtualMachine::new(VmConfig::default(), functions).run(program)
}
