//! VM Configuration
//!
//! Defines per-run limits for the query VM.
//! Configuration specifies constraints only; enforcement is handled by the VM.

/// VM Configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmConfig {
    /// Maximum number of instructions a single run may execute.
    /// `None` means unbounded.
    pub max_instructions: Option<usize>,
}

impl VmConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_instructions(mut self, limit: usize) -> Self {
        self.max_instructions = Some(limit);
        self
    }
}
