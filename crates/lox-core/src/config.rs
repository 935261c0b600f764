//! VM Configuration
//!
//! Stack height limit and execution tracing switch, fixed when the VM is
//! built and kept for every chunk it runs.

/// VM Configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmConfig {
    /// Maximum evaluation stack height
    pub max_stack_size: usize,

    /// Print the stack and each instruction to stderr before executing it
    pub trace_execution: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            max_stack_size: 1024,
            trace_execution: false,
        }
    }
}

impl VmConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace(mut self, trace_execution: bool) -> Self {
        self.trace_execution = trace_execution;
        self
    }

    pub fn with_max_stack_size(mut self, max_stack_size: usize) -> Self {
        self.max_stack_size = max_stack_size;
        self
    }
}
