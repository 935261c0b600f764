pub mod stack;
pub mod value;
pub mod vm;

pub use value::{Value, ValueStore};
pub use vm::{VirtualMachine, VmState};
