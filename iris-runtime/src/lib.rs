//! # IRIS Runtime
//!
//! Execute IRIS programs on a reversible virtual machine.
//!
//! ## Features
//!
//! - **Forward and backward execution**: every instruction has an inverse,
//!   and `RSWB` flips the direction of a running program
//! - **32 scalar and 32 vector registers**: vector instructions apply the
//!   same function to all 32 lanes
//! - **Garbage stack**: deletes push the destroyed value so backward
//!   execution can restore it
//! - **Bounded runs**: HALT, a step budget, or stepping backward past
//!   the first instruction
//!
//! ## Example
//!
//! ```rust,no_run
//! use iris_runtime::{VM, VMConfig};
//! use iris_spec::encoding::encode;
//! use iris_spec::Instruction;
//!
//! let program = vec![encode(&Instruction::Halt) as i32];
//! let vm = VM::new(&program, VMConfig::default()).unwrap();
//! let result = vm.run().unwrap();
//! println!("Steps: {}", result.steps);
//! ```

pub mod error;
pub mod execute;
pub mod functions;
pub mod memory;
pub mod registers;
pub mod state;
pub mod vm;

pub use error::{InitError, RuntimeError};
pub use execute::{eval, execute, r_eval};
pub use functions::{Operand, Slot};
pub use memory::Memory;
pub use registers::RegisterFile;
pub use state::{Direction, HaltReason, RunStatus, VMState};
pub use vm::{ExecutionResult, VMConfig, VM};

/// Simple execution helper
///
/// Runs `program` from address 0 with the default step budget.
pub fn run(program: &[i32], memory_megabytes: usize) -> Result<ExecutionResult, RuntimeError> {
    let config = VMConfig {
        memory_megabytes,
        ..VMConfig::default()
    };
    VM::new(program, config)?.run()
}
