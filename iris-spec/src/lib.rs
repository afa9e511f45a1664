//! # IRIS Reversible ISA
//!
//! 32-bit fixed-width instruction set for a reversible virtual machine.
//!
//! ## Key Features
//! - Every instruction has an exact inverse (floats: up to rounding)
//! - 32 scalar registers and 32 vector registers of 32 lanes
//! - Word-addressed memory whose last eighth is a garbage stack
//! - A direction bit flipped only by `RSWB`
//! - Four layouts: R, I, R3 and B

pub mod config;
pub mod encoding;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod register;

pub use config::{ConfigError, MemoryLayout};
pub use error::IrisError;
pub use instruction::{BranchCond, Instruction, Parity};
pub use opcode::{Format, Funct, Opcode, OpcodeClass};
pub use program::{Program, ProgramHeader};
pub use register::{Bank, Register, NUM_REGISTERS, VECTOR_LANES};

/// Register 0 holds this value after reset
pub const RESET_R0: i32 = 0;

/// Register 1 holds this value after reset
pub const RESET_R1: i32 = -1;
