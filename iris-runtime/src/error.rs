//! Runtime error types for the IRIS machine

use iris_disassembler::DisassemblerError;
use iris_spec::{ConfigError, IrisError};
use thiserror::Error;

/// Failures while building a machine image
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("Program of {program_size} words exceeds the working region of {limit} words")]
    ProgramTooLarge { program_size: usize, limit: usize },

    #[error("Program size mismatch: declared {declared} words, found {actual}")]
    ProgramSizeMismatch { declared: usize, actual: usize },

    #[error("Invalid memory configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Initialization failed: {0}")]
    Init(#[from] InitError),

    #[error("Decode error at PC {pc:#x}: {source}")]
    Decode {
        pc: i64,
        #[source]
        source: DisassemblerError,
    },

    #[error("Garbage stack overflow: capacity {capacity} words")]
    GarbageOverflow { capacity: usize },

    #[error("Garbage stack underflow")]
    GarbageUnderflow,

    #[error("Memory out of bounds: address {address:#x}")]
    AddressOutOfBounds { address: i64 },

    #[error("PC out of bounds: {pc:#x}")]
    PcOutOfBounds { pc: i64 },

    #[error("Division by zero at PC {pc:#x}")]
    DivisionByZero { pc: i64 },

    #[error("Program error: {0}")]
    SpecError(#[from] IrisError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
