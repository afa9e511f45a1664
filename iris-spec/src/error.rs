//! # Error Types for the IRIS ISA

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IrisError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    // Program format errors
    #[error("Invalid program magic: expected 0x49524953, got {0:#010x}")]
    InvalidMagic(u32),

    #[error("Invalid program version: expected {expected:#010x}, found {found:#010x}")]
    InvalidVersion { expected: u32, found: u32 },

    #[error("Invalid header size: expected {expected} bytes, found {found} bytes")]
    InvalidHeaderSize { expected: usize, found: usize },

    #[error("Invalid program size: expected {expected} bytes, found {found} bytes")]
    InvalidProgramSize { expected: usize, found: usize },

    // Instruction errors
    #[error("Operands of {0} alias each other and cannot be uncomputed")]
    AliasedOperands(String),
}
