//! Register definitions for the IRIS reversible ISA

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of scalar registers (and of vector registers)
pub const NUM_REGISTERS: usize = 32;

/// Number of 32-bit lanes in one vector register
pub const VECTOR_LANES: usize = 32;

/// Register index (r0-r31 / v0-v31)
///
/// The same index names a scalar register or a vector register; which
/// file it refers to is decided by the instruction's [`Bank`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    R0 = 0,   // zero at reset
    R1 = 1,   // all ones (-1) at reset
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
    R8 = 8,
    R9 = 9,
    R10 = 10,
    R11 = 11,
    R12 = 12,
    R13 = 13,
    R14 = 14,
    R15 = 15,
    R16 = 16,
    R17 = 17,
    R18 = 18,
    R19 = 19,
    R20 = 20,
    R21 = 21,
    R22 = 22,
    R23 = 23,
    R24 = 24,
    R25 = 25,
    R26 = 26,
    R27 = 27,
    R28 = 28,
    R29 = 29,
    R30 = 30,
    R31 = 31,
}

impl Register {
    /// Holds 0 after machine reset
    pub const ZERO: Self = Self::R0;
    /// Holds -1 after machine reset
    pub const ONES: Self = Self::R1;

    pub const ALL: [Register; NUM_REGISTERS] = [
        Self::R0, Self::R1, Self::R2, Self::R3, Self::R4, Self::R5, Self::R6, Self::R7,
        Self::R8, Self::R9, Self::R10, Self::R11, Self::R12, Self::R13, Self::R14, Self::R15,
        Self::R16, Self::R17, Self::R18, Self::R19, Self::R20, Self::R21, Self::R22, Self::R23,
        Self::R24, Self::R25, Self::R26, Self::R27, Self::R28, Self::R29, Self::R30, Self::R31,
    ];

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Build a register from a 5-bit instruction field (upper bits ignored)
    #[inline]
    pub const fn from_field(field: u32) -> Self {
        Self::ALL[(field & 0x1F) as usize]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.index())
    }
}

/// Register file an instruction operates on
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bank {
    /// One 32-bit value per register
    Scalar,
    /// 32 independent lanes per register
    Vector,
}

impl Bank {
    #[inline]
    pub fn is_vector(self) -> bool {
        matches!(self, Bank::Vector)
    }

    /// Assembly prefix for registers of this bank
    pub fn register_prefix(self) -> char {
        match self {
            Bank::Scalar => 'r',
            Bank::Vector => 'v',
        }
    }
}
