//! Scalar and vector register files

use crate::functions::{Operand, Slot};
use iris_spec::{Bank, Register, NUM_REGISTERS, RESET_R0, RESET_R1, VECTOR_LANES};
use serde::{Deserialize, Serialize};

/// One vector register
pub type Lanes = [i32; VECTOR_LANES];

/// Both register files of one machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterFile {
    scalar: [i32; NUM_REGISTERS],
    vector: [Lanes; NUM_REGISTERS],
}

impl RegisterFile {
    /// Register files in their reset state (`r0 = 0`, `r1 = -1`)
    pub fn new() -> Self {
        let mut scalar = [0; NUM_REGISTERS];
        scalar[Register::ZERO.index()] = RESET_R0;
        scalar[Register::ONES.index()] = RESET_R1;

        Self {
            scalar,
            vector: [[0; VECTOR_LANES]; NUM_REGISTERS],
        }
    }

    #[inline]
    pub fn scalar(&self, reg: Register) -> i32 {
        self.scalar[reg.index()]
    }

    #[inline]
    pub fn set_scalar(&mut self, reg: Register, value: i32) {
        self.scalar[reg.index()] = value;
    }

    #[inline]
    pub fn lanes(&self, reg: Register) -> &Lanes {
        &self.vector[reg.index()]
    }

    #[inline]
    pub fn set_lanes(&mut self, reg: Register, lanes: Lanes) {
        self.vector[reg.index()] = lanes;
    }

    /// Read a slot
    ///
    /// # Panics
    /// If a lane index is not below [`VECTOR_LANES`].
    #[inline]
    pub fn get(&self, slot: Slot) -> i32 {
        match slot {
            Slot::Scalar(reg) => self.scalar[reg.index()],
            Slot::Lane(reg, lane) => self.vector[reg.index()][lane],
        }
    }

    /// Write a slot
    #[inline]
    pub fn set(&mut self, slot: Slot, value: i32) {
        match slot {
            Slot::Scalar(reg) => self.scalar[reg.index()] = value,
            Slot::Lane(reg, lane) => self.vector[reg.index()][lane] = value,
        }
    }

    /// Resolve a source operand to its value
    #[inline]
    pub fn operand(&self, operand: Operand) -> i32 {
        match operand {
            Operand::Slot(slot) => self.get(slot),
            Operand::Imm(value) => value,
        }
    }

    /// Swap two whole registers of one bank
    pub fn swap(&mut self, bank: Bank, a: Register, b: Register) {
        match bank {
            Bank::Scalar => self.scalar.swap(a.index(), b.index()),
            Bank::Vector => self.vector.swap(a.index(), b.index()),
        }
    }

    /// All scalar registers
    pub fn scalars(&self) -> &[i32; NUM_REGISTERS] {
        &self.scalar
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
