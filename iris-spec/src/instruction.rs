//! IRIS Instruction Set
//!
//! 32-bit fixed-width instructions with a 6-bit opcode and 5-bit register fields.
//!
//! ## Instruction Formats
//! - R-type:  [rd:5][rs:5][imm/func:16][opcode:6]
//! - I-type:  [rd:5][imm:16][func:5][opcode:6]
//! - R3-type: [ra:5][rb:5][rc:5][func:11][opcode:6]
//! - B-type:  [rd:5][rs:5][offset:16][opcode:6]
//!
//! Every instruction has an inverse. Function instructions are inverted by
//! [`Funct::inverse`]; exchanges are self-inverse; deletes are undone by
//! popping the garbage stack; branch offsets are negated.

use crate::error::IrisError;
use crate::opcode::{Format, Funct, Opcode};
use crate::register::{Bank, Register};
use serde::{Deserialize, Serialize};

/// Two-register branch condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchCond {
    /// rd < rs (signed)
    Lt,
    /// rd < rs (unsigned)
    Ltu,
    /// rd >= rs (signed)
    Ge,
    /// rd >= rs (unsigned)
    Geu,
    /// rd == rs
    Eq,
    /// rd != rs
    Ne,
}

impl BranchCond {
    /// Evaluate the condition on two register values
    pub fn holds(self, a: i32, b: i32) -> bool {
        match self {
            BranchCond::Lt => a < b,
            BranchCond::Ltu => (a as u32) < (b as u32),
            BranchCond::Ge => a >= b,
            BranchCond::Geu => (a as u32) >= (b as u32),
            BranchCond::Eq => a == b,
            BranchCond::Ne => a != b,
        }
    }

    pub const fn opcode(self) -> Opcode {
        match self {
            BranchCond::Lt => Opcode::Blt,
            BranchCond::Ltu => Opcode::Bltu,
            BranchCond::Ge => Opcode::Bge,
            BranchCond::Geu => Opcode::Bgeu,
            BranchCond::Eq => Opcode::Beq,
            BranchCond::Ne => Opcode::Bne,
        }
    }
}

/// Single-register parity condition (BEVN / BODD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn holds(self, value: i32) -> bool {
        match self {
            Parity::Even => value & 1 == 0,
            Parity::Odd => value & 1 == 1,
        }
    }

    pub const fn opcode(self) -> Opcode {
        match self {
            Parity::Even => Opcode::Bevn,
            Parity::Odd => Opcode::Bodd,
        }
    }
}

/// IRIS Instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    // ========== Function library ==========
    /// rd = f(rd, rs), per lane for the vector bank
    Op { funct: Funct, bank: Bank, rd: Register, rs: Register },

    /// rd = f(rd, imm), imm broadcast for the vector bank
    OpImm { funct: Funct, bank: Bank, rd: Register, imm: i16 },

    /// rd = !rd
    Neg { bank: Bank, rd: Register },

    /// Swap the bits of ra and rb selected by rc
    Cswap { bank: Bank, ra: Register, rb: Register, rc: Register },

    /// Swap the bits of ra and rb selected by an immediate mask
    CswapImm { bank: Bank, ra: Register, rb: Register, mask: i16 },

    // ========== Exchange ==========
    /// Swap rd and rs
    Exch { bank: Bank, rd: Register, rs: Register },

    /// Swap rd with mem[base + offset] (per lane: mem[base + offset + lane])
    Mexch { bank: Bank, rd: Register, base: Register, offset: i16 },

    // ========== Delete ==========
    /// Push rd to the garbage stack and zero it
    Del { bank: Bank, rd: Register },

    /// Push mem[base + offset] to the garbage stack and zero it
    Mdel { bank: Bank, base: Register, offset: i16 },

    // ========== Control ==========
    /// br += offset if cond(rd, rs)
    Branch { cond: BranchCond, rd: Register, rs: Register, offset: i16 },

    /// br += offset if rd has the given parity
    BranchParity { parity: Parity, rd: Register, offset: i16 },

    /// Swap the branch register with rd
    Swb { rd: Register },

    /// Swap the branch register with rd and flip the direction bit
    Rswb { rd: Register },

    /// Stop execution
    Halt,
}

impl Instruction {
    /// Get the opcode of this instruction
    pub fn opcode(&self) -> Opcode {
        let vector = self.bank().map_or(false, Bank::is_vector);
        match self {
            Instruction::Op { .. } | Instruction::Neg { .. } | Instruction::Cswap { .. } => {
                if vector { Opcode::VSpecial } else { Opcode::Special }
            }
            Instruction::OpImm { .. } => {
                if vector { Opcode::VImm } else { Opcode::Imm }
            }
            Instruction::CswapImm { .. } => {
                if vector { Opcode::VCswapI } else { Opcode::CswapI }
            }
            Instruction::Exch { .. } => {
                if vector { Opcode::VExch } else { Opcode::Exch }
            }
            Instruction::Mexch { .. } => {
                if vector { Opcode::VMexch } else { Opcode::Mexch }
            }
            Instruction::Del { .. } => {
                if vector { Opcode::VDel } else { Opcode::Del }
            }
            Instruction::Mdel { .. } => {
                if vector { Opcode::VMdel } else { Opcode::Mdel }
            }
            Instruction::Branch { cond, .. } => cond.opcode(),
            Instruction::BranchParity { parity, .. } => parity.opcode(),
            Instruction::Swb { .. } => Opcode::Swb,
            Instruction::Rswb { .. } => Opcode::Rswb,
            Instruction::Halt => Opcode::Halt,
        }
    }

    /// Function code, for instructions that carry one
    pub fn funct(&self) -> Option<Funct> {
        match self {
            Instruction::Op { funct, .. } | Instruction::OpImm { funct, .. } => Some(*funct),
            Instruction::Neg { .. } => Some(Funct::Neg),
            Instruction::Cswap { .. } => Some(Funct::Cswap),
            _ => None,
        }
    }

    /// Register bank, for instructions that have a vector form
    pub fn bank(&self) -> Option<Bank> {
        match self {
            Instruction::Op { bank, .. }
            | Instruction::OpImm { bank, .. }
            | Instruction::Neg { bank, .. }
            | Instruction::Cswap { bank, .. }
            | Instruction::CswapImm { bank, .. }
            | Instruction::Exch { bank, .. }
            | Instruction::Mexch { bank, .. }
            | Instruction::Del { bank, .. }
            | Instruction::Mdel { bank, .. } => Some(*bank),
            _ => None,
        }
    }

    /// Resolved layout (CSWAP selects R3 even though its opcode is R-type)
    pub fn format(&self) -> Format {
        match self {
            Instruction::Cswap { .. } => Format::R3,
            _ => self.opcode().format(),
        }
    }

    /// Reject operand aliasing that has no inverse.
    ///
    /// A binary function applied to itself (`add r2, r2`), a CSWAP whose
    /// mask is one of the swapped registers, and a scalar MEXCH that
    /// overwrites its own base all lose the value needed to undo them.
    pub fn check_operands(&self) -> Result<(), IrisError> {
        let aliased = match *self {
            Instruction::Op { rd, rs, .. } => rd == rs,
            Instruction::Cswap { ra, rb, rc, .. } => rc == ra || rc == rb,
            Instruction::Mexch { bank: Bank::Scalar, rd, base, .. } => rd == base,
            _ => false,
        };
        if aliased {
            return Err(IrisError::AliasedOperands(self.mnemonic()));
        }
        Ok(())
    }

    /// Get mnemonic string
    pub fn mnemonic(&self) -> String {
        match self {
            Instruction::Op { funct, bank, .. } => vector_mnemonic(*bank, funct.mnemonic()),
            Instruction::OpImm { funct, bank, .. } => {
                vector_mnemonic(*bank, &format!("{}i", funct.mnemonic()))
            }
            Instruction::Neg { bank, .. } => vector_mnemonic(*bank, "neg"),
            Instruction::Cswap { bank, .. } => vector_mnemonic(*bank, "cswap"),
            _ => self.opcode().mnemonic().to_string(),
        }
    }
}

fn vector_mnemonic(bank: Bank, base: &str) -> String {
    match bank {
        Bank::Scalar => base.to_string(),
        Bank::Vector => format!("v{}", base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_mapping() {
        let add = Instruction::Op {
            funct: Funct::Add,
            bank: Bank::Scalar,
            rd: Register::R1,
            rs: Register::R2,
        };
        assert_eq!(add.opcode(), Opcode::Special);

        let vaddi = Instruction::OpImm {
            funct: Funct::Add,
            bank: Bank::Vector,
            rd: Register::R1,
            imm: 5,
        };
        assert_eq!(vaddi.opcode(), Opcode::VImm);

        let vdel = Instruction::Del { bank: Bank::Vector, rd: Register::R3 };
        assert_eq!(vdel.opcode(), Opcode::VDel);

        assert_eq!(Instruction::Halt.opcode(), Opcode::Halt);
    }

    #[test]
    fn test_format_of_cswap_is_r3() {
        let cswap = Instruction::Cswap {
            bank: Bank::Scalar,
            ra: Register::R1,
            rb: Register::R2,
            rc: Register::R3,
        };
        assert_eq!(cswap.opcode(), Opcode::Special);
        assert_eq!(cswap.format(), Format::R3);
    }

    #[test]
    fn test_branch_conditions() {
        assert!(BranchCond::Lt.holds(-1, 0));
        assert!(!BranchCond::Ltu.holds(-1, 0));
        assert!(BranchCond::Geu.holds(-1, 0));
        assert!(BranchCond::Eq.holds(7, 7));
        assert!(BranchCond::Ne.holds(7, 8));
        assert!(Parity::Odd.holds(-3));
        assert!(Parity::Even.holds(-4));
    }

    #[test]
    fn test_mnemonics() {
        let vaddi = Instruction::OpImm {
            funct: Funct::Add,
            bank: Bank::Vector,
            rd: Register::R1,
            imm: 5,
        };
        assert_eq!(vaddi.mnemonic(), "vaddi");
        assert_eq!(Instruction::Swb { rd: Register::R4 }.mnemonic(), "swb");
    }

    #[test]
    fn test_aliased_operands_rejected() {
        let add = Instruction::Op {
            funct: Funct::Add,
            bank: Bank::Vector,
            rd: Register::R2,
            rs: Register::R2,
        };
        assert!(matches!(add.check_operands(), Err(IrisError::AliasedOperands(m)) if m == "vadd"));

        let cswap = Instruction::Cswap {
            bank: Bank::Scalar,
            ra: Register::R1,
            rb: Register::R2,
            rc: Register::R2,
        };
        assert!(cswap.check_operands().is_err());

        let mexch = Instruction::Mexch {
            bank: Bank::Scalar,
            rd: Register::R3,
            base: Register::R3,
            offset: 4,
        };
        assert!(mexch.check_operands().is_err());
    }

    #[test]
    fn test_harmless_aliasing_accepted() {
        // Vector MEXCH takes its base from the scalar file
        let vmexch = Instruction::Mexch {
            bank: Bank::Vector,
            rd: Register::R3,
            base: Register::R3,
            offset: 4,
        };
        let exch = Instruction::Exch {
            bank: Bank::Scalar,
            rd: Register::R5,
            rs: Register::R5,
        };
        let cswap = Instruction::Cswap {
            bank: Bank::Scalar,
            ra: Register::R1,
            rb: Register::R1,
            rc: Register::R2,
        };
        let addi = Instruction::OpImm {
            funct: Funct::Add,
            bank: Bank::Scalar,
            rd: Register::R2,
            imm: 2,
        };
        for instr in [vmexch, exch, cswap, addi] {
            assert_eq!(instr.check_operands().ok(), Some(()), "{:?}", instr);
        }
    }
}
