//! Instruction formatting to assembly text

use iris_spec::{Bank, Instruction, Register};

/// Format instruction as assembly text
pub fn format(instr: &Instruction) -> String {
    let mnemonic = instr.mnemonic();

    match *instr {
        Instruction::Op { bank, rd, rs, .. } | Instruction::Exch { bank, rd, rs } => {
            format!("{} {}, {}", mnemonic, format_reg(bank, rd), format_reg(bank, rs))
        }
        Instruction::OpImm { bank, rd, imm, .. } => {
            format!("{} {}, {}", mnemonic, format_reg(bank, rd), imm)
        }
        Instruction::Neg { bank, rd } | Instruction::Del { bank, rd } => {
            format!("{} {}", mnemonic, format_reg(bank, rd))
        }
        Instruction::Cswap { bank, ra, rb, rc } => format!(
            "{} {}, {}, {}",
            mnemonic,
            format_reg(bank, ra),
            format_reg(bank, rb),
            format_reg(bank, rc)
        ),
        Instruction::CswapImm { bank, ra, rb, mask } => format!(
            "{} {}, {}, {:#06x}",
            mnemonic,
            format_reg(bank, ra),
            format_reg(bank, rb),
            mask as u16
        ),
        Instruction::Mexch { bank, rd, base, offset } => format!(
            "{} {}, {}({})",
            mnemonic,
            format_reg(bank, rd),
            offset,
            format_reg(Bank::Scalar, base)
        ),
        Instruction::Mdel { base, offset, .. } => {
            format!("{} {}({})", mnemonic, offset, format_reg(Bank::Scalar, base))
        }
        Instruction::Branch { rd, rs, offset, .. } => format!(
            "{} {}, {}, {}",
            mnemonic,
            format_reg(Bank::Scalar, rd),
            format_reg(Bank::Scalar, rs),
            offset
        ),
        Instruction::BranchParity { rd, offset, .. } => {
            format!("{} {}, {}", mnemonic, format_reg(Bank::Scalar, rd), offset)
        }
        Instruction::Swb { rd } | Instruction::Rswb { rd } => {
            format!("{} {}", mnemonic, format_reg(Bank::Scalar, rd))
        }
        Instruction::Halt => mnemonic,
    }
}

/// Format register name for its bank (r5 / v5)
pub fn format_reg(bank: Bank, reg: Register) -> String {
    format!("{}{}", bank.register_prefix(), reg.index())
}
