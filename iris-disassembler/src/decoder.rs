//! Instruction decoder
//!
//! Decoding runs in two stages. The opcode is read first and selects the
//! layout; only opcodes of the function classes go on to read the
//! function field. SPECIAL and R3 words share their low bits, so the
//! layout must never be guessed from the function field alone.

use crate::error::{DisassemblerError, Result};
use iris_spec::encoding::*;
use iris_spec::{
    Bank, BranchCond, Format, Funct, Instruction, Opcode, OpcodeClass, Parity, Register,
};

/// Raw field view of a decoded word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFields {
    pub format: Format,
    pub opcode: Opcode,
    pub funct: Option<Funct>,
    /// Operand comes from the immediate field rather than a register
    pub immediate: bool,
    pub rd: Register,
    pub rs: Option<Register>,
    pub rc: Option<Register>,
    pub imm: Option<i16>,
}

/// First stage: opcode
pub fn decode_opcode(word: u32) -> Result<Opcode> {
    let raw = extract_opcode(word) as u8;
    Opcode::from_u8(raw).ok_or(DisassemblerError::UnknownOpcode(raw))
}

/// Second stage: function code (function classes only)
pub fn decode_function(word: u32) -> Result<Funct> {
    let raw = extract_funct(word) as u8;
    Funct::from_u8(raw).ok_or(DisassemblerError::UnknownFunction {
        opcode: extract_opcode(word) as u8,
        funct: raw,
    })
}

/// Split a word into its fields according to its layout
pub fn decode_fields(word: u32) -> Result<DecodedFields> {
    let opcode = decode_opcode(word)?;
    let rd = Register::from_field(extract_rd(word));

    let fields = match opcode.class() {
        OpcodeClass::Function => {
            let funct = decode_function(word)?;
            match funct {
                Funct::Cswap => DecodedFields {
                    format: Format::R3,
                    opcode,
                    funct: Some(funct),
                    immediate: false,
                    rd,
                    rs: Some(Register::from_field(extract_rs(word))),
                    rc: Some(Register::from_field(extract_rc(word))),
                    imm: None,
                },
                Funct::Neg => DecodedFields {
                    format: Format::R,
                    opcode,
                    funct: Some(funct),
                    immediate: false,
                    rd,
                    rs: None,
                    rc: None,
                    imm: None,
                },
                _ => DecodedFields {
                    format: Format::R,
                    opcode,
                    funct: Some(funct),
                    immediate: false,
                    rd,
                    rs: Some(Register::from_field(extract_rs(word))),
                    rc: None,
                    imm: None,
                },
            }
        }
        OpcodeClass::Immediate => {
            let funct = decode_function(word)?;
            if !funct.is_binary() {
                return Err(DisassemblerError::InvalidEncoding(word));
            }
            DecodedFields {
                format: Format::I,
                opcode,
                funct: Some(funct),
                immediate: true,
                rd,
                rs: None,
                rc: None,
                imm: Some(extract_itype_imm(word)),
            }
        }
        OpcodeClass::Direct => match opcode.format() {
            Format::R | Format::B => {
                let imm = match opcode {
                    Opcode::Exch | Opcode::VExch => None,
                    _ => Some(extract_rtype_imm(word)),
                };
                DecodedFields {
                    format: opcode.format(),
                    opcode,
                    funct: None,
                    immediate: imm.is_some(),
                    rd,
                    rs: Some(Register::from_field(extract_rs(word))),
                    rc: None,
                    imm,
                }
            }
            Format::I | Format::R3 => {
                let imm = match opcode {
                    Opcode::Mdel | Opcode::VMdel | Opcode::Bevn | Opcode::Bodd => {
                        Some(extract_itype_imm(word))
                    }
                    _ => None,
                };
                DecodedFields {
                    format: Format::I,
                    opcode,
                    funct: None,
                    immediate: imm.is_some(),
                    rd,
                    rs: None,
                    rc: None,
                    imm,
                }
            }
        },
    };

    Ok(fields)
}

/// Decode 32-bit instruction word.
///
/// Words whose operands alias in a way that cannot be undone are
/// rejected as [`DisassemblerError::InvalidEncoding`].
pub fn decode(word: u32) -> Result<Instruction> {
    let f = decode_fields(word)?;
    let bank = if f.opcode.is_vector() { Bank::Vector } else { Bank::Scalar };
    let missing = || DisassemblerError::InvalidEncoding(word);

    let instr = match f.opcode {
        Opcode::Special | Opcode::VSpecial => {
            let funct = f.funct.ok_or_else(missing)?;
            match funct {
                Funct::Neg => Instruction::Neg { bank, rd: f.rd },
                Funct::Cswap => Instruction::Cswap {
                    bank,
                    ra: f.rd,
                    rb: f.rs.ok_or_else(missing)?,
                    rc: f.rc.ok_or_else(missing)?,
                },
                _ => Instruction::Op {
                    funct,
                    bank,
                    rd: f.rd,
                    rs: f.rs.ok_or_else(missing)?,
                },
            }
        }
        Opcode::Imm | Opcode::VImm => Instruction::OpImm {
            funct: f.funct.ok_or_else(missing)?,
            bank,
            rd: f.rd,
            imm: f.imm.ok_or_else(missing)?,
        },
        Opcode::CswapI | Opcode::VCswapI => Instruction::CswapImm {
            bank,
            ra: f.rd,
            rb: f.rs.ok_or_else(missing)?,
            mask: f.imm.ok_or_else(missing)?,
        },
        Opcode::Exch | Opcode::VExch => Instruction::Exch {
            bank,
            rd: f.rd,
            rs: f.rs.ok_or_else(missing)?,
        },
        Opcode::Mexch | Opcode::VMexch => Instruction::Mexch {
            bank,
            rd: f.rd,
            base: f.rs.ok_or_else(missing)?,
            offset: f.imm.ok_or_else(missing)?,
        },
        Opcode::Del | Opcode::VDel => Instruction::Del { bank, rd: f.rd },
        Opcode::Mdel | Opcode::VMdel => Instruction::Mdel {
            bank,
            base: f.rd,
            offset: f.imm.ok_or_else(missing)?,
        },
        Opcode::Blt | Opcode::Bge | Opcode::Bltu | Opcode::Beq | Opcode::Bne | Opcode::Bgeu => {
            Instruction::Branch {
                cond: branch_cond(f.opcode).ok_or_else(missing)?,
                rd: f.rd,
                rs: f.rs.ok_or_else(missing)?,
                offset: f.imm.ok_or_else(missing)?,
            }
        }
        Opcode::Bevn => Instruction::BranchParity {
            parity: Parity::Even,
            rd: f.rd,
            offset: f.imm.ok_or_else(missing)?,
        },
        Opcode::Bodd => Instruction::BranchParity {
            parity: Parity::Odd,
            rd: f.rd,
            offset: f.imm.ok_or_else(missing)?,
        },
        Opcode::Swb => Instruction::Swb { rd: f.rd },
        Opcode::Rswb => Instruction::Rswb { rd: f.rd },
        Opcode::Halt => Instruction::Halt,
    };

    instr.check_operands().map_err(|_| missing())?;
    Ok(instr)
}

fn branch_cond(opcode: Opcode) -> Option<BranchCond> {
    match opcode {
        Opcode::Blt => Some(BranchCond::Lt),
        Opcode::Bge => Some(BranchCond::Ge),
        Opcode::Bltu => Some(BranchCond::Ltu),
        Opcode::Beq => Some(BranchCond::Eq),
        Opcode::Bne => Some(BranchCond::Ne),
        Opcode::Bgeu => Some(BranchCond::Geu),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_halt() {
        assert_eq!(decode(0x0000003F).unwrap(), Instruction::Halt);
    }

    #[test]
    fn test_decode_add_immediate() {
        let word = (5 << 27) | (7 << 11) | (1 << 6) | 0x01;
        assert_eq!(
            decode(word).unwrap(),
            Instruction::OpImm {
                funct: Funct::Add,
                bank: Bank::Scalar,
                rd: Register::R5,
                imm: 7,
            }
        );
    }

    #[test]
    fn test_cswap_selects_r3_after_opcode() {
        let word = encode_r3type(Opcode::Special, 1, 2, 3, Funct::Cswap);
        let fields = decode_fields(word).unwrap();
        assert_eq!(fields.opcode, Opcode::Special);
        assert_eq!(fields.format, Format::R3);
        assert_eq!(fields.rc, Some(Register::R3));
    }

    #[test]
    fn test_zero_word_is_unknown_function() {
        // SPECIAL with function 0
        assert!(matches!(
            decode(0),
            Err(DisassemblerError::UnknownFunction { opcode: 0, funct: 0 })
        ));
    }

    #[test]
    fn test_unknown_opcode() {
        assert!(matches!(decode(0x3E), Err(DisassemblerError::UnknownOpcode(0x3E))));
    }

    #[test]
    fn test_immediate_neg_is_not_canonical() {
        let word = encode_itype(Opcode::Imm, 1, 0, Funct::Neg.to_u8() as u32);
        assert!(matches!(decode(word), Err(DisassemblerError::InvalidEncoding(_))));
    }

    #[test]
    fn test_self_applied_function_rejected() {
        for funct in Funct::ALL.into_iter().filter(|f| f.is_binary()) {
            for opcode in [Opcode::Special, Opcode::VSpecial] {
                let word = encode_rtype_funct(opcode, 6, 6, funct);
                assert!(
                    matches!(decode(word), Err(DisassemblerError::InvalidEncoding(w)) if w == word),
                    "{} {}",
                    opcode,
                    funct
                );
            }
        }
    }

    #[test]
    fn test_aliased_cswap_mask_rejected() {
        for (ra, rb, rc) in [(1, 2, 1), (1, 2, 2)] {
            let word = encode_r3type(Opcode::Special, ra, rb, rc, Funct::Cswap);
            assert!(matches!(decode(word), Err(DisassemblerError::InvalidEncoding(_))));
        }
        let word = encode_r3type(Opcode::Special, 1, 1, 2, Funct::Cswap);
        assert!(decode(word).is_ok());
    }

    #[test]
    fn test_mexch_into_own_base_rejected() {
        let word = encode_rtype(Opcode::Mexch, 2, 2, 4);
        assert!(matches!(decode(word), Err(DisassemblerError::InvalidEncoding(_))));

        // The vector form reads its base from the scalar file
        let word = encode_rtype(Opcode::VMexch, 2, 2, 4);
        assert!(matches!(decode(word), Ok(Instruction::Mexch { bank: Bank::Vector, .. })));
    }

    #[test]
    fn test_fields_of_mdel() {
        let word = encode_itype(Opcode::Mdel, 4, (-3i16) as u16, 0);
        let fields = decode_fields(word).unwrap();
        assert_eq!(fields.format, Format::I);
        assert!(fields.immediate);
        assert_eq!(fields.rd, Register::R4);
        assert_eq!(fields.imm, Some(-3));
        assert_eq!(fields.funct, None);
    }
}
