//! Encoding tests for edge cases not covered in unit tests

use iris_spec::encoding::*;
use iris_spec::{Bank, BranchCond, Funct, Instruction, Opcode, Parity, Register};
use proptest::prelude::*;

// ============================================================================
// Signed Extraction Edge Cases
// ============================================================================

#[test]
fn test_itype_imm_extremes() {
    let min = encode_itype(Opcode::Imm, 0, i16::MIN as u16, Funct::Add.to_u8() as u32);
    assert_eq!(extract_itype_imm(min), i16::MIN);

    let max = encode_itype(Opcode::Imm, 0, i16::MAX as u16, Funct::Add.to_u8() as u32);
    assert_eq!(extract_itype_imm(max), i16::MAX);
}

#[test]
fn test_rtype_imm_does_not_leak_into_registers() {
    let word = encode_rtype(Opcode::Mexch, 0, 0, 0xFFFF);
    assert_eq!(extract_rd(word), 0);
    assert_eq!(extract_rs(word), 0);
    assert_eq!(extract_rtype_imm(word), -1);
    assert_eq!(extract_opcode(word), Opcode::Mexch.to_u8() as u32);
}

#[test]
fn test_itype_imm_does_not_leak_into_funct() {
    let word = encode_itype(Opcode::Imm, 31, 0xFFFF, Funct::Xor.to_u8() as u32);
    assert_eq!(extract_funct(word), Funct::Xor.to_u8() as u32);
    assert_eq!(extract_rd(word), 31);
    assert_eq!(extract_itype_imm(word), -1);
}

proptest! {
    #[test]
    fn prop_immediate_fields_are_isolated(rd in 0u32..32, rs in 0u32..32, imm: i16) {
        let r = encode_rtype(Opcode::CswapI, rd, rs, imm as u16);
        prop_assert_eq!(extract_rtype_imm(r), imm);
        prop_assert_eq!((extract_rd(r), extract_rs(r)), (rd, rs));
        prop_assert_eq!(extract_opcode(r), Opcode::CswapI.to_u8() as u32);

        let i = encode_itype(Opcode::VImm, rd, imm as u16, Funct::RotL.to_u8() as u32);
        prop_assert_eq!(extract_itype_imm(i), imm);
        prop_assert_eq!(extract_rd(i), rd);
        prop_assert_eq!(extract_funct(i), Funct::RotL.to_u8() as u32);
    }
}

// ============================================================================
// Register Coverage
// ============================================================================

#[test]
fn test_r3type_all_registers() {
    for ra in 0..32 {
        for rb in 0..32 {
            let rc = (ra + rb) % 32;
            let inst = encode_r3type(Opcode::Special, ra, rb, rc, Funct::Cswap);
            assert_eq!(extract_rd(inst), ra);
            assert_eq!(extract_rs(inst), rb);
            assert_eq!(extract_rc(inst), rc);
            assert_eq!(extract_funct(inst), Funct::Cswap.to_u8() as u32);
        }
    }
}

// ============================================================================
// Frozen Words
// ============================================================================

#[test]
fn test_frozen_encodings() {
    // exch r1, r2
    let exch = encode(&Instruction::Exch {
        bank: Bank::Scalar,
        rd: Register::R1,
        rs: Register::R2,
    });
    assert_eq!(exch, 0x0880_0002);

    // del r3
    let del = encode(&Instruction::Del { bank: Bank::Scalar, rd: Register::R3 });
    assert_eq!(del, 0x1800_0031);

    // cswapi r1, r2, -1
    let cswapi = encode(&Instruction::CswapImm {
        bank: Bank::Scalar,
        ra: Register::R1,
        rb: Register::R2,
        mask: -1,
    });
    assert_eq!(cswapi, 0x08BF_FFC8);

    // bevn r4, 3
    let bevn = encode(&Instruction::BranchParity {
        parity: Parity::Even,
        rd: Register::R4,
        offset: 3,
    });
    assert_eq!(bevn, 0x2000_1818);
}

#[test]
fn test_vector_opcodes_set_bit_five() {
    let scalar = encode(&Instruction::Exch {
        bank: Bank::Scalar,
        rd: Register::R1,
        rs: Register::R2,
    });
    let vector = encode(&Instruction::Exch {
        bank: Bank::Vector,
        rd: Register::R1,
        rs: Register::R2,
    });
    assert_eq!(scalar | 0x20, vector);
}

#[test]
fn test_branch_opcodes() {
    let conds = [
        (BranchCond::Lt, 0x11),
        (BranchCond::Ge, 0x12),
        (BranchCond::Ltu, 0x13),
        (BranchCond::Eq, 0x14),
        (BranchCond::Ne, 0x15),
        (BranchCond::Geu, 0x16),
    ];
    for (cond, opcode) in conds {
        let word = encode(&Instruction::Branch {
            cond,
            rd: Register::R1,
            rs: Register::R2,
            offset: 4,
        });
        assert_eq!(extract_opcode(word), opcode);
    }
}

// ============================================================================
// Constants Verification
// ============================================================================

#[test]
fn test_encoding_constants() {
    assert_eq!(OPCODE_SHIFT, 0);
    assert_eq!(FUNCT_SHIFT, 6);
    assert_eq!(RD_SHIFT, 27);
    assert_eq!(RS_SHIFT, 22);
    assert_eq!(RC_SHIFT, 17);
    assert_eq!(RTYPE_IMM_SHIFT, 6);
    assert_eq!(ITYPE_IMM_SHIFT, 11);
    assert_eq!(OPCODE_MASK, 0x3F);
}
