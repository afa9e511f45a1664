//! # Instruction Encoding Constants and Helpers
//!
//! Centralized constants and helper functions for IRIS instruction
//! encoding/decoding.
//!
//! ## Instruction Format (32-bit)
//!
//! ```text
//! R-type:  [rd:5][rs:5][imm/func:16][opcode:6]
//! I-type:  [rd:5][imm:16][func:5][opcode:6]
//! R3-type: [ra:5][rb:5][rc:5][func:11][opcode:6]
//! B-type:  [rd:5][rs:5][offset:16][opcode:6]
//! ```
//!
//! The function code always sits in bits 10..6. All 16-bit immediates are
//! sign-extended.

use crate::instruction::Instruction;
use crate::opcode::{Funct, Opcode};
use crate::register::Register;

// ============================================================================
// Bit Position Constants
// ============================================================================

/// Opcode field: bits 0-5 (6 bits)
pub const OPCODE_SHIFT: u32 = 0;

/// Function field: bits 6-10 (5 bits)
pub const FUNCT_SHIFT: u32 = 6;

/// First register field (rd / ra): bits 27-31
pub const RD_SHIFT: u32 = 27;

/// Second register field (rs / rb): bits 22-26
pub const RS_SHIFT: u32 = 22;

/// Third register field (rc, R3-type only): bits 17-21
pub const RC_SHIFT: u32 = 17;

/// R-type/B-type immediate: bits 6-21
pub const RTYPE_IMM_SHIFT: u32 = 6;

/// I-type immediate: bits 11-26
pub const ITYPE_IMM_SHIFT: u32 = 11;

// ============================================================================
// Field Masks
// ============================================================================

/// Opcode mask (6 bits)
pub const OPCODE_MASK: u32 = 0x3F;

/// Function field mask (5 bits)
pub const FUNCT_MASK: u32 = 0x1F;

/// Register field mask (5 bits)
pub const REGISTER_MASK: u32 = 0x1F;

/// Immediate field mask (16 bits)
pub const IMM_MASK: u32 = 0xFFFF;

/// In-place masks for the raw word, matching the bit diagrams above
pub const RD_FIELD: u32 = REGISTER_MASK << RD_SHIFT;
pub const RS_FIELD: u32 = REGISTER_MASK << RS_SHIFT;
pub const RC_FIELD: u32 = REGISTER_MASK << RC_SHIFT;
pub const FUNCT_FIELD: u32 = FUNCT_MASK << FUNCT_SHIFT;
pub const RTYPE_IMM_FIELD: u32 = IMM_MASK << RTYPE_IMM_SHIFT;
pub const ITYPE_IMM_FIELD: u32 = IMM_MASK << ITYPE_IMM_SHIFT;

// ============================================================================
// Field Extraction Functions
// ============================================================================

/// Extract opcode (bits 0-5)
#[inline]
pub const fn extract_opcode(inst: u32) -> u32 {
    inst & OPCODE_MASK
}

/// Extract function code (bits 6-10)
#[inline]
pub const fn extract_funct(inst: u32) -> u32 {
    (inst >> FUNCT_SHIFT) & FUNCT_MASK
}

/// Extract first register (bits 27-31)
#[inline]
pub const fn extract_rd(inst: u32) -> u32 {
    (inst >> RD_SHIFT) & REGISTER_MASK
}

/// Extract second register (bits 22-26)
#[inline]
pub const fn extract_rs(inst: u32) -> u32 {
    (inst >> RS_SHIFT) & REGISTER_MASK
}

/// Extract third register of an R3-type instruction (bits 17-21)
#[inline]
pub const fn extract_rc(inst: u32) -> u32 {
    (inst >> RC_SHIFT) & REGISTER_MASK
}

/// Extract R-type/B-type immediate with sign extension (bits 6-21)
#[inline]
pub const fn extract_rtype_imm(inst: u32) -> i16 {
    ((inst >> RTYPE_IMM_SHIFT) & IMM_MASK) as u16 as i16
}

/// Extract I-type immediate with sign extension (bits 11-26)
#[inline]
pub const fn extract_itype_imm(inst: u32) -> i16 {
    ((inst >> ITYPE_IMM_SHIFT) & IMM_MASK) as u16 as i16
}

// ============================================================================
// Instruction Encoding Functions
// ============================================================================

/// Encode R-type instruction
#[inline]
pub const fn encode_rtype(opcode: Opcode, rd: u32, rs: u32, imm: u16) -> u32 {
    (opcode.to_u8() as u32)
        | (((imm as u32) & IMM_MASK) << RTYPE_IMM_SHIFT)
        | ((rs & REGISTER_MASK) << RS_SHIFT)
        | ((rd & REGISTER_MASK) << RD_SHIFT)
}

/// Encode R-type instruction carrying a function code instead of an immediate
#[inline]
pub const fn encode_rtype_funct(opcode: Opcode, rd: u32, rs: u32, funct: Funct) -> u32 {
    encode_rtype(opcode, rd, rs, funct.to_u8() as u16)
}

/// Encode I-type instruction
#[inline]
pub const fn encode_itype(opcode: Opcode, rd: u32, imm: u16, funct: u32) -> u32 {
    (opcode.to_u8() as u32)
        | ((funct & FUNCT_MASK) << FUNCT_SHIFT)
        | (((imm as u32) & IMM_MASK) << ITYPE_IMM_SHIFT)
        | ((rd & REGISTER_MASK) << RD_SHIFT)
}

/// Encode R3-type instruction (reserved upper function bits are zero)
#[inline]
pub const fn encode_r3type(opcode: Opcode, ra: u32, rb: u32, rc: u32, funct: Funct) -> u32 {
    (opcode.to_u8() as u32)
        | (((funct.to_u8() as u32) & FUNCT_MASK) << FUNCT_SHIFT)
        | ((rc & REGISTER_MASK) << RC_SHIFT)
        | ((rb & REGISTER_MASK) << RS_SHIFT)
        | ((ra & REGISTER_MASK) << RD_SHIFT)
}

/// Encode B-type instruction (branches)
#[inline]
pub const fn encode_btype(opcode: Opcode, rd: u32, rs: u32, offset: i16) -> u32 {
    encode_rtype(opcode, rd, rs, offset as u16)
}

#[inline]
fn reg(r: Register) -> u32 {
    r.index() as u32
}

/// Encode an instruction to its 32-bit word.
///
/// This is the bit-exact contract any assembler must follow.
pub fn encode(instr: &Instruction) -> u32 {
    let opcode = instr.opcode();
    match *instr {
        Instruction::Op { funct, rd, rs, .. } => {
            encode_rtype_funct(opcode, reg(rd), reg(rs), funct)
        }
        Instruction::OpImm { funct, rd, imm, .. } => {
            encode_itype(opcode, reg(rd), imm as u16, funct.to_u8() as u32)
        }
        Instruction::Neg { rd, .. } => encode_rtype_funct(opcode, reg(rd), 0, Funct::Neg),
        Instruction::Cswap { ra, rb, rc, .. } => {
            encode_r3type(opcode, reg(ra), reg(rb), reg(rc), Funct::Cswap)
        }
        Instruction::CswapImm { ra, rb, mask, .. } => {
            encode_rtype(opcode, reg(ra), reg(rb), mask as u16)
        }
        Instruction::Exch { rd, rs, .. } => encode_rtype(opcode, reg(rd), reg(rs), 0),
        Instruction::Mexch { rd, base, offset, .. } => {
            encode_rtype(opcode, reg(rd), reg(base), offset as u16)
        }
        Instruction::Del { rd, .. } => encode_itype(opcode, reg(rd), 0, 0),
        Instruction::Mdel { base, offset, .. } => encode_itype(opcode, reg(base), offset as u16, 0),
        Instruction::Branch { rd, rs, offset, .. } => {
            encode_btype(opcode, reg(rd), reg(rs), offset)
        }
        Instruction::BranchParity { rd, offset, .. } => {
            encode_itype(opcode, reg(rd), offset as u16, 0)
        }
        Instruction::Swb { rd } | Instruction::Rswb { rd } => encode_itype(opcode, reg(rd), 0, 0),
        Instruction::Halt => encode_itype(opcode, 0, 0, 0),
    }
}
