//! # IRIS Opcode and Function Tables
//!
//! Opcodes occupy the low 6 bits of every instruction word (0x00-0x3F).
//! Function codes occupy bits 10..6 of the function-carrying layouts.
//!
//! ## Opcode Families
//! - 0x00-0x08: Scalar functions, exchanges, branch-register swaps
//! - 0x11-0x19: Branches
//! - 0x20-0x28: Vector counterparts
//! - 0x31-0x32: Deletes
//! - 0x3F:      HALT
//!
//! These tables are frozen: encoders, decoders and tests all agree on them.

use serde::{Deserialize, Serialize};

/// Instruction opcode (6 bits)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== Scalar (0x00-0x08) ==========
    /// SPECIAL: scalar function with register operand
    Special = 0x00,
    /// IMM: scalar function with immediate operand
    Imm = 0x01,
    /// EXCH: swap rd and rs
    Exch = 0x02,
    /// MEXCH: swap rd and mem[rs + imm]
    Mexch = 0x04,
    /// SWB: swap branch register and rd
    Swb = 0x06,
    /// RSWB: swap branch register and rd, flip direction
    Rswb = 0x07,
    /// CSWAPI: conditional swap of ra/rb under an immediate mask
    CswapI = 0x08,

    // ========== Branch (0x11-0x19) ==========
    /// BLT: br += off if rd < rs (signed)
    Blt = 0x11,
    /// BGE: br += off if rd >= rs (signed)
    Bge = 0x12,
    /// BLTU: br += off if rd < rs (unsigned)
    Bltu = 0x13,
    /// BEQ: br += off if rd == rs
    Beq = 0x14,
    /// BNE: br += off if rd != rs
    Bne = 0x15,
    /// BGEU: br += off if rd >= rs (unsigned)
    Bgeu = 0x16,
    /// BEVN: br += off if rd is even
    Bevn = 0x18,
    /// BODD: br += off if rd is odd
    Bodd = 0x19,

    // ========== Vector (0x20-0x28) ==========
    /// VSPECIAL: lane-wise function with vector operand
    VSpecial = 0x20,
    /// VIMM: lane-wise function with broadcast immediate
    VImm = 0x21,
    /// VEXCH: swap vd and vs
    VExch = 0x22,
    /// VMEXCH: swap lanes of vd with mem[rs + imm + lane]
    VMexch = 0x24,
    /// VDEL: delete every lane of vd
    VDel = 0x25,
    /// VMDEL: delete mem[rd + imm + lane] for every lane
    VMdel = 0x26,
    /// VCSWAPI: lane-wise conditional swap under an immediate mask
    VCswapI = 0x28,

    // ========== Delete (0x31-0x32) ==========
    /// DEL: push rd to the garbage stack, zero rd
    Del = 0x31,
    /// MDEL: push mem[rd + imm] to the garbage stack, zero it
    Mdel = 0x32,

    // ========== System ==========
    /// HALT: stop execution
    Halt = 0x3F,
}

/// How an opcode is dispatched after the first decode stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpcodeClass {
    /// Falls through to a function with a register operand
    Function,
    /// Falls through to a function with an immediate operand
    Immediate,
    /// Executes directly from the opcode
    Direct,
}

/// Instruction layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// `[rd:5][rs:5][imm/func:16][opcode:6]`
    R,
    /// `[rd:5][imm:16][func:5][opcode:6]`
    I,
    /// `[ra:5][rb:5][rc:5][func:11][opcode:6]`
    R3,
    /// `[rd:5][rs:5][offset:16][opcode:6]`
    B,
}

impl Opcode {
    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Opcode::Special),
            0x01 => Some(Opcode::Imm),
            0x02 => Some(Opcode::Exch),
            0x04 => Some(Opcode::Mexch),
            0x06 => Some(Opcode::Swb),
            0x07 => Some(Opcode::Rswb),
            0x08 => Some(Opcode::CswapI),

            0x11 => Some(Opcode::Blt),
            0x12 => Some(Opcode::Bge),
            0x13 => Some(Opcode::Bltu),
            0x14 => Some(Opcode::Beq),
            0x15 => Some(Opcode::Bne),
            0x16 => Some(Opcode::Bgeu),
            0x18 => Some(Opcode::Bevn),
            0x19 => Some(Opcode::Bodd),

            0x20 => Some(Opcode::VSpecial),
            0x21 => Some(Opcode::VImm),
            0x22 => Some(Opcode::VExch),
            0x24 => Some(Opcode::VMexch),
            0x25 => Some(Opcode::VDel),
            0x26 => Some(Opcode::VMdel),
            0x28 => Some(Opcode::VCswapI),

            0x31 => Some(Opcode::Del),
            0x32 => Some(Opcode::Mdel),

            0x3F => Some(Opcode::Halt),

            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// First-stage dispatch class
    pub const fn class(self) -> OpcodeClass {
        match self {
            Opcode::Special | Opcode::VSpecial => OpcodeClass::Function,
            Opcode::Imm | Opcode::VImm => OpcodeClass::Immediate,
            _ => OpcodeClass::Direct,
        }
    }

    /// Layout selected by the opcode alone.
    ///
    /// SPECIAL/VSPECIAL report `R`; their CSWAP function switches to R3,
    /// which only the second decode stage can see.
    pub const fn format(self) -> Format {
        match self {
            Opcode::Special
            | Opcode::VSpecial
            | Opcode::Exch
            | Opcode::VExch
            | Opcode::Mexch
            | Opcode::VMexch
            | Opcode::CswapI
            | Opcode::VCswapI => Format::R,

            Opcode::Blt
            | Opcode::Bge
            | Opcode::Bltu
            | Opcode::Beq
            | Opcode::Bne
            | Opcode::Bgeu => Format::B,

            Opcode::Imm
            | Opcode::VImm
            | Opcode::Swb
            | Opcode::Rswb
            | Opcode::Bevn
            | Opcode::Bodd
            | Opcode::Del
            | Opcode::Mdel
            | Opcode::VDel
            | Opcode::VMdel
            | Opcode::Halt => Format::I,
        }
    }

    /// Check if this opcode operates on the vector register file
    #[inline]
    pub const fn is_vector(self) -> bool {
        (self as u8) & 0x20 != 0 && !matches!(self, Opcode::Del | Opcode::Mdel | Opcode::Halt)
    }

    /// Get mnemonic string
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Special => "special",
            Opcode::Imm => "imm",
            Opcode::Exch => "exch",
            Opcode::Mexch => "mexch",
            Opcode::Swb => "swb",
            Opcode::Rswb => "rswb",
            Opcode::CswapI => "cswapi",
            Opcode::Blt => "blt",
            Opcode::Bge => "bge",
            Opcode::Bltu => "bltu",
            Opcode::Beq => "beq",
            Opcode::Bne => "bne",
            Opcode::Bgeu => "bgeu",
            Opcode::Bevn => "bevn",
            Opcode::Bodd => "bodd",
            Opcode::VSpecial => "vspecial",
            Opcode::VImm => "vimm",
            Opcode::VExch => "vexch",
            Opcode::VMexch => "vmexch",
            Opcode::VDel => "vdel",
            Opcode::VMdel => "vmdel",
            Opcode::VCswapI => "vcswapi",
            Opcode::Del => "del",
            Opcode::Mdel => "mdel",
            Opcode::Halt => "halt",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic().to_uppercase())
    }
}

/// Function code (5 bits, instruction bits 10..6)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Funct {
    /// x + n (wrapping)
    Add = 0x01,
    /// x - n (wrapping)
    Sub = 0x03,
    /// x ^ n
    Xor = 0x05,
    /// !x
    Neg = 0x06,
    /// branchless swap-or-not under a mask
    Cswap = 0x07,
    /// x * n (wrapping)
    Mul = 0x09,
    /// x / n (signed, wrapping)
    Div = 0x0B,
    /// rotate right by n mod 32
    RotR = 0x0D,
    /// rotate left by n mod 32
    RotL = 0x0E,
    /// float add, truncated back to integer
    FAdd = 0x11,
    /// float subtract, truncated back to integer
    FSub = 0x13,
    /// float multiply, truncated back to integer
    FMul = 0x19,
    /// float divide, truncated back to integer
    FDiv = 0x1B,
}

impl Funct {
    pub const ALL: [Funct; 13] = [
        Funct::Add,
        Funct::Sub,
        Funct::Xor,
        Funct::Neg,
        Funct::Cswap,
        Funct::Mul,
        Funct::Div,
        Funct::RotR,
        Funct::RotL,
        Funct::FAdd,
        Funct::FSub,
        Funct::FMul,
        Funct::FDiv,
    ];

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.to_u8() == value)
    }

    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// The function that undoes this one.
    ///
    /// Involutions (XOR, NEG, CSWAP) return themselves.
    pub const fn inverse(self) -> Self {
        match self {
            Funct::Add => Funct::Sub,
            Funct::Sub => Funct::Add,
            Funct::Mul => Funct::Div,
            Funct::Div => Funct::Mul,
            Funct::RotR => Funct::RotL,
            Funct::RotL => Funct::RotR,
            Funct::FAdd => Funct::FSub,
            Funct::FSub => Funct::FAdd,
            Funct::FMul => Funct::FDiv,
            Funct::FDiv => Funct::FMul,
            Funct::Xor | Funct::Neg | Funct::Cswap => self,
        }
    }

    /// Functions taking a second operand (register or immediate)
    #[inline]
    pub const fn is_binary(self) -> bool {
        !matches!(self, Funct::Neg | Funct::Cswap)
    }

    /// Get mnemonic string
    pub fn mnemonic(self) -> &'static str {
        match self {
            Funct::Add => "add",
            Funct::Sub => "sub",
            Funct::Xor => "xor",
            Funct::Neg => "neg",
            Funct::Cswap => "cswap",
            Funct::Mul => "mul",
            Funct::Div => "div",
            Funct::RotR => "rr",
            Funct::RotL => "rl",
            Funct::FAdd => "fadd",
            Funct::FSub => "fsub",
            Funct::FMul => "fmul",
            Funct::FDiv => "fdiv",
        }
    }
}

impl std::fmt::Display for Funct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_roundtrip() {
        for value in 0u8..=0x3F {
            if let Some(op) = Opcode::from_u8(value) {
                assert_eq!(op.to_u8(), value);
            }
        }
    }

    #[test]
    fn test_opcode_values_frozen() {
        assert_eq!(Opcode::Special.to_u8(), 0x00);
        assert_eq!(Opcode::Imm.to_u8(), 0x01);
        assert_eq!(Opcode::Exch.to_u8(), 0x02);
        assert_eq!(Opcode::CswapI.to_u8(), 0x08);
        assert_eq!(Opcode::Del.to_u8(), 0x31);
        assert_eq!(Opcode::Halt.to_u8(), 0x3F);
    }

    #[test]
    fn test_invalid_opcodes() {
        assert_eq!(Opcode::from_u8(0x03), None);
        assert_eq!(Opcode::from_u8(0x10), None);
        assert_eq!(Opcode::from_u8(0x29), None);
        assert_eq!(Opcode::from_u8(0x2A), None);
        assert_eq!(Opcode::from_u8(0x3E), None);
        assert_eq!(Opcode::from_u8(0x40), None);
    }

    #[test]
    fn test_class() {
        assert_eq!(Opcode::Special.class(), OpcodeClass::Function);
        assert_eq!(Opcode::VSpecial.class(), OpcodeClass::Function);
        assert_eq!(Opcode::Imm.class(), OpcodeClass::Immediate);
        assert_eq!(Opcode::VImm.class(), OpcodeClass::Immediate);
        assert_eq!(Opcode::Exch.class(), OpcodeClass::Direct);
        assert_eq!(Opcode::Halt.class(), OpcodeClass::Direct);
    }

    #[test]
    fn test_is_vector() {
        assert!(Opcode::VSpecial.is_vector());
        assert!(Opcode::VMdel.is_vector());
        assert!(!Opcode::Del.is_vector());
        assert!(!Opcode::Mdel.is_vector());
        assert!(!Opcode::Halt.is_vector());
        assert!(!Opcode::Beq.is_vector());
    }

    #[test]
    fn test_format() {
        assert_eq!(Opcode::Special.format(), Format::R);
        assert_eq!(Opcode::Imm.format(), Format::I);
        assert_eq!(Opcode::Beq.format(), Format::B);
        assert_eq!(Opcode::Bevn.format(), Format::I);
    }

    #[test]
    fn test_funct_values_frozen() {
        assert_eq!(Funct::Add.to_u8(), 0x01);
        assert_eq!(Funct::Sub.to_u8(), 0x03);
        assert_eq!(Funct::Cswap.to_u8(), 0x07);
        assert_eq!(Funct::FDiv.to_u8(), 0x1B);
        assert_eq!(Funct::from_u8(0x00), None);
        assert_eq!(Funct::from_u8(0x0D), Some(Funct::RotR));
    }

    #[test]
    fn test_inverse_is_an_involution_on_the_table() {
        for f in Funct::ALL {
            assert_eq!(f.inverse().inverse(), f);
        }
    }

    #[test]
    fn test_involutions() {
        for f in [Funct::Xor, Funct::Neg, Funct::Cswap] {
            assert_eq!(f.inverse(), f);
        }
    }

    #[test]
    fn test_paired_inverses() {
        assert_eq!(Funct::Add.inverse(), Funct::Sub);
        assert_eq!(Funct::Mul.inverse(), Funct::Div);
        assert_eq!(Funct::RotR.inverse(), Funct::RotL);
        assert_eq!(Funct::FAdd.inverse(), Funct::FSub);
        assert_eq!(Funct::FMul.inverse(), Funct::FDiv);
    }
}
