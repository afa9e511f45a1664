//! Reversible function library
//!
//! Every function mutates one slot of a register file in place. Each one
//! has an exact inverse in [`Funct::inverse`], with two caveats:
//! - `mul` is undone by `div` only when the product does not wrap and the
//!   operand divides it evenly.
//! - The float functions round to `f32` and convert back to `i32`, so
//!   their inverses are exact only up to rounding.

use crate::registers::RegisterFile;
use iris_spec::{Funct, Register};
use thiserror::Error;

/// Addressable register slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A scalar register
    Scalar(Register),
    /// One lane of a vector register
    Lane(Register, usize),
}

/// Source operand of a binary function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Slot(Slot),
    /// Sign-extended immediate; vector instructions pass the same
    /// immediate to every lane
    Imm(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FunctionError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("{0:?} does not take a single source operand")]
    NotBinary(Funct),
}

pub type Result<T> = std::result::Result<T, FunctionError>;

/// Pure kernel of the binary functions: the new value of `x` given `n`
pub fn compute(funct: Funct, x: i32, n: i32) -> Result<i32> {
    let value = match funct {
        Funct::Add => x.wrapping_add(n),
        Funct::Sub => x.wrapping_sub(n),
        Funct::Xor => x ^ n,
        Funct::Mul => x.wrapping_mul(n),
        Funct::Div => {
            if n == 0 {
                return Err(FunctionError::DivisionByZero);
            }
            x.wrapping_div(n)
        }
        Funct::RotR => (x as u32).rotate_right(rotation(n)) as i32,
        Funct::RotL => (x as u32).rotate_left(rotation(n)) as i32,
        Funct::FAdd => ((x as f32) + (n as f32)) as i32,
        Funct::FSub => ((x as f32) - (n as f32)) as i32,
        Funct::FMul => ((x as f32) * (n as f32)) as i32,
        Funct::FDiv => {
            if n == 0 {
                return Err(FunctionError::DivisionByZero);
            }
            ((x as f32) / (n as f32)) as i32
        }
        Funct::Neg | Funct::Cswap => return Err(FunctionError::NotBinary(funct)),
    };
    Ok(value)
}

#[inline]
fn rotation(n: i32) -> u32 {
    n.rem_euclid(32) as u32
}

/// `dst = funct(dst, src)`; `neg` ignores `src`
pub fn apply(funct: Funct, regs: &mut RegisterFile, dst: Slot, src: Operand) -> Result<()> {
    if funct == Funct::Neg {
        neg(regs, dst);
        return Ok(());
    }
    let n = regs.operand(src);
    let value = compute(funct, regs.get(dst), n)?;
    regs.set(dst, value);
    Ok(())
}

pub fn add(regs: &mut RegisterFile, dst: Slot, src: Operand) -> Result<()> {
    apply(Funct::Add, regs, dst, src)
}

pub fn sub(regs: &mut RegisterFile, dst: Slot, src: Operand) -> Result<()> {
    apply(Funct::Sub, regs, dst, src)
}

pub fn xor(regs: &mut RegisterFile, dst: Slot, src: Operand) -> Result<()> {
    apply(Funct::Xor, regs, dst, src)
}

/// Bitwise complement
pub fn neg(regs: &mut RegisterFile, dst: Slot) {
    let value = !regs.get(dst);
    regs.set(dst, value);
}

/// Exchange the bits of `a` and `b` selected by `mask`.
///
/// All three values are read before either slot is written. The decoder
/// refuses masks that alias `a` or `b`, since those are not involutions.
pub fn cswap(regs: &mut RegisterFile, a: Slot, b: Slot, mask: Operand) {
    let x = regs.get(a);
    let y = regs.get(b);
    let t = (x ^ y) & regs.operand(mask);
    regs.set(a, x ^ t);
    regs.set(b, y ^ t);
}

pub fn mul(regs: &mut RegisterFile, dst: Slot, src: Operand) -> Result<()> {
    apply(Funct::Mul, regs, dst, src)
}

pub fn div(regs: &mut RegisterFile, dst: Slot, src: Operand) -> Result<()> {
    apply(Funct::Div, regs, dst, src)
}

/// Rotate right by `src mod 32`
pub fn rr(regs: &mut RegisterFile, dst: Slot, src: Operand) -> Result<()> {
    apply(Funct::RotR, regs, dst, src)
}

/// Rotate left by `src mod 32`
pub fn rl(regs: &mut RegisterFile, dst: Slot, src: Operand) -> Result<()> {
    apply(Funct::RotL, regs, dst, src)
}

pub fn fadd(regs: &mut RegisterFile, dst: Slot, src: Operand) -> Result<()> {
    apply(Funct::FAdd, regs, dst, src)
}

pub fn fsub(regs: &mut RegisterFile, dst: Slot, src: Operand) -> Result<()> {
    apply(Funct::FSub, regs, dst, src)
}

pub fn fmul(regs: &mut RegisterFile, dst: Slot, src: Operand) -> Result<()> {
    apply(Funct::FMul, regs, dst, src)
}

pub fn fdiv(regs: &mut RegisterFile, dst: Slot, src: Operand) -> Result<()> {
    apply(Funct::FDiv, regs, dst, src)
}
