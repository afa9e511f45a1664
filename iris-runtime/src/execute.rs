//! Instruction execution for the IRIS machine
//!
//! [`eval`] runs an instruction forward and [`r_eval`] runs it backward.
//! Backward execution swaps every function for its inverse, subtracts
//! branch offsets and pops deleted values back from the garbage stack.
//! Exchanges and direction control behave the same both ways.

use crate::error::{Result, RuntimeError};
use crate::functions::{self, FunctionError, Operand, Slot};
use crate::memory::Memory;
use crate::state::{Direction, HaltReason, VMState};
use iris_spec::{Bank, Funct, Instruction, Register, VECTOR_LANES};

/// Execute single instruction in the state's current direction
pub fn execute(instr: &Instruction, state: &mut VMState, memory: &mut Memory) -> Result<()> {
    match state.direction {
        Direction::Forward => eval(instr, state, memory),
        Direction::Backward => r_eval(instr, state, memory),
    }
}

/// Forward semantics
pub fn eval(instr: &Instruction, state: &mut VMState, memory: &mut Memory) -> Result<()> {
    dispatch(instr, state, memory, Direction::Forward)
}

/// Backward semantics
pub fn r_eval(instr: &Instruction, state: &mut VMState, memory: &mut Memory) -> Result<()> {
    dispatch(instr, state, memory, Direction::Backward)
}

/// Slots addressed by `reg` in `bank`: one scalar, or every lane
fn slots(bank: Bank, reg: Register) -> impl DoubleEndedIterator<Item = Slot> {
    let lanes = match bank {
        Bank::Scalar => 0..1,
        Bank::Vector => 0..VECTOR_LANES,
    };
    lanes.map(move |lane| match bank {
        Bank::Scalar => Slot::Scalar(reg),
        Bank::Vector => Slot::Lane(reg, lane),
    })
}

/// Word address of `base + offset` (plus the lane for vector access)
#[inline]
fn address(state: &VMState, base: Register, offset: i16, slot: Slot) -> i64 {
    let lane = match slot {
        Slot::Scalar(_) => 0,
        Slot::Lane(_, lane) => lane as i64,
    };
    state.regs.scalar(base) as i64 + offset as i64 + lane
}

fn function(
    funct: Funct,
    bank: Bank,
    rd: Register,
    src: impl Fn(Slot) -> Operand,
    state: &mut VMState,
) -> Result<()> {
    for dst in slots(bank, rd) {
        functions::apply(funct, &mut state.regs, dst, src(dst)).map_err(|e| match e {
            FunctionError::DivisionByZero => RuntimeError::DivisionByZero { pc: state.pc },
            FunctionError::NotBinary(_) => RuntimeError::Other(e.to_string()),
        })?;
    }
    Ok(())
}

/// Same lane of another register
#[inline]
fn paired(slot: Slot, reg: Register) -> Slot {
    match slot {
        Slot::Scalar(_) => Slot::Scalar(reg),
        Slot::Lane(_, lane) => Slot::Lane(reg, lane),
    }
}

fn dispatch(
    instr: &Instruction,
    state: &mut VMState,
    memory: &mut Memory,
    direction: Direction,
) -> Result<()> {
    let backward = direction == Direction::Backward;
    instr.check_operands()?;

    match *instr {
        // ========== Function library ==========
        Instruction::Op { funct, bank, rd, rs } => {
            let funct = if backward { funct.inverse() } else { funct };
            function(funct, bank, rd, |dst| Operand::Slot(paired(dst, rs)), state)?;
        }

        Instruction::OpImm { funct, bank, rd, imm } => {
            let funct = if backward { funct.inverse() } else { funct };
            function(funct, bank, rd, |_| Operand::Imm(imm as i32), state)?;
        }

        Instruction::Neg { bank, rd } => {
            for dst in slots(bank, rd) {
                functions::neg(&mut state.regs, dst);
            }
        }

        Instruction::Cswap { bank, ra, rb, rc } => {
            for a in slots(bank, ra) {
                let mask = Operand::Slot(paired(a, rc));
                functions::cswap(&mut state.regs, a, paired(a, rb), mask);
            }
        }

        Instruction::CswapImm { bank, ra, rb, mask } => {
            for a in slots(bank, ra) {
                functions::cswap(&mut state.regs, a, paired(a, rb), Operand::Imm(mask as i32));
            }
        }

        // ========== Exchange ==========
        Instruction::Exch { bank, rd, rs } => {
            state.regs.swap(bank, rd, rs);
        }

        Instruction::Mexch { bank, rd, base, offset } => {
            for slot in slots(bank, rd) {
                let addr = address(state, base, offset, slot);
                let old = memory.exchange(addr, state.regs.get(slot))?;
                state.regs.set(slot, old);
            }
        }

        // ========== Delete ==========
        Instruction::Del { bank, rd } => {
            if backward {
                for slot in slots(bank, rd).rev() {
                    let value = memory.pop_garbage()?;
                    state.regs.set(slot, value);
                }
            } else {
                for slot in slots(bank, rd) {
                    memory.push_garbage(state.regs.get(slot))?;
                    state.regs.set(slot, 0);
                }
            }
        }

        Instruction::Mdel { bank, base, offset } => {
            // Lane n touches base + offset + n
            if backward {
                for slot in slots(bank, base).rev() {
                    let addr = address(state, base, offset, slot);
                    memory.read(addr)?;
                    let value = memory.pop_garbage()?;
                    memory.write(addr, value)?;
                }
            } else {
                for slot in slots(bank, base) {
                    let addr = address(state, base, offset, slot);
                    let value = memory.read(addr)?;
                    memory.push_garbage(value)?;
                    memory.write(addr, 0)?;
                }
            }
        }

        // ========== Control ==========
        Instruction::Branch { cond, rd, rs, offset } => {
            if cond.holds(state.regs.scalar(rd), state.regs.scalar(rs)) {
                accumulate(state, offset, backward);
            }
        }

        Instruction::BranchParity { parity, rd, offset } => {
            if parity.holds(state.regs.scalar(rd)) {
                accumulate(state, offset, backward);
            }
        }

        Instruction::Swb { rd } => {
            let old = state.swap_branch(state.regs.scalar(rd));
            state.regs.set_scalar(rd, old);
        }

        Instruction::Rswb { rd } => {
            let old = state.swap_branch(state.regs.scalar(rd));
            state.regs.set_scalar(rd, old);
            state.direction = state.direction.flip();
            tracing::debug!("RSWB at PC={}: direction now {}", state.pc, state.direction);
        }

        Instruction::Halt => {
            state.halt(HaltReason::Halt);
        }
    }

    Ok(())
}

#[inline]
fn accumulate(state: &mut VMState, offset: i16, backward: bool) {
    state.branch = if backward {
        state.branch.wrapping_sub(offset as i32)
    } else {
        state.branch.wrapping_add(offset as i32)
    };
}
