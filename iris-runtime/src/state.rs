//! VM state for the IRIS machine

use crate::registers::RegisterFile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of execution; flipped only by RSWB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// PC increment when no branch is pending
    #[inline]
    pub fn step(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "fwd"),
            Direction::Backward => write!(f, "bwd"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    /// HALT instruction
    Halt,
    /// Step budget exhausted
    StepLimit,
    /// Backward execution stepped past address 0
    ReachedStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Running,
    Halted(HaltReason),
    Error,
}

/// VM state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VMState {
    /// Scalar and vector registers
    pub regs: RegisterFile,

    /// Program counter (word index)
    pub pc: i64,

    /// Pending signed PC delta
    pub branch: i32,

    pub direction: Direction,

    pub status: RunStatus,

    /// Executed instruction count
    pub steps: u64,
}

impl VMState {
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            branch: 0,
            direction: Direction::Forward,
            status: RunStatus::Running,
            steps: 0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    /// Halt execution
    pub fn halt(&mut self, reason: HaltReason) {
        self.status = RunStatus::Halted(reason);
    }

    pub fn halt_reason(&self) -> Option<HaltReason> {
        match self.status {
            RunStatus::Halted(reason) => Some(reason),
            _ => None,
        }
    }

    /// Mark the run as failed
    pub fn fail(&mut self) {
        self.status = RunStatus::Error;
    }

    /// Swap the branch register with a scalar value, returning the old branch
    #[inline]
    pub fn swap_branch(&mut self, value: i32) -> i32 {
        std::mem::replace(&mut self.branch, value)
    }
}

impl Default for VMState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iris_spec::Register;

    #[test]
    fn test_initial_state() {
        let state = VMState::new();
        assert_eq!(state.pc, 0);
        assert_eq!(state.branch, 0);
        assert_eq!(state.direction, Direction::Forward);
        assert!(state.is_running());
        assert_eq!(state.regs.scalar(Register::R1), -1);
    }

    #[test]
    fn test_halt() {
        let mut state = VMState::new();
        state.halt(HaltReason::ReachedStart);
        assert!(!state.is_running());
        assert_eq!(state.halt_reason(), Some(HaltReason::ReachedStart));

        state.fail();
        assert_eq!(state.halt_reason(), None);
        assert_eq!(state.status, RunStatus::Error);
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::Forward.flip(), Direction::Backward);
        assert_eq!(Direction::Backward.flip().step(), 1);
        assert_eq!(Direction::Backward.step(), -1);
    }
}
