//! Virtual Machine for the IRIS reversible ISA

use crate::error::{Result, RuntimeError};
use crate::execute::execute;
use crate::memory::Memory;
use crate::state::{Direction, HaltReason, VMState};
use iris_spec::program::DEFAULT_MEMORY_MEGABYTES;
use iris_spec::{Instruction, Program};

/// VM configuration
#[derive(Debug, Clone)]
pub struct VMConfig {
    /// Memory budget in megabytes
    pub memory_megabytes: usize,

    /// Maximum number of steps before halting
    pub max_steps: u64,

    /// Emit a trace event per executed instruction
    pub trace: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            memory_megabytes: DEFAULT_MEMORY_MEGABYTES as usize,
            max_steps: 1_000_000,
            trace: false,
        }
    }
}

/// Execution result
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Number of steps executed
    pub steps: u64,

    /// Reason for halting
    pub halt_reason: HaltReason,

    /// Final registers and control state
    pub state: VMState,

    /// Final memory image
    pub memory: Memory,
}

/// IRIS Virtual Machine
pub struct VM {
    /// VM state (registers, PC, branch register, direction)
    state: VMState,

    /// Memory and garbage stack
    memory: Memory,

    config: VMConfig,
}

impl VM {
    /// Create a VM with `program` loaded at address 0
    pub fn new(program: &[i32], config: VMConfig) -> Result<Self> {
        let memory = Memory::init(program, program.len(), config.memory_megabytes)?;

        tracing::debug!(
            "IRIS VM initialised: {} program words, memory {}",
            program.len(),
            memory.layout()
        );

        Ok(Self {
            state: VMState::new(),
            memory,
            config,
        })
    }

    /// Create a VM from a program image, using the image's memory budget
    pub fn from_program(program: &Program, config: VMConfig) -> Result<Self> {
        program.validate()?;
        let config = VMConfig {
            memory_megabytes: program.header.memory_megabytes as usize,
            ..config
        };
        Self::new(&program.words(), config)
    }

    /// Run the VM until it halts
    pub fn run(mut self) -> Result<ExecutionResult> {
        while self.state.is_running() {
            // Check step limit
            if self.state.steps >= self.config.max_steps {
                self.state.halt(HaltReason::StepLimit);
                tracing::debug!("Step limit of {} reached", self.config.max_steps);
                break;
            }

            self.step()?;
        }

        let halt_reason = self
            .state
            .halt_reason()
            .ok_or_else(|| RuntimeError::Other("VM stopped without halting".to_string()))?;

        Ok(ExecutionResult {
            steps: self.state.steps,
            halt_reason,
            state: self.state,
            memory: self.memory,
        })
    }

    /// Execute one instruction. A halted VM is left unchanged.
    ///
    /// On error the run status becomes `Error` and the error is returned.
    pub fn step(&mut self) -> Result<()> {
        if !self.state.is_running() {
            return Ok(());
        }

        self.try_step().map_err(|e| {
            self.state.fail();
            tracing::warn!(
                "Run failed at PC={} after {} steps: {}",
                self.state.pc,
                self.state.steps,
                e
            );
            e
        })
    }

    fn try_step(&mut self) -> Result<()> {
        let inst = self.fetch_and_decode()?;

        if self.config.trace {
            tracing::trace!(
                "[{:6}] PC={:#010x} {} {}",
                self.state.steps,
                self.state.pc,
                self.state.direction,
                iris_disassembler::format(&inst)
            );
        }

        execute(&inst, &mut self.state, &mut self.memory)?;
        self.state.steps += 1;
        self.memory.check_garbage_boundary()?;

        if let Some(reason) = self.state.halt_reason() {
            tracing::debug!(
                "Halted at PC={} after {} steps: {:?}",
                self.state.pc,
                self.state.steps,
                reason
            );
            return Ok(());
        }

        self.advance_pc()
    }

    /// Apply a pending branch, or step by the current direction.
    ///
    /// Only a plain backward step off address 0 reaches the start; a
    /// branch landing below 0 is out of bounds in either direction.
    fn advance_pc(&mut self) -> Result<()> {
        let branched = self.state.branch != 0;
        let next = if branched {
            let delta = self.state.swap_branch(0);
            self.state.pc + delta as i64
        } else {
            self.state.pc + self.state.direction.step()
        };

        if next < 0 {
            if !branched && self.state.direction == Direction::Backward {
                self.state.halt(HaltReason::ReachedStart);
                tracing::debug!("Reached program start after {} steps", self.state.steps);
                return Ok(());
            }
            return Err(RuntimeError::PcOutOfBounds { pc: next });
        }

        self.state.pc = next;
        Ok(())
    }

    /// Fetch and decode instruction at PC
    fn fetch_and_decode(&self) -> Result<Instruction> {
        let pc = self.state.pc;
        let word = self.memory.fetch(pc)?;

        iris_disassembler::decode(word).map_err(|source| RuntimeError::Decode { pc, source })
    }

    /// Get current state
    pub fn state(&self) -> &VMState {
        &self.state
    }

    /// Mutable state, for presetting registers before a run
    pub fn state_mut(&mut self) -> &mut VMState {
        &mut self.state
    }

    /// Get memory
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn config(&self) -> &VMConfig {
        &self.config
    }
}
