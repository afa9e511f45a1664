//! Memory subsystem
//!
//! A single word array. The working region holds the program and its data;
//! the garbage stack lives in the last eighth, its first item in the last
//! word of memory and later items at lower addresses.

use crate::error::{InitError, Result, RuntimeError};
use iris_spec::MemoryLayout;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    words: Vec<i32>,
    layout: MemoryLayout,
    /// Items currently on the garbage stack
    garbage_depth: usize,
}

impl Memory {
    /// Build a memory image with `program` loaded at address 0.
    ///
    /// `program_size` is the declared word count; it must fit in the
    /// working region and match the number of words supplied.
    pub fn init(
        program: &[i32],
        program_size: usize,
        memory_megabytes: usize,
    ) -> std::result::Result<Self, InitError> {
        let layout = MemoryLayout::from_megabytes(memory_megabytes)?;

        if program_size > layout.working_words {
            return Err(InitError::ProgramTooLarge {
                program_size,
                limit: layout.working_words,
            });
        }
        if program.len() != program_size {
            return Err(InitError::ProgramSizeMismatch {
                declared: program_size,
                actual: program.len(),
            });
        }

        let mut words = vec![0; layout.word_count];
        words[..program_size].copy_from_slice(program);

        Ok(Self {
            words,
            layout,
            garbage_depth: 0,
        })
    }

    #[inline]
    pub fn layout(&self) -> MemoryLayout {
        self.layout
    }

    /// The whole memory image, garbage region included
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Working region only
    pub fn working(&self) -> &[i32] {
        &self.words[..self.layout.working_words]
    }

    fn index(&self, address: i64) -> Result<usize> {
        if self.layout.in_working_region(address) {
            Ok(address as usize)
        } else {
            Err(RuntimeError::AddressOutOfBounds { address })
        }
    }

    /// Read a word from the working region
    pub fn read(&self, address: i64) -> Result<i32> {
        let index = self.index(address)?;
        Ok(self.words[index])
    }

    /// Write a word to the working region
    pub fn write(&mut self, address: i64, value: i32) -> Result<()> {
        let index = self.index(address)?;
        self.words[index] = value;
        Ok(())
    }

    /// Store `value` and return the word it replaced
    pub fn exchange(&mut self, address: i64, value: i32) -> Result<i32> {
        let index = self.index(address)?;
        Ok(std::mem::replace(&mut self.words[index], value))
    }

    /// Fetch the instruction word at `pc`
    pub fn fetch(&self, pc: i64) -> Result<u32> {
        if !self.layout.in_working_region(pc) {
            return Err(RuntimeError::PcOutOfBounds { pc });
        }
        Ok(self.words[pc as usize] as u32)
    }

    // ========== Garbage stack ==========

    /// Slot of the `n`th item (0 = first pushed)
    #[inline]
    fn garbage_slot(&self, n: usize) -> usize {
        self.layout.word_count - 1 - n
    }

    pub fn push_garbage(&mut self, value: i32) -> Result<()> {
        let capacity = self.layout.garbage_words();
        if self.garbage_depth >= capacity {
            return Err(RuntimeError::GarbageOverflow { capacity });
        }
        let slot = self.garbage_slot(self.garbage_depth);
        self.words[slot] = value;
        self.garbage_depth += 1;
        Ok(())
    }

    /// Pop the most recent item and zero its slot
    pub fn pop_garbage(&mut self) -> Result<i32> {
        if self.garbage_depth == 0 {
            return Err(RuntimeError::GarbageUnderflow);
        }
        self.garbage_depth -= 1;
        let slot = self.garbage_slot(self.garbage_depth);
        Ok(std::mem::take(&mut self.words[slot]))
    }

    /// Most recent item, if any
    pub fn garbage_top(&self) -> Option<i32> {
        self.garbage_depth
            .checked_sub(1)
            .map(|n| self.words[self.garbage_slot(n)])
    }

    #[inline]
    pub fn garbage_depth(&self) -> usize {
        self.garbage_depth
    }

    /// Verify the stack has not grown into the working region
    pub fn check_garbage_boundary(&self) -> Result<()> {
        let lowest = self.layout.word_count - self.garbage_depth;
        if lowest < self.layout.working_words {
            return Err(RuntimeError::GarbageOverflow {
                capacity: self.layout.garbage_words(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("layout", &self.layout)
            .field("garbage_depth", &self.garbage_depth)
            .finish_non_exhaustive()
    }
}
