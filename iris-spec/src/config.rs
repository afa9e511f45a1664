//! # Memory Layout Configuration
//!
//! The machine memory is a single array of 32-bit words sized from a
//! megabyte budget. The first seven eighths form the working region
//! (program and data); the last eighth holds the garbage stack.
//!
//! ```text
//! 0                       working_words              word_count
//! [ program | data ...  ][ <- garbage stack grows down  ]
//! ```

use std::fmt;

/// Bytes per machine word
pub const WORD_BYTES: usize = 4;

/// Bytes per megabyte of budget (decimal, as the budget is specified)
pub const BYTES_PER_MEGABYTE: usize = 1_000_000;

/// Largest accepted budget; keeps word addresses within `i32`
pub const MAX_MEGABYTES: usize = 8_000;

/// Derived memory geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryLayout {
    /// Total words in memory
    pub word_count: usize,
    /// Words in the working region, `[0, working_words)`
    pub working_words: usize,
}

impl MemoryLayout {
    /// Build the layout for a megabyte budget
    pub const fn from_megabytes(megabytes: usize) -> Result<Self, ConfigError> {
        if megabytes == 0 {
            return Err(ConfigError::ZeroMemory);
        }
        if megabytes > MAX_MEGABYTES {
            return Err(ConfigError::MemoryTooLarge { megabytes });
        }

        let word_count = megabytes * BYTES_PER_MEGABYTE / WORD_BYTES;
        Ok(Self {
            word_count,
            working_words: (word_count / 8) * 7,
        })
    }

    /// Words reserved for the garbage stack
    #[inline]
    pub const fn garbage_words(&self) -> usize {
        self.word_count - self.working_words
    }

    /// Check if a word address lies in the working region
    #[inline]
    pub const fn in_working_region(&self, address: i64) -> bool {
        address >= 0 && (address as u64) < self.working_words as u64
    }
}

impl fmt::Display for MemoryLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} words ({} working, {} garbage)",
            self.word_count,
            self.working_words,
            self.garbage_words()
        )
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Memory budget must be at least 1 MB")]
    ZeroMemory,

    #[error("Memory budget of {megabytes} MB exceeds the 8000 MB limit")]
    MemoryTooLarge { megabytes: usize },
}
