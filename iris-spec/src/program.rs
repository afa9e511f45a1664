//! # Program Image
//!
//! Binary container a loader hands to the machine: a fixed header
//! followed by the code words.

use crate::config::MemoryLayout;
use crate::error::IrisError;
use std::fmt;

/// Magic number for IRIS images: "IRIS" = 0x49524953
pub const MAGIC: u32 = 0x49524953;

/// Version: v1.0 = 0x00010000
pub const VERSION: u32 = 0x00010000;

/// Default memory budget for a program, in megabytes
pub const DEFAULT_MEMORY_MEGABYTES: u32 = 4;

/// Program header (16 bytes)
///
/// Binary format:
/// ```text
/// Offset  Size  Field
/// ──────────────────────────────────
/// 0x00    4     magic ("IRIS")
/// 0x04    4     version
/// 0x08    4     memory_megabytes
/// 0x0C    4     code_words
/// ```
#[repr(C)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramHeader {
    /// Magic number: "IRIS" = 0x49524953
    pub magic: u32,

    /// Version: 0x00010000
    pub version: u32,

    /// Memory budget the program expects, in megabytes
    pub memory_megabytes: u32,

    /// Number of 32-bit code words following the header
    pub code_words: u32,
}

impl ProgramHeader {
    /// Header size in bytes
    pub const SIZE: usize = 16;

    pub fn new() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            memory_megabytes: DEFAULT_MEMORY_MEGABYTES,
            code_words: 0,
        }
    }

    /// Memory geometry requested by this header
    pub fn layout(&self) -> Result<MemoryLayout, IrisError> {
        Ok(MemoryLayout::from_megabytes(self.memory_megabytes as usize)?)
    }

    /// Validate the header
    pub fn validate(&self) -> Result<(), IrisError> {
        if self.magic != MAGIC {
            return Err(IrisError::InvalidMagic(self.magic));
        }

        if self.version != VERSION {
            return Err(IrisError::InvalidVersion {
                expected: VERSION,
                found: self.version,
            });
        }

        self.layout()?;
        Ok(())
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];

        bytes[0..4].copy_from_slice(&self.magic.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.memory_megabytes.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.code_words.to_le_bytes());

        bytes
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IrisError> {
        if bytes.len() < Self::SIZE {
            return Err(IrisError::InvalidHeaderSize {
                expected: Self::SIZE,
                found: bytes.len(),
            });
        }

        let header = Self {
            magic: read_u32(bytes, 0),
            version: read_u32(bytes, 4),
            memory_megabytes: read_u32(bytes, 8),
            code_words: read_u32(bytes, 12),
        };

        header.validate()?;
        Ok(header)
    }
}

impl Default for ProgramHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProgramHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IRIS Program Header")?;
        writeln!(f, "  Magic:       {:#010x}", self.magic)?;
        writeln!(f, "  Version:     {:#010x}", self.version)?;
        writeln!(f, "  Memory:      {} MB", self.memory_megabytes)?;
        writeln!(f, "  Code size:   {} words", self.code_words)?;
        Ok(())
    }
}

#[inline]
fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Complete program image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub header: ProgramHeader,

    /// Code words, loaded at address 0
    pub code: Vec<u32>,
}

impl Program {
    /// Create a program from code words with the default memory budget
    pub fn new(code: Vec<u32>) -> Self {
        let mut header = ProgramHeader::new();
        header.code_words = code.len() as u32;
        Self { header, code }
    }

    /// Set the memory budget
    pub fn with_memory(mut self, megabytes: u32) -> Self {
        self.header.memory_megabytes = megabytes;
        self
    }

    /// Code as the signed words the machine memory stores
    pub fn words(&self) -> Vec<i32> {
        self.code.iter().map(|&w| w as i32).collect()
    }

    /// Validate the program
    pub fn validate(&self) -> Result<(), IrisError> {
        self.header.validate()?;

        if self.code.len() != self.header.code_words as usize {
            return Err(IrisError::InvalidProgramSize {
                expected: self.header.code_words as usize * 4,
                found: self.code.len() * 4,
            });
        }

        Ok(())
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(ProgramHeader::SIZE + self.code.len() * 4);

        bytes.extend_from_slice(&self.header.to_bytes());
        for &word in &self.code {
            bytes.extend_from_slice(&word.to_le_bytes());
        }

        bytes
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IrisError> {
        let header = ProgramHeader::from_bytes(bytes)?;

        let code_end = ProgramHeader::SIZE + header.code_words as usize * 4;
        if bytes.len() < code_end {
            return Err(IrisError::InvalidProgramSize {
                expected: code_end,
                found: bytes.len(),
            });
        }

        let code = bytes[ProgramHeader::SIZE..code_end]
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        let program = Self { header, code };
        program.validate()?;
        Ok(program)
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
