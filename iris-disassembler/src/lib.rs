//! # IRIS Disassembler
//!
//! Decode IRIS instruction words and render them as assembly text.
//!
//! Decoding is a two-stage process: the opcode field selects the layout,
//! and only the function classes (`SPECIAL`, `IMM` and their vector
//! forms) read the function field afterwards.
//!
//! ## Example
//!
//! ```rust
//! use iris_spec::Program;
//! use iris_disassembler::{decode, disassemble, format};
//!
//! let program = Program::new(vec![0x0880_0002, 0x0000_003F]);
//! let instr = decode(program.code[0]).unwrap();
//! assert_eq!(format(&instr), "exch r1, r2");
//!
//! let asm = disassemble(&program).unwrap();
//! assert!(asm.contains("halt"));
//! ```

pub mod error;
pub mod decoder;
pub mod formatter;
pub mod disassembler;

pub use error::{DisassemblerError, Result};
pub use disassembler::disassemble;
pub use decoder::{decode, decode_fields, decode_function, decode_opcode, DecodedFields};
pub use formatter::format;
