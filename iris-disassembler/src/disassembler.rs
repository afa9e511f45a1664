//! Main disassembler logic

use crate::decoder::decode;
use crate::error::Result;
use crate::formatter::format;
use iris_spec::Program;

/// Disassemble a program into assembly text
pub fn disassemble(program: &Program) -> Result<String> {
    let mut output = String::new();

    output.push_str("; IRIS Disassembly\n");
    output.push_str(&format!("; Memory: {} MB\n", program.header.memory_megabytes));
    output.push_str(&format!("; Code size: {} words\n", program.code.len()));
    output.push('\n');

    for (addr, &word) in program.code.iter().enumerate() {
        // Word address
        output.push_str(&format!("0x{:08X}:  ", addr));

        // Hex encoding
        output.push_str(&format!("{:08X}  ", word));

        match decode(word) {
            Ok(instr) => output.push_str(&format(&instr)),
            Err(e) => output.push_str(&format!("; ERROR: {}", e)),
        }

        output.push('\n');
    }

    Ok(output)
}
