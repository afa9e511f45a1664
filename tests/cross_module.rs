//! Cross-module interaction tests
//!
//! Tests the integration between the encoder, disassembler, and runtime.

use iris_disassembler::{decode, disassemble, format};
use iris_runtime::{HaltReason, VMConfig, VM};
use iris_spec::encoding::encode;
use iris_spec::{Bank, BranchCond, Funct, Instruction, Parity, Program, Register};

fn every_instruction_shape() -> Vec<Instruction> {
    let mut all = Vec::new();
    for bank in [Bank::Scalar, Bank::Vector] {
        for funct in Funct::ALL {
            match funct {
                Funct::Neg => all.push(Instruction::Neg { bank, rd: Register::R7 }),
                Funct::Cswap => all.push(Instruction::Cswap {
                    bank,
                    ra: Register::R1,
                    rb: Register::R2,
                    rc: Register::R3,
                }),
                _ => {
                    all.push(Instruction::Op {
                        funct,
                        bank,
                        rd: Register::R4,
                        rs: Register::R31,
                    });
                    all.push(Instruction::OpImm {
                        funct,
                        bank,
                        rd: Register::R30,
                        imm: -1234,
                    });
                }
            }
        }
        all.push(Instruction::CswapImm {
            bank,
            ra: Register::R5,
            rb: Register::R6,
            mask: 0x0F0F,
        });
        all.push(Instruction::Exch {
            bank,
            rd: Register::R8,
            rs: Register::R9,
        });
        all.push(Instruction::Mexch {
            bank,
            rd: Register::R10,
            base: Register::R11,
            offset: i16::MIN,
        });
        all.push(Instruction::Del { bank, rd: Register::R12 });
        all.push(Instruction::Mdel {
            bank,
            base: Register::R13,
            offset: i16::MAX,
        });
    }
    for cond in [
        BranchCond::Lt,
        BranchCond::Ltu,
        BranchCond::Ge,
        BranchCond::Geu,
        BranchCond::Eq,
        BranchCond::Ne,
    ] {
        all.push(Instruction::Branch {
            cond,
            rd: Register::R14,
            rs: Register::R15,
            offset: -7,
        });
    }
    for parity in [Parity::Even, Parity::Odd] {
        all.push(Instruction::BranchParity {
            parity,
            rd: Register::R16,
            offset: 9,
        });
    }
    all.push(Instruction::Swb { rd: Register::R17 });
    all.push(Instruction::Rswb { rd: Register::R18 });
    all.push(Instruction::Halt);
    all
}

// ============================================================================
// Encoder -> Disassembler Tests
// ============================================================================

#[test]
fn test_every_shape_decodes_to_itself() {
    for instr in every_instruction_shape() {
        let word = encode(&instr);
        assert_eq!(decode(word), Ok(instr), "word {:#010x}", word);
    }
}

#[test]
fn test_every_shape_formats_with_its_mnemonic() {
    for instr in every_instruction_shape() {
        let text = format(&decode(encode(&instr)).unwrap());
        assert!(text.starts_with(&instr.mnemonic()), "{}", text);
    }
}

#[test]
fn test_vector_text_uses_vector_registers() {
    let instr = Instruction::Op {
        funct: Funct::Xor,
        bank: Bank::Vector,
        rd: Register::R4,
        rs: Register::R31,
    };
    assert_eq!(format(&decode(encode(&instr)).unwrap()), "vxor v4, v31");
}

// ============================================================================
// Program Image -> Disassembler / Runtime Tests
// ============================================================================

#[test]
fn test_image_disassembles_after_serialization() {
    let code: Vec<u32> = [
        Instruction::OpImm {
            funct: Funct::Add,
            bank: Bank::Scalar,
            rd: Register::R5,
            imm: 7,
        },
        Instruction::Halt,
    ]
    .iter()
    .map(encode)
    .collect();

    let program = Program::from_bytes(&Program::new(code).to_bytes()).unwrap();
    let asm = disassemble(&program).unwrap();

    assert!(asm.contains("addi r5, 7"));
    assert!(asm.contains("halt"));
}

#[test]
fn test_image_runs_in_runtime() {
    let code: Vec<u32> = [
        Instruction::OpImm {
            funct: Funct::Add,
            bank: Bank::Scalar,
            rd: Register::R5,
            imm: 7,
        },
        Instruction::Del {
            bank: Bank::Scalar,
            rd: Register::R5,
        },
        Instruction::Halt,
    ]
    .iter()
    .map(encode)
    .collect();

    let program = Program::new(code).with_memory(1);
    let result = VM::from_program(&program, VMConfig::default())
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(result.halt_reason, HaltReason::Halt);
    assert_eq!(result.state.regs.scalar(Register::R5), 0);
    assert_eq!(result.memory.garbage_top(), Some(7));
}
