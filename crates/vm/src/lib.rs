//! Kiwi Virtual Machine
//!
//! A small register/stack machine: three integer registers, an 80-cell data
//! stack, and a fixed opcode set executed in strict program order. Programs
//! are instruction buffers filled by the code generator (or, during
//! development, loaded from textual listings).
//!
//! ```rust
//! use kiwi_vm::{Instr, Machine, Program, Reg};
//!
//! let mut program = Program::new();
//! program.push(Instr::Move { dest: Reg::R0, imm: 10 });
//! program.push(Instr::Move { dest: Reg::R1, imm: 1 });
//! program.push(Instr::Sub { dest: Reg::R0, src: Reg::R1 });
//!
//! let mut machine = Machine::new();
//! machine.run(&program).unwrap();
//! assert_eq!(machine.reg(Reg::R0), 9);
//! ```

pub mod instr;
pub mod listing;
pub mod machine;
pub mod program;

pub use instr::{Instr, Reg};
pub use listing::parse_listing;
pub use machine::{Machine, NUM_REGS, STACK_SIZE, VmError};
pub use program::Program;
