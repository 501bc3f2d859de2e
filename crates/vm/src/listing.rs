//! Textual instruction listings.
//!
//! A listing is the development-time program format consumed by `kiwivm`:
//! one instruction per line, a mnemonic followed by its operands, with `;`
//! starting a comment. It stands in for the code generator while that phase
//! is built out.
//!
//! ```text
//! ; compute 10 - 1
//! move r0, 10
//! move r1, 1
//! sub  r0, r1
//! ```

use crate::instr::{Instr, Reg};
use crate::program::Program;

/// Parse a whole listing into a program. Errors carry the 1-based source
/// line.
pub fn parse_listing(source: &str) -> Result<Program, String> {
    let mut program = Program::new();
    for (i, line) in source.lines().enumerate() {
        let line = match line.find(';') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let instr = parse_line(line).map_err(|e| format!("line {}: {}", i + 1, e))?;
        program.push(instr);
    }
    Ok(program)
}

fn parse_line(line: &str) -> Result<Instr, String> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let mnemonic = parts.next().expect("split always yields one part");
    let rest = parts.next().unwrap_or("");
    let operands: Vec<&str> = rest
        .split([',', ' ', '\t'])
        .filter(|s| !s.is_empty())
        .collect();

    match mnemonic.to_ascii_lowercase().as_str() {
        "noop" => {
            expect_arity(&operands, 0, "noop")?;
            Ok(Instr::Noop)
        }
        "move" => {
            expect_arity(&operands, 2, "move")?;
            Ok(Instr::Move {
                dest: parse_reg(operands[0])?,
                imm: parse_imm(operands[1])?,
            })
        }
        "xchg" => {
            expect_arity(&operands, 2, "xchg")?;
            Ok(Instr::Xchg {
                dest: parse_reg(operands[0])?,
                src: parse_reg(operands[1])?,
            })
        }
        "push" => {
            expect_arity(&operands, 1, "push")?;
            Ok(Instr::Push {
                reg: parse_reg(operands[0])?,
            })
        }
        "pop" => {
            expect_arity(&operands, 1, "pop")?;
            Ok(Instr::Pop {
                reg: parse_reg(operands[0])?,
            })
        }
        "add" => {
            expect_arity(&operands, 2, "add")?;
            Ok(Instr::Add {
                dest: parse_reg(operands[0])?,
                src: parse_reg(operands[1])?,
            })
        }
        "sub" => {
            expect_arity(&operands, 2, "sub")?;
            Ok(Instr::Sub {
                dest: parse_reg(operands[0])?,
                src: parse_reg(operands[1])?,
            })
        }
        "mul" => {
            expect_arity(&operands, 2, "mul")?;
            Ok(Instr::Mul {
                dest: parse_reg(operands[0])?,
                src: parse_reg(operands[1])?,
            })
        }
        "div" => {
            expect_arity(&operands, 2, "div")?;
            Ok(Instr::Div {
                dest: parse_reg(operands[0])?,
                src: parse_reg(operands[1])?,
            })
        }
        "neg" => {
            expect_arity(&operands, 1, "neg")?;
            Ok(Instr::Neg {
                reg: parse_reg(operands[0])?,
            })
        }
        "and" => {
            expect_arity(&operands, 2, "and")?;
            Ok(Instr::And {
                dest: parse_reg(operands[0])?,
                src: parse_reg(operands[1])?,
            })
        }
        "or" => {
            expect_arity(&operands, 2, "or")?;
            Ok(Instr::Or {
                dest: parse_reg(operands[0])?,
                src: parse_reg(operands[1])?,
            })
        }
        "not" => {
            expect_arity(&operands, 1, "not")?;
            Ok(Instr::Not {
                reg: parse_reg(operands[0])?,
            })
        }
        "var" => {
            expect_arity(&operands, 0, "var")?;
            Ok(Instr::Var)
        }
        "load" => {
            expect_arity(&operands, 0, "load")?;
            Ok(Instr::Load)
        }
        "stor" => {
            expect_arity(&operands, 0, "stor")?;
            Ok(Instr::Stor)
        }
        "ccat" => {
            expect_arity(&operands, 0, "ccat")?;
            Ok(Instr::Ccat)
        }
        "cmp" => {
            expect_arity(&operands, 0, "cmp")?;
            Ok(Instr::Cmp)
        }
        "jmp" => {
            expect_arity(&operands, 0, "jmp")?;
            Ok(Instr::Jmp)
        }
        other => Err(format!("unknown mnemonic '{}'", other)),
    }
}

fn expect_arity(operands: &[&str], want: usize, mnemonic: &str) -> Result<(), String> {
    if operands.len() != want {
        return Err(format!(
            "{} takes {} operand(s), found {}",
            mnemonic,
            want,
            operands.len()
        ));
    }
    Ok(())
}

fn parse_reg(text: &str) -> Result<Reg, String> {
    match text.to_ascii_lowercase().as_str() {
        "r0" => Ok(Reg::R0),
        "r1" => Ok(Reg::R1),
        "r2" => Ok(Reg::R2),
        other => Err(format!("expected register r0..r2, found '{}'", other)),
    }
}

fn parse_imm(text: &str) -> Result<i64, String> {
    text.parse::<i64>()
        .map_err(|_| format!("expected integer immediate, found '{}'", text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instr::Reg::*;
    use crate::machine::Machine;

    #[test]
    fn test_parse_demo_program() {
        let program = parse_listing(
            "; compute 10 - 1\n\
             noop\n\
             move r0, 10\n\
             move r1, 1\n\
             sub  r0, r1\n",
        )
        .unwrap();
        assert_eq!(program.len(), 4);
        assert_eq!(program.get(0), Some(Instr::Noop));
        assert_eq!(program.get(3), Some(Instr::Sub { dest: R0, src: R1 }));

        let mut m = Machine::new();
        m.run(&program).unwrap();
        assert_eq!(m.regs(), [9, 1, 0]);
    }

    #[test]
    fn test_mnemonics_and_registers_are_case_insensitive() {
        let program = parse_listing("MOVE R0, 3\nNeg r0\n").unwrap();
        assert_eq!(program.get(0), Some(Instr::Move { dest: R0, imm: 3 }));
        assert_eq!(program.get(1), Some(Instr::Neg { reg: R0 }));
    }

    #[test]
    fn test_operands_without_comma() {
        let program = parse_listing("move r2 -4\nxchg r0 r2\n").unwrap();
        assert_eq!(program.get(0), Some(Instr::Move { dest: R2, imm: -4 }));
        assert_eq!(program.get(1), Some(Instr::Xchg { dest: R0, src: R2 }));
    }

    #[test]
    fn test_blank_lines_and_comments_skipped() {
        let program = parse_listing("\n; nothing here\n\n   \nnoop\n").unwrap();
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn test_unknown_mnemonic() {
        let err = parse_listing("frob r0\n").unwrap_err();
        assert!(err.contains("line 1"));
        assert!(err.contains("unknown mnemonic 'frob'"));
    }

    #[test]
    fn test_bad_register() {
        let err = parse_listing("push r3\n").unwrap_err();
        assert!(err.contains("expected register"));
    }

    #[test]
    fn test_bad_arity_reported_with_line() {
        let err = parse_listing("noop\nadd r0\n").unwrap_err();
        assert!(err.contains("line 2"));
        assert!(err.contains("add takes 2 operand(s), found 1"));
    }

    #[test]
    fn test_bad_immediate() {
        let err = parse_listing("move r0, ten\n").unwrap_err();
        assert!(err.contains("expected integer immediate"));
    }

    #[test]
    fn test_reserved_opcodes_load_but_do_not_run() {
        let program = parse_listing("cmp\n").unwrap();
        let mut m = Machine::new();
        let err = m.run(&program).unwrap_err();
        assert_eq!(err.to_string(), "vm:ip=0: reserved opcode cmp");
    }
}
