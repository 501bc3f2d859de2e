//! Surface-syntax rendering of the AST.
//!
//! The printer is a read-only traversal that writes every token of a
//! program, separated by single spaces, to a caller-supplied sink. Operator
//! nodes map back to their source spellings and string atoms are re-quoted
//! and re-escaped, so a printed program scans to the same token-kind
//! sequence it was built from.

use crate::ast::*;
use std::fmt::{self, Write};

/// Writes programs as space-separated surface tokens.
pub struct Printer<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> Printer<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Printer { out }
    }

    pub fn print_program(&mut self, program: &Program) -> fmt::Result {
        for stmt in &program.stmts {
            self.print_stmt(stmt)?;
        }
        Ok(())
    }

    fn word(&mut self, text: &str) -> fmt::Result {
        write!(self.out, "{} ", text)
    }

    fn print_stmt(&mut self, stmt: &Stmt) -> fmt::Result {
        match stmt {
            Stmt::Complex(c) => self.print_complex_stmt(c),
            Stmt::Simple(s) => {
                self.print_simple_stmt(s)?;
                self.word(".")
            }
        }
    }

    fn print_complex_stmt(&mut self, stmt: &ComplexStmt) -> fmt::Result {
        match stmt {
            ComplexStmt::Compound(c) => self.print_compound_stmt(c),
            ComplexStmt::FuncDef(f) => self.print_func_def(f),
        }
    }

    fn print_compound_stmt(&mut self, stmt: &CompoundStmt) -> fmt::Result {
        match stmt {
            CompoundStmt::If(i) => self.print_if_stmt(i),
            CompoundStmt::While(w) => self.print_while_stmt(w),
        }
    }

    fn print_simple_stmt(&mut self, stmt: &SimpleStmt) -> fmt::Result {
        match stmt {
            SimpleStmt::Assign(a) => self.print_assign_stmt(a),
            SimpleStmt::Return(r) => {
                self.word("return")?;
                self.print_expr(&r.value)
            }
            SimpleStmt::Var(v) => self.print_var_stmt(v),
            SimpleStmt::Expr(e) => self.print_expr(e),
        }
    }

    fn print_if_stmt(&mut self, stmt: &IfStmt) -> fmt::Result {
        self.word("if")?;
        self.print_expr(&stmt.cond)?;
        self.print_body(&stmt.body)?;
        if let Some(else_branch) = &stmt.else_branch {
            self.word("else")?;
            match else_branch {
                ElseStmt::Body(body) => self.print_body(body)?,
                ElseStmt::If(nested) => self.print_if_stmt(nested)?,
            }
        }
        Ok(())
    }

    fn print_while_stmt(&mut self, stmt: &WhileStmt) -> fmt::Result {
        self.word("while")?;
        self.print_expr(&stmt.cond)?;
        self.print_body(&stmt.body)
    }

    fn print_body(&mut self, body: &CompoundBody) -> fmt::Result {
        self.word("{")?;
        for stmt in &body.stmts {
            self.print_stmt(stmt)?;
        }
        self.word("}")
    }

    fn print_func_def(&mut self, func: &FuncDef) -> fmt::Result {
        self.word("func")?;
        self.word(&func.name)?;
        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                self.word(",")?;
            }
            self.word(param)?;
        }
        self.print_body(&func.body)
    }

    fn print_assign_stmt(&mut self, stmt: &AssignStmt) -> fmt::Result {
        self.word(&stmt.name)?;
        self.word(stmt.op.symbol())?;
        self.print_expr(&stmt.value)
    }

    fn print_var_stmt(&mut self, stmt: &VarStmt) -> fmt::Result {
        self.word("var")?;
        for (i, decl) in stmt.decls.iter().enumerate() {
            if i > 0 {
                self.word(",")?;
            }
            match decl {
                VarDecl::Name(name) => self.word(name)?,
                VarDecl::Init(assign) => self.print_assign_stmt(assign)?,
            }
        }
        Ok(())
    }

    fn print_expr(&mut self, expr: &Expr) -> fmt::Result {
        self.print_not_expr(&expr.first)?;
        for (op, operand) in &expr.rest {
            self.word(op.symbol())?;
            self.print_not_expr(operand)?;
        }
        Ok(())
    }

    fn print_not_expr(&mut self, expr: &NotExpr) -> fmt::Result {
        if expr.negated {
            self.word("~")?;
        }
        self.print_compare_expr(&expr.operand)
    }

    fn print_compare_expr(&mut self, expr: &CompareExpr) -> fmt::Result {
        self.print_minor_expr(&expr.first)?;
        for (op, operand) in &expr.rest {
            self.word(op.symbol())?;
            self.print_minor_expr(operand)?;
        }
        Ok(())
    }

    fn print_minor_expr(&mut self, expr: &MinorExpr) -> fmt::Result {
        self.print_term(&expr.first)?;
        for (op, operand) in &expr.rest {
            self.word(op.symbol())?;
            self.print_term(operand)?;
        }
        Ok(())
    }

    fn print_term(&mut self, term: &Term) -> fmt::Result {
        self.print_factor(&term.first)?;
        for (op, operand) in &term.rest {
            self.word(op.symbol())?;
            self.print_factor(operand)?;
        }
        Ok(())
    }

    fn print_factor(&mut self, factor: &Factor) -> fmt::Result {
        match factor {
            Factor::Atom(atom) => self.print_atom(atom),
            Factor::Call(call) => self.print_func_call(call),
            Factor::Group(expr) => {
                self.word("(")?;
                self.print_expr(expr)?;
                self.word(")")
            }
            Factor::Signed { sign, operand } => {
                self.word(sign.symbol())?;
                self.print_factor(operand)
            }
        }
    }

    fn print_atom(&mut self, atom: &Atom) -> fmt::Result {
        match atom {
            Atom::Identifier(name) => self.word(name),
            Atom::Number(lexeme) => self.word(lexeme),
            Atom::Str(value) => {
                let escaped = escape_string(value);
                self.word(&format!("\"{}\"", escaped))
            }
            Atom::Boolean(true) => self.word("true"),
            Atom::Boolean(false) => self.word("false"),
        }
    }

    fn print_func_call(&mut self, call: &FuncCall) -> fmt::Result {
        self.word(&call.name)?;
        self.word("(")?;
        for (i, arg) in call.args.iter().enumerate() {
            if i > 0 {
                self.word(",")?;
            }
            self.print_expr(arg)?;
        }
        self.word(")")
    }
}

/// Re-escape a scanned string value back to its source form.
fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// Print a whole program to a fresh string.
pub fn program_to_string(program: &Program) -> String {
    let mut out = String::new();
    Printer::new(&mut out)
        .print_program(program)
        .expect("writing to a String cannot fail");
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Scanner;
    use crate::token::TokenKind;

    fn assign(name: &str, op: AssignOp, value: Expr) -> Stmt {
        Stmt::Simple(SimpleStmt::Assign(AssignStmt {
            name: name.to_string(),
            op,
            value,
        }))
    }

    #[test]
    fn test_print_assignment() {
        let program = Program {
            stmts: vec![assign(
                "x",
                AssignOp::Assign,
                Expr {
                    first: NotExpr {
                        negated: false,
                        operand: CompareExpr {
                            first: MinorExpr {
                                first: Term {
                                    first: Factor::Atom(Atom::Number("1".to_string())),
                                    rest: vec![],
                                },
                                rest: vec![(
                                    AddOp::Add,
                                    Term {
                                        first: Factor::Atom(Atom::Number("2".to_string())),
                                        rest: vec![],
                                    },
                                )],
                            },
                            rest: vec![],
                        },
                    },
                    rest: vec![],
                },
            )],
        };
        assert_eq!(program_to_string(&program), "x := 1 + 2 .");
    }

    #[test]
    fn test_print_if_else_chain() {
        let inner = IfStmt {
            cond: Expr::identifier("b"),
            body: CompoundBody::default(),
            else_branch: Some(ElseStmt::Body(CompoundBody::default())),
        };
        let program = Program {
            stmts: vec![Stmt::Complex(ComplexStmt::Compound(CompoundStmt::If(
                IfStmt {
                    cond: Expr::identifier("a"),
                    body: CompoundBody {
                        stmts: vec![assign("x", AssignOp::AddAssign, Expr::number("1"))],
                    },
                    else_branch: Some(ElseStmt::If(Box::new(inner))),
                },
            )))],
        };
        assert_eq!(
            program_to_string(&program),
            "if a { x +: 1 . } else if b { } else { }"
        );
    }

    #[test]
    fn test_print_func_def_and_call() {
        let program = Program {
            stmts: vec![
                Stmt::Complex(ComplexStmt::FuncDef(FuncDef {
                    name: "add".to_string(),
                    params: vec!["a".to_string(), "b".to_string()],
                    body: CompoundBody {
                        stmts: vec![Stmt::Simple(SimpleStmt::Return(ReturnStmt {
                            value: Expr::identifier("a"),
                        }))],
                    },
                })),
                Stmt::Simple(SimpleStmt::Expr(Expr::from_factor(Factor::Call(
                    FuncCall {
                        name: "add".to_string(),
                        args: vec![Expr::number("1"), Expr::number("2")],
                    },
                )))),
            ],
        };
        assert_eq!(
            program_to_string(&program),
            "func add a , b { return a . } add ( 1 , 2 ) ."
        );
    }

    #[test]
    fn test_print_var_stmt() {
        let program = Program {
            stmts: vec![Stmt::Simple(SimpleStmt::Var(VarStmt {
                decls: vec![
                    VarDecl::Name("x".to_string()),
                    VarDecl::Init(AssignStmt {
                        name: "y".to_string(),
                        op: AssignOp::Assign,
                        value: Expr::number("2"),
                    }),
                ],
            }))],
        };
        assert_eq!(program_to_string(&program), "var x , y := 2 .");
    }

    #[test]
    fn test_print_string_atom_requotes() {
        let program = Program {
            stmts: vec![Stmt::Simple(SimpleStmt::Expr(Expr::from_atom(Atom::Str(
                "a\nb\"c".to_string(),
            ))))],
        };
        assert_eq!(program_to_string(&program), "\"a\\nb\\\"c\" .");
    }

    #[test]
    fn test_print_signed_and_grouped() {
        let grouped = Expr::from_factor(Factor::Group(Box::new(Expr {
            first: NotExpr {
                negated: true,
                operand: CompareExpr {
                    first: MinorExpr {
                        first: Term {
                            first: Factor::Signed {
                                sign: SignOp::Minus,
                                operand: Box::new(Factor::Atom(Atom::Identifier(
                                    "n".to_string(),
                                ))),
                            },
                            rest: vec![],
                        },
                        rest: vec![],
                    },
                    rest: vec![],
                },
            },
            rest: vec![],
        })));
        let program = Program {
            stmts: vec![Stmt::Simple(SimpleStmt::Expr(grouped))],
        };
        assert_eq!(program_to_string(&program), "( ~ - n ) .");
    }

    #[test]
    fn test_printed_program_rescans() {
        let program = Program {
            stmts: vec![Stmt::Complex(ComplexStmt::Compound(CompoundStmt::While(
                WhileStmt {
                    cond: Expr {
                        first: NotExpr {
                            negated: false,
                            operand: CompareExpr {
                                first: MinorExpr {
                                    first: Term {
                                        first: Factor::Atom(Atom::Identifier("x".to_string())),
                                        rest: vec![],
                                    },
                                    rest: vec![],
                                },
                                rest: vec![(
                                    CompareOp::LessEqual,
                                    MinorExpr {
                                        first: Term {
                                            first: Factor::Atom(Atom::Number(
                                                "16#FF".to_string(),
                                            )),
                                            rest: vec![],
                                        },
                                        rest: vec![],
                                    },
                                )],
                            },
                        },
                        rest: vec![],
                    },
                    body: CompoundBody {
                        stmts: vec![assign("x", AssignOp::AddAssign, Expr::number("1"))],
                    },
                },
            )))],
        };

        let text = program_to_string(&program);
        let mut scanner = Scanner::new(&text);
        let mut kinds = Vec::new();
        loop {
            let tok = scanner.next_token().unwrap();
            let done = tok.is_eof();
            kinds.push(tok.kind);
            if done {
                break;
            }
        }
        assert_eq!(kinds, vec![
            TokenKind::While,
            TokenKind::Identifier,
            TokenKind::LessEqual,
            TokenKind::Number,
            TokenKind::LBrace,
            TokenKind::Identifier,
            TokenKind::AddAssign,
            TokenKind::Number,
            TokenKind::Dot,
            TokenKind::RBrace,
            TokenKind::Eof,
        ]);
    }
}
