//! Abstract syntax tree for Kiwi programs.
//!
//! Every node owns its children, so dropping a subtree releases every
//! descendant exactly once. Grammar repetition (statement lists, parameter
//! lists, argument lists) is carried as `Vec`s in source order; the
//! operator-chained expression tiers keep the grammar shape as a first
//! operand plus an ordered `(operator, operand)` tail.

use crate::token::TokenKind;

/// A whole source file: statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program { stmts: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Complex(ComplexStmt),
    Simple(SimpleStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComplexStmt {
    Compound(CompoundStmt),
    FuncDef(FuncDef),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompoundStmt {
    If(IfStmt),
    While(WhileStmt),
}

/// Simple statements are terminated by `.` in the surface syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleStmt {
    Assign(AssignStmt),
    Return(ReturnStmt),
    Var(VarStmt),
    /// A bare expression in statement position.
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub cond: Expr,
    pub body: CompoundBody,
    pub else_branch: Option<ElseStmt>,
}

/// The `else` arm: either a plain body or another `if` (the `else if`
/// chain).
#[derive(Debug, Clone, PartialEq)]
pub enum ElseStmt {
    Body(CompoundBody),
    If(Box<IfStmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: CompoundBody,
}

/// A braced block of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundBody {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: CompoundBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub name: String,
    pub op: AssignOp,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expr,
}

/// `var` declares one or more names, each optionally initialized.
#[derive(Debug, Clone, PartialEq)]
pub struct VarStmt {
    pub decls: Vec<VarDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VarDecl {
    Name(String),
    Init(AssignStmt),
}

// ---------------------------------------------------------------------------
// Expression tiers, loosest-binding first
// ---------------------------------------------------------------------------

/// `&&` / `||` chain, left-associative.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub first: NotExpr,
    pub rest: Vec<(LogicOp, NotExpr)>,
}

/// Optional prefix `~` over a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct NotExpr {
    pub negated: bool,
    pub operand: CompareExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareExpr {
    pub first: MinorExpr,
    pub rest: Vec<(CompareOp, MinorExpr)>,
}

/// Additive tier.
#[derive(Debug, Clone, PartialEq)]
pub struct MinorExpr {
    pub first: Term,
    pub rest: Vec<(AddOp, Term)>,
}

/// Multiplicative tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub first: Factor,
    pub rest: Vec<(MulOp, Factor)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Factor {
    Atom(Atom),
    Call(FuncCall),
    /// Parenthesized subexpression.
    Group(Box<Expr>),
    /// Unary `+`/`-`.
    Signed { sign: SignOp, operand: Box<Factor> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Identifier(String),
    /// The number's lexeme as scanned, radix prefix included.
    Number(String),
    Str(String),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncCall {
    pub name: String,
    pub args: Vec<Expr>,
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => ":=",
            AssignOp::AddAssign => "+:",
            AssignOp::SubtractAssign => "-:",
            AssignOp::MultiplyAssign => "*:",
            AssignOp::DivideAssign => "/=",
            AssignOp::ModuloAssign => "%:",
        }
    }

    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Assign => Some(AssignOp::Assign),
            TokenKind::AddAssign => Some(AssignOp::AddAssign),
            TokenKind::SubtractAssign => Some(AssignOp::SubtractAssign),
            TokenKind::MultiplyAssign => Some(AssignOp::MultiplyAssign),
            TokenKind::DivideAssign => Some(AssignOp::DivideAssign),
            TokenKind::ModuloAssign => Some(AssignOp::ModuloAssign),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicOp::And => "&&",
            LogicOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Is,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "~=",
            CompareOp::Less => "<",
            CompareOp::LessEqual => "<=",
            CompareOp::Greater => ">",
            CompareOp::GreaterEqual => ">=",
            CompareOp::Is => "is",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Subtract,
}

impl AddOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AddOp::Add => "+",
            AddOp::Subtract => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Multiply,
    Divide,
    Modulo,
}

impl MulOp {
    pub fn symbol(self) -> &'static str {
        match self {
            MulOp::Multiply => "*",
            MulOp::Divide => "/",
            MulOp::Modulo => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOp {
    Plus,
    Minus,
}

impl SignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            SignOp::Plus => "+",
            SignOp::Minus => "-",
        }
    }
}

// ---------------------------------------------------------------------------
// Construction helpers
//
// The parser builds nodes field by field; these shortcuts lift a lower tier
// into a full expression without writing the whole chain out. The printer
// and symbol-table tests lean on them heavily.
// ---------------------------------------------------------------------------

impl Expr {
    /// An expression consisting of a single factor.
    pub fn from_factor(factor: Factor) -> Self {
        Expr {
            first: NotExpr {
                negated: false,
                operand: CompareExpr {
                    first: MinorExpr {
                        first: Term {
                            first: factor,
                            rest: Vec::new(),
                        },
                        rest: Vec::new(),
                    },
                    rest: Vec::new(),
                },
            },
            rest: Vec::new(),
        }
    }

    pub fn from_atom(atom: Atom) -> Self {
        Expr::from_factor(Factor::Atom(atom))
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::from_atom(Atom::Identifier(name.into()))
    }

    pub fn number(lexeme: impl Into<String>) -> Self {
        Expr::from_atom(Atom::Number(lexeme.into()))
    }
}

impl From<Atom> for Factor {
    fn from(atom: Atom) -> Self {
        Factor::Atom(atom)
    }
}
