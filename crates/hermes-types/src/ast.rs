//! AST node types for the Hermes language.
//!
//! Nodes are built once by the parser and never mutated afterwards.
//! Function declarations are reference-counted so the evaluator can keep
//! them in its function table after the program that declared them is gone.
//! Every node carries a [`Span`] for error reporting.

use crate::Span;
use std::rc::Rc;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// An ordered sequence of statements: a whole file, a REPL line, or a block body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    /// Top-level function declarations, in source order.
    pub fn functions(&self) -> impl Iterator<Item = &Rc<FunctionDecl>> {
        self.stmts.iter().filter_map(|stmt| match stmt {
            Stmt::Function(func) => Some(func),
            _ => None,
        })
    }
}

/// `!module["name"]` followed by a program body.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub body: Program,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `var name = expr` (only produced for a `for` initializer)
    VarDecl(VarDecl),
    /// `var a, b = x, y`; every `var` statement, even with one name
    MultiAssign(MultiAssign),
    /// `func name(params) { body }` or `func name(params) => expr`
    Function(Rc<FunctionDecl>),
    /// `if cond { ... } else if cond { ... } else { ... }`
    If(IfStmt),
    /// `for (init; cond; incr) { ... }`
    For(ForStmt),
    /// `return [expr]`
    Return(ReturnStmt),
    /// `@import name`
    Import(ImportStmt),
    /// A module header met inside a program; the rest of the body belongs to it.
    Module(Module),
    /// A bare expression (value is discarded).
    Expr(Expr),
}

/// `var name = expr`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

/// `var a, b, ... = e1, e2, ...`. `names` and `values` always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiAssign {
    pub names: Vec<String>,
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub body: Program,
    pub else_ifs: Vec<ElseIf>,
    pub else_body: Option<Program>,
    pub span: Span,
}

/// `else if cond { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    pub condition: Expr,
    pub body: Program,
    pub span: Span,
}

/// `for (init; cond; incr) { body }`. A missing condition is parsed as a truthy literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub condition: Expr,
    pub increment: Option<Expr>,
    pub body: Program,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub module: String,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Number or string literal; its runtime type is decided by the evaluator.
    Literal(Literal),
    /// `name`
    Variable(String),
    /// `[e1, e2, ...]`
    ArrayLiteral(Vec<Expr>),
    /// `array[index]`
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    /// `left op right`
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    /// `-operand`
    Negate(Box<Expr>),
    /// `target = value` (right-associative)
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// `++x` / `x++`
    Increment { name: String, prefix: bool },
    /// `--x` / `x--`
    Decrement { name: String, prefix: bool },
    /// `name(args)` or `module.name(args)`
    Call { target: CallTarget, args: Vec<Expr> },
}

/// Literal payload, kept as source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(String),
    String(String),
}

impl Literal {
    pub fn text(&self) -> &str {
        match self {
            Literal::Number(text) | Literal::String(text) => text,
        }
    }
}

/// The callee of a call expression. Dotted names are split at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// `name(...)`, a user-defined function
    Local(String),
    /// `module.function(...)`
    Qualified { module: String, function: String },
}

impl std::fmt::Display for CallTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallTarget::Local(name) => f.write_str(name),
            CallTarget::Qualified { module, function } => write!(f, "{module}.{function}"),
        }
    }
}

// ── Binary Operators ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Comparison
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinOp {
    /// Returns the operator symbol for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Less => "<",
            BinOp::Greater => ">",
            BinOp::LessEq => "<=",
            BinOp::GreaterEq => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
        }
    }
}
