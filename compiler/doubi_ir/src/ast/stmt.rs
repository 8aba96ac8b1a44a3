//! Statement nodes.

use super::{AssignOp, BranchKind, Expr, IncDecOp};
use crate::Span;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// `{ ... }` statement list. Executing a block opens a new scope frame.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Block { stmts, span }
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    /// Expression evaluated for its side effects.
    Expr(Expr),
    /// `x++` / `x--`; the target is an identifier, index or selector.
    IncDec { target: Expr, op: IncDecOp },
    /// `a, b = x, y` or `a += x`.
    Assign {
        op: AssignOp,
        lhs: Vec<Expr>,
        rhs: Vec<Expr>,
    },
    /// `go f(x)`: run the call on a concurrently scheduled thread.
    Go(Expr),
    /// `return a, b`
    Return(Vec<Expr>),
    Branch(BranchKind),
    Block(Block),
    If {
        cond: Expr,
        then_branch: Block,
        /// Either a plain block or a chained `if`.
        else_branch: Option<Box<Stmt>>,
    },
    /// `for init; cond; post { body }` with every header part optional.
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Block,
    },
    /// `for key, value := range iterable { body }` over an Array or Set.
    Range {
        key: String,
        value: String,
        iterable: Expr,
        body: Block,
    },
}

impl StmtKind {
    /// Node name for trace output.
    pub const fn label(&self) -> &'static str {
        match self {
            StmtKind::Expr(_) => "expr",
            StmtKind::IncDec { .. } => "inc_dec",
            StmtKind::Assign { .. } => "assign",
            StmtKind::Go(_) => "go",
            StmtKind::Return(_) => "return",
            StmtKind::Branch(_) => "branch",
            StmtKind::Block(_) => "block",
            StmtKind::If { .. } => "if",
            StmtKind::For { .. } => "for",
            StmtKind::Range { .. } => "range",
        }
    }
}
