//! Expression nodes.

use std::sync::Arc;

use super::{BinaryOp, FuncDecl, UnaryOp};
use crate::Span;

/// Kind of a literal token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LitKind {
    Int,
    Float,
    /// Double-quoted, quotes included in the text.
    String,
    /// Single-quoted, quotes included in the text.
    Char,
}

/// A literal as the scanner saw it. Conversion happens at evaluation time.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    pub kind: LitKind,
    pub text: String,
}

/// One `key: value` pair of a dict literal.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DictField {
    pub key: Expr,
    pub value: Expr,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// The identifier name if this is a bare identifier reference.
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// Identifier reference.
    Ident(String),
    Lit(Literal),
    /// `(x)`
    Paren(Box<Expr>),
    /// `x.name`
    Selector { target: Box<Expr>, field: String },
    /// `x[index]`
    Index { target: Box<Expr>, index: Box<Expr> },
    /// `x[low:high]`, either bound optional.
    Slice {
        target: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
    },
    /// `callee(args...)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `[a, b, c]`
    Array(Vec<Expr>),
    /// `#[a, b, c]`
    Set(Vec<Expr>),
    /// `{k: v, ...}` in source order.
    Dict(Vec<DictField>),
    /// Named or anonymous function declaration.
    Func(Arc<FuncDecl>),
}

impl ExprKind {
    /// Node name for trace output.
    pub const fn label(&self) -> &'static str {
        match self {
            ExprKind::Ident(_) => "ident",
            ExprKind::Lit(_) => "literal",
            ExprKind::Paren(_) => "paren",
            ExprKind::Selector { .. } => "selector",
            ExprKind::Index { .. } => "index",
            ExprKind::Slice { .. } => "slice",
            ExprKind::Call { .. } => "call",
            ExprKind::Unary { .. } => "unary",
            ExprKind::Binary { .. } => "binary",
            ExprKind::Array(_) => "array",
            ExprKind::Set(_) => "set",
            ExprKind::Dict(_) => "dict",
            ExprKind::Func(_) => "func",
        }
    }
}
