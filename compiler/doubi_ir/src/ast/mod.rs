//! Syntax tree nodes.
//!
//! Trees are owned (`Box`/`Vec`) except function declarations, which sit
//! behind an `Arc` so function values can keep their body alive and travel
//! to spawned threads without copying the subtree.

mod expr;
mod function;
mod operators;
mod stmt;

pub use expr::{DictField, Expr, ExprKind, LitKind, Literal};
pub use function::FuncDecl;
pub use operators::{AssignOp, BinaryOp, BranchKind, IncDecOp, UnaryOp};
pub use stmt::{Block, Stmt, StmtKind};
