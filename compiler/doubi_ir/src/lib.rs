//! Doubi IR - syntax tree types for the doubi evaluator.
//!
//! Lexing and parsing live outside this workspace. This crate is the contract
//! between an external parser and `doubi_eval`: the parser hands over an
//! already-validated tree built from these types.
//!
//! - Spans for source locations
//! - Expression and statement nodes
//! - Function declarations with their precomputed local-name sets
//! - Operator tokens
//! - `build`: terse constructors for hosts and tests

pub mod ast;
pub mod build;
mod locals;
mod span;

pub use ast::{
    AssignOp, BinaryOp, Block, BranchKind, DictField, Expr, ExprKind, FuncDecl, IncDecOp, LitKind,
    Literal, Stmt, StmtKind, UnaryOp,
};
pub use locals::collect_local_names;
pub use span::Span;
