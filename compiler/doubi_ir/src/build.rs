//! Terse tree constructors.
//!
//! Every node gets `Span::DUMMY`. Hosts that embed the evaluator without a
//! parser, and the test suites, assemble programs with these.

use std::sync::Arc;

use crate::ast::{
    AssignOp, BinaryOp, Block, BranchKind, DictField, Expr, ExprKind, FuncDecl, IncDecOp, LitKind,
    Literal, Stmt, StmtKind, UnaryOp,
};
use crate::Span;

fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::DUMMY)
}

fn stmt(kind: StmtKind) -> Stmt {
    Stmt::new(kind, Span::DUMMY)
}

fn boxed(e: Expr) -> Box<Expr> {
    Box::new(e)
}

// Expressions

pub fn ident(name: &str) -> Expr {
    expr(ExprKind::Ident(name.to_string()))
}

pub fn lit(kind: LitKind, text: &str) -> Expr {
    expr(ExprKind::Lit(Literal {
        kind,
        text: text.to_string(),
    }))
}

pub fn int(value: i64) -> Expr {
    lit(LitKind::Int, &value.to_string())
}

pub fn float(value: f64) -> Expr {
    lit(LitKind::Float, &format!("{value:?}"))
}

/// String literal; `value` is the unescaped content.
pub fn string(value: &str) -> Expr {
    lit(LitKind::String, &format!("\"{}\"", escape(value, '"')))
}

pub fn char_lit(value: char) -> Expr {
    lit(LitKind::Char, &format!("'{}'", escape(&value.to_string(), '\'')))
}

fn escape(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

pub fn paren(inner: Expr) -> Expr {
    expr(ExprKind::Paren(boxed(inner)))
}

pub fn selector(target: Expr, field: &str) -> Expr {
    expr(ExprKind::Selector {
        target: boxed(target),
        field: field.to_string(),
    })
}

pub fn index(target: Expr, idx: Expr) -> Expr {
    expr(ExprKind::Index {
        target: boxed(target),
        index: boxed(idx),
    })
}

pub fn slice(target: Expr, low: Option<Expr>, high: Option<Expr>) -> Expr {
    expr(ExprKind::Slice {
        target: boxed(target),
        low: low.map(boxed),
        high: high.map(boxed),
    })
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Call {
        callee: boxed(callee),
        args,
    })
}

/// `target.method(args...)`
pub fn method_call(target: Expr, method: &str, args: Vec<Expr>) -> Expr {
    call(selector(target, method), args)
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        op,
        operand: boxed(operand),
    })
}

pub fn neg(operand: Expr) -> Expr {
    unary(UnaryOp::Neg, operand)
}

pub fn not(operand: Expr) -> Expr {
    unary(UnaryOp::Not, operand)
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Binary {
        op,
        left: boxed(left),
        right: boxed(right),
    })
}

pub fn array(elems: Vec<Expr>) -> Expr {
    expr(ExprKind::Array(elems))
}

pub fn set(elems: Vec<Expr>) -> Expr {
    expr(ExprKind::Set(elems))
}

pub fn dict(fields: Vec<(Expr, Expr)>) -> Expr {
    expr(ExprKind::Dict(
        fields
            .into_iter()
            .map(|(key, value)| DictField { key, value })
            .collect(),
    ))
}

pub fn func_decl(name: Option<&str>, params: &[&str], body: Block) -> Arc<FuncDecl> {
    Arc::new(FuncDecl::new(
        name.map(str::to_string),
        params.iter().map(|p| (*p).to_string()).collect(),
        body,
        Span::DUMMY,
    ))
}

pub fn func(name: Option<&str>, params: &[&str], body: Block) -> Expr {
    expr(ExprKind::Func(func_decl(name, params, body)))
}

// Statements

pub fn expr_stmt(e: Expr) -> Stmt {
    stmt(StmtKind::Expr(e))
}

/// Named function declaration statement.
pub fn func_stmt(name: &str, params: &[&str], body: Block) -> Stmt {
    expr_stmt(func(Some(name), params, body))
}

pub fn assign(target: Expr, value: Expr) -> Stmt {
    assign_many(vec![target], vec![value])
}

pub fn assign_many(lhs: Vec<Expr>, rhs: Vec<Expr>) -> Stmt {
    stmt(StmtKind::Assign {
        op: AssignOp::Assign,
        lhs,
        rhs,
    })
}

pub fn compound(op: AssignOp, target: Expr, value: Expr) -> Stmt {
    stmt(StmtKind::Assign {
        op,
        lhs: vec![target],
        rhs: vec![value],
    })
}

pub fn inc(target: Expr) -> Stmt {
    stmt(StmtKind::IncDec {
        target,
        op: IncDecOp::Inc,
    })
}

pub fn dec(target: Expr) -> Stmt {
    stmt(StmtKind::IncDec {
        target,
        op: IncDecOp::Dec,
    })
}

pub fn go(call: Expr) -> Stmt {
    stmt(StmtKind::Go(call))
}

pub fn ret(values: Vec<Expr>) -> Stmt {
    stmt(StmtKind::Return(values))
}

pub fn brk() -> Stmt {
    stmt(StmtKind::Branch(BranchKind::Break))
}

pub fn cont() -> Stmt {
    stmt(StmtKind::Branch(BranchKind::Continue))
}

pub fn block(stmts: Vec<Stmt>) -> Block {
    Block::new(stmts, Span::DUMMY)
}

pub fn block_stmt(body: Block) -> Stmt {
    stmt(StmtKind::Block(body))
}

pub fn if_then(cond: Expr, then_branch: Block) -> Stmt {
    if_else(cond, then_branch, None)
}

pub fn if_else(cond: Expr, then_branch: Block, else_branch: Option<Stmt>) -> Stmt {
    stmt(StmtKind::If {
        cond,
        then_branch,
        else_branch: else_branch.map(Box::new),
    })
}

pub fn for_loop(
    init: Option<Stmt>,
    cond: Option<Expr>,
    post: Option<Stmt>,
    body: Block,
) -> Stmt {
    stmt(StmtKind::For {
        init: init.map(Box::new),
        cond,
        post: post.map(Box::new),
        body,
    })
}

pub fn range(key: &str, value: &str, iterable: Expr, body: Block) -> Stmt {
    stmt(StmtKind::Range {
        key: key.to_string(),
        value: value.to_string(),
        iterable,
        body,
    })
}
