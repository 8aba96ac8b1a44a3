//! Syntactic local-name collection for function bodies.

use rustc_hash::FxHashSet;

use crate::ast::{AssignOp, Block, ExprKind, Stmt, StmtKind};

/// Names a function body assigns with plain `=` to a bare identifier.
///
/// Walks nested blocks, both `if` branches, every part of a `for` header and
/// `range` bodies. Nested function declarations are skipped: their
/// assignments belong to their own local set.
pub fn collect_local_names(body: &Block) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    collect_block(body, &mut names);
    names
}

fn collect_block(block: &Block, names: &mut FxHashSet<String>) {
    for stmt in &block.stmts {
        collect_stmt(stmt, names);
    }
}

fn collect_stmt(stmt: &Stmt, names: &mut FxHashSet<String>) {
    match &stmt.kind {
        StmtKind::Assign {
            op: AssignOp::Assign,
            lhs,
            ..
        } => {
            for target in lhs {
                if let ExprKind::Ident(name) = &target.kind {
                    names.insert(name.clone());
                }
            }
        }
        StmtKind::Block(block) => collect_block(block, names),
        StmtKind::If {
            then_branch,
            else_branch,
            ..
        } => {
            collect_block(then_branch, names);
            if let Some(else_branch) = else_branch {
                collect_stmt(else_branch, names);
            }
        }
        StmtKind::For {
            init, post, body, ..
        } => {
            if let Some(init) = init {
                collect_stmt(init, names);
            }
            if let Some(post) = post {
                collect_stmt(post, names);
            }
            collect_block(body, names);
        }
        StmtKind::Range { body, .. } => collect_block(body, names),
        StmtKind::Assign { .. }
        | StmtKind::Expr(_)
        | StmtKind::IncDec { .. }
        | StmtKind::Go(_)
        | StmtKind::Return(_)
        | StmtKind::Branch(_) => {}
    }
}
