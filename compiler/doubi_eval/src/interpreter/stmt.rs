//! Statement execution: blocks, `if`, `return`, `break`/`continue`.

use doubi_ir::{Block, BranchKind, Expr, Stmt, StmtKind};

use super::Interpreter;
use crate::errors::{branch_outside_loop, type_mismatch, EvalResult};
use crate::stack::ensure_sufficient_stack;

impl Interpreter {
    /// Run `block` in a child frame of the current environment. The frame is
    /// dropped however the block is left.
    pub(crate) fn exec_block(&mut self, block: &Block) -> EvalResult<()> {
        let mut scoped = self.scoped();
        scoped.exec_stmts(&block.stmts)
    }

    /// Run `stmts` in order in the current frame until one sets a pending
    /// exit that applies here.
    pub(crate) fn exec_stmts(&mut self, stmts: &[Stmt]) -> EvalResult<()> {
        for stmt in stmts {
            if self.exit_pending() {
                break;
            }
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    /// `return` always stops a block; `break`/`continue` only inside a loop.
    #[inline]
    fn exit_pending(&self) -> bool {
        self.flags.returning
            || (self.loop_depth > 0 && (self.flags.breaking || self.flags.continuing))
    }

    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<()> {
        tracing::trace!(node = stmt.kind.label(), span = %stmt.span, "exec");
        ensure_sufficient_stack(|| self.exec_stmt_kind(stmt)).map_err(|e| e.or_span(stmt.span))
    }

    fn exec_stmt_kind(&mut self, stmt: &Stmt) -> EvalResult<()> {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                let base = self.stack.len();
                let result = self.eval_expr(expr);
                self.stack.truncate(base);
                result
            }
            StmtKind::IncDec { target, op } => self.exec_inc_dec(target, *op),
            StmtKind::Assign { op, lhs, rhs } => self.exec_assign(*op, lhs, rhs),
            StmtKind::Go(call) => self.exec_go(call),
            StmtKind::Return(values) => {
                for value in values {
                    self.eval_expr(value)?;
                }
                self.flags.returning = true;
                Ok(())
            }
            StmtKind::Branch(kind) => self.exec_branch(*kind),
            StmtKind::Block(block) => self.exec_block(block),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(cond)? {
                    self.exec_block(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch)
                } else {
                    Ok(())
                }
            }
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => self.exec_for(init.as_deref(), cond.as_ref(), post.as_deref(), body),
            StmtKind::Range {
                key,
                value,
                iterable,
                body,
            } => self.exec_range(key, value, iterable, body),
        }
    }

    /// Branch statements only raise a flag; enclosing blocks and loops do
    /// the unwinding.
    fn exec_branch(&mut self, kind: BranchKind) -> EvalResult<()> {
        if self.loop_depth == 0 {
            return Err(branch_outside_loop(match kind {
                BranchKind::Break => "break",
                BranchKind::Continue => "continue",
            }));
        }
        match kind {
            BranchKind::Break => self.flags.breaking = true,
            BranchKind::Continue => self.flags.continuing = true,
        }
        Ok(())
    }

    /// Evaluate an `if`/`for` condition, which must be a bool.
    pub(crate) fn eval_condition(&mut self, cond: &Expr) -> EvalResult<bool> {
        let value = self.eval_value(cond)?;
        value
            .as_bool()
            .ok_or_else(|| type_mismatch("bool", value.type_name()).or_span(cond.span))
    }
}
