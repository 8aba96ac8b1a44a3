//! Conditional (`for`) and collection (`range`) loops.
//!
//! After each body run: a pending `return` ends the loop and is left set
//! for the enclosing function; a pending `break` is cleared and ends the
//! loop; a pending `continue` is cleared and the loop proceeds.

use doubi_ir::{Block, Expr, Stmt};

use super::Interpreter;
use crate::errors::{integer_overflow, type_mismatch, EvalResult};
use crate::value::{Value, ValueKind};

impl Interpreter {
    /// `for init; cond; post { body }`. A missing condition loops until
    /// `break` or `return`. `post` runs after every iteration that neither
    /// returned nor broke, including ones ended by `continue`.
    pub(super) fn exec_for(
        &mut self,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        post: Option<&Stmt>,
        body: &Block,
    ) -> EvalResult<()> {
        if let Some(init) = init {
            self.exec_stmt(init)?;
        }
        loop {
            if let Some(cond) = cond {
                if !self.eval_condition(cond)? {
                    break;
                }
            }
            self.exec_loop_body(body)?;
            if self.finish_iteration() {
                break;
            }
            if let Some(post) = post {
                self.exec_stmt(post)?;
            }
        }
        Ok(())
    }

    /// `for key, value := range iterable { body }` over an array or set.
    ///
    /// Iterates a snapshot of the elements taken when the loop starts. Both
    /// names live in one frame rebound on every iteration.
    pub(super) fn exec_range(
        &mut self,
        key: &str,
        value: &str,
        iterable: &Expr,
        body: &Block,
    ) -> EvalResult<()> {
        let collection = self.eval_value(iterable)?;
        let items = match collection.kind() {
            ValueKind::Array(_) | ValueKind::Set(_) => collection.elements().unwrap_or_default(),
            _ => {
                return Err(type_mismatch("array or set", collection.type_name())
                    .or_span(iterable.span))
            }
        };

        let mut scoped = self.scoped();
        for (i, item) in items.into_iter().enumerate() {
            let index = i64::try_from(i).map_err(|_| integer_overflow("range index"))?;
            scoped.env.define(key, Value::int(index));
            scoped.env.define(value, item);
            scoped.exec_loop_body(body)?;
            if scoped.finish_iteration() {
                break;
            }
        }
        Ok(())
    }

    fn exec_loop_body(&mut self, body: &Block) -> EvalResult<()> {
        self.loop_depth += 1;
        let result = self.exec_block(body);
        self.loop_depth -= 1;
        result
    }

    /// Consume the loop flags after a body run. Returns `true` when the loop
    /// must stop.
    fn finish_iteration(&mut self) -> bool {
        if self.flags.returning {
            return true;
        }
        if self.flags.breaking {
            self.flags.breaking = false;
            return true;
        }
        self.flags.continuing = false;
        false
    }
}
