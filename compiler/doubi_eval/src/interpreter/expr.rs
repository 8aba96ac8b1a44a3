//! Expression evaluation.

use std::sync::Arc;

use doubi_ir::{DictField, Expr, ExprKind, FuncDecl, UnaryOp};

use super::{literal, Interpreter};
use crate::dispatch::{dispatch, expect_single, Message};
use crate::errors::{undefined_name, EvalResult};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

impl Interpreter {
    /// Evaluate `expr`, pushing its results onto the operand stack.
    ///
    /// Every expression pushes exactly one value except calls, which push
    /// one value per result. Errors are tagged with the innermost span.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult<()> {
        tracing::trace!(node = expr.kind.label(), span = %expr.span, "eval");
        ensure_sufficient_stack(|| self.eval_expr_kind(expr))
            .map_err(|e| e.or_span(expr.span))
    }

    fn eval_expr_kind(&mut self, expr: &Expr) -> EvalResult<()> {
        let value = match &expr.kind {
            ExprKind::Ident(name) => self.eval_ident(name)?,
            ExprKind::Lit(lit) => literal::convert(lit)?,
            ExprKind::Paren(inner) => return self.eval_expr(inner),
            ExprKind::Selector { target, field } => {
                let receiver = self.eval_value(target)?;
                self.send(&receiver, Message::GetProperty(field))?
            }
            ExprKind::Index { target, index } => {
                let receiver = self.eval_value(target)?;
                let index = self.eval_value(index)?;
                self.send(&receiver, Message::GetIndex(index))?
            }
            ExprKind::Slice { target, low, high } => {
                let receiver = self.eval_value(target)?;
                let low = low.as_deref().map(|e| self.eval_value(e)).transpose()?;
                let high = high.as_deref().map(|e| self.eval_value(e)).transpose()?;
                self.send(&receiver, Message::Slice(low, high))?
            }
            ExprKind::Call { callee, args } => return self.eval_call(callee, args, expr.span),
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_value(operand)?;
                let message = match op {
                    UnaryOp::Neg => Message::Neg,
                    UnaryOp::Not => Message::Not,
                };
                self.send(&operand, message)?
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_value(left)?;
                let right = self.eval_value(right)?;
                self.send(&left, Message::Binary(*op, right))?
            }
            ExprKind::Array(elems) => Value::array(self.eval_values(elems)?),
            ExprKind::Set(elems) => Value::set(self.eval_values(elems)?),
            ExprKind::Dict(fields) => self.eval_dict(fields)?,
            ExprKind::Func(decl) => self.eval_func(decl),
        };
        self.stack.push(value);
        Ok(())
    }

    /// `true`/`false`, then the environment chain, then the builtin
    /// registry.
    fn eval_ident(&self, name: &str) -> EvalResult {
        match name {
            "true" => return Ok(Value::boolean(true)),
            "false" => return Ok(Value::boolean(false)),
            _ => {}
        }
        if let Some(value) = self.env.lookup(name) {
            return Ok(value);
        }
        if self.builtins.contains(name) {
            return Ok(Value::builtin(name));
        }
        Err(undefined_name(name))
    }

    fn eval_dict(&mut self, fields: &[DictField]) -> EvalResult {
        let mut pairs = Vec::with_capacity(fields.len());
        for field in fields {
            let key = self.eval_value(&field.key)?;
            let value = self.eval_value(&field.value)?;
            pairs.push((key, value));
        }
        Ok(Value::dict_from_pairs(pairs))
    }

    /// A function value closing over the current frame. A named declaration
    /// is also bound under its name in the current frame.
    fn eval_func(&mut self, decl: &Arc<FuncDecl>) -> Value {
        let func = Value::user_function(Arc::clone(decl), self.env.clone());
        if let Some(name) = &decl.name {
            self.env.define(name, func.clone());
        }
        func
    }

    /// Dispatch a message that produces exactly one value.
    pub(crate) fn send(&mut self, receiver: &Value, message: Message<'_>) -> EvalResult {
        let selector = message.name();
        let results = dispatch(self, receiver, message)?;
        expect_single(results, selector)
    }
}
