//! Assignment statements and `++`/`--`.
//!
//! Right-hand sides are evaluated before any target is touched, so
//! `a, b = b, a` swaps. Compound assignment and `++`/`--` read the target,
//! dispatch the operator to the current value, and write the result back.

use doubi_ir::{AssignOp, Expr, ExprKind, IncDecOp};

use super::Interpreter;
use crate::dispatch::{dispatch, Message};
use crate::errors::{invalid_assign_target, undefined_name, value_count_mismatch, EvalResult};
use crate::value::Value;

/// An assignable location, with its receiver and index already evaluated.
enum Place<'e> {
    Variable(&'e str),
    Element { receiver: Value, index: Value },
    Property { receiver: Value, name: &'e str },
}

impl Interpreter {
    pub(super) fn exec_assign(&mut self, op: AssignOp, lhs: &[Expr], rhs: &[Expr]) -> EvalResult<()> {
        match op {
            AssignOp::Assign => self.exec_plain_assign(lhs, rhs),
            op => self.exec_compound_assign(op, lhs, rhs),
        }
    }

    /// `a, b = x, y` pairs positionally; `a, b = f()` spreads the results of
    /// one multi-value call.
    fn exec_plain_assign(&mut self, lhs: &[Expr], rhs: &[Expr]) -> EvalResult<()> {
        let values = if lhs.len() == rhs.len() {
            self.eval_values(rhs)?
        } else if let [single] = rhs {
            let base = self.stack.len();
            self.eval_expr(single)?;
            let results = self.stack.take_from(base);
            if results.len() != lhs.len() {
                return Err(value_count_mismatch(lhs.len(), results.len()).or_span(single.span));
            }
            results.into_vec()
        } else {
            return Err(value_count_mismatch(lhs.len(), rhs.len()));
        };

        for (target, value) in lhs.iter().zip(values) {
            let place = self.place(target)?;
            match place {
                Place::Variable(name) => {
                    let outcome = self.env.assign(name, value, self.function_scope());
                    tracing::trace!(name, ?outcome, "assign");
                }
                place => self.write_place(place, value)?,
            }
        }
        Ok(())
    }

    fn exec_compound_assign(&mut self, op: AssignOp, lhs: &[Expr], rhs: &[Expr]) -> EvalResult<()> {
        if lhs.len() != rhs.len() {
            return Err(value_count_mismatch(lhs.len(), rhs.len()));
        }
        for (target, value) in lhs.iter().zip(rhs) {
            let operand = self.eval_value(value)?;
            self.update_place(target, Message::Compound(op, operand))?;
        }
        Ok(())
    }

    pub(super) fn exec_inc_dec(&mut self, target: &Expr, op: IncDecOp) -> EvalResult<()> {
        let message = match op {
            IncDecOp::Inc => Message::Inc,
            IncDecOp::Dec => Message::Dec,
        };
        self.update_place(target, message)
    }

    /// Read `target`, send `message` to its value, store the result.
    fn update_place(&mut self, target: &Expr, message: Message<'_>) -> EvalResult<()> {
        let place = self.place(target)?;
        let current = match &place {
            Place::Variable(name) => self.env.lookup(name).ok_or_else(|| undefined_name(name))?,
            Place::Element { receiver, index } => {
                self.send(receiver, Message::GetIndex(index.clone()))?
            }
            Place::Property { receiver, name } => self.send(receiver, Message::GetProperty(name))?,
        };
        let updated = self.send(&current, message)?;
        self.write_place(place, updated)
    }

    fn place<'e>(&mut self, target: &'e Expr) -> EvalResult<Place<'e>> {
        match &target.kind {
            ExprKind::Ident(name) => Ok(Place::Variable(name)),
            ExprKind::Index { target, index } => {
                let receiver = self.eval_value(target)?;
                let index = self.eval_value(index)?;
                Ok(Place::Element { receiver, index })
            }
            ExprKind::Selector { target, field } => {
                let receiver = self.eval_value(target)?;
                Ok(Place::Property {
                    receiver,
                    name: field,
                })
            }
            ExprKind::Paren(inner) => self.place(inner),
            other => Err(invalid_assign_target(other.label()).or_span(target.span)),
        }
    }

    /// Store into an existing location. A variable must already be bound.
    fn write_place(&mut self, place: Place<'_>, value: Value) -> EvalResult<()> {
        let (receiver, message) = match place {
            Place::Variable(name) => {
                return if self.env.update(name, value) {
                    Ok(())
                } else {
                    Err(undefined_name(name))
                };
            }
            Place::Element { receiver, index } => (receiver, Message::SetIndex(index, value)),
            Place::Property { receiver, name } => (receiver, Message::SetProperty(name, value)),
        };
        dispatch(self, &receiver, message)?;
        Ok(())
    }
}
