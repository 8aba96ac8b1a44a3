//! Call resolution and user-function invocation.
//!
//! A call expression resolves its callee one of three ways:
//! 1. A bare identifier bound in no frame but named in the builtin registry
//!    is called natively.
//! 2. A native function value (builtin or bound method) receives `call`.
//! 3. A user function runs its body in a fresh parameter frame.
//!
//! Arguments are always evaluated left to right in the caller's
//! environment, after the callee.

use std::mem;
use std::sync::Arc;

use doubi_ir::{Expr, Span};

use super::{ActiveFunction, CallScoping, ControlFlags, Interpreter};
use crate::builtins::BuiltinFn;
use crate::diagnostics::CallFrame;
use crate::dispatch::{dispatch, Message, Results};
use crate::errors::{wrong_arg_count, EvalResult};
use crate::stack::ensure_sufficient_stack;
use crate::value::{FunctionValue, UserFunction, Value};

/// Caller state a user call replaces and puts back.
struct SavedContext {
    function: Option<ActiveFunction>,
    loop_depth: usize,
    flags: ControlFlags,
}

impl Interpreter {
    pub(super) fn eval_call(&mut self, callee: &Expr, args: &[Expr], span: Span) -> EvalResult<()> {
        if let Some(name) = callee.as_ident() {
            if let Some(native) = self.unbound_builtin(name) {
                let args = self.eval_values(args)?;
                // Natives get a frame of their own, like every other call.
                let results = native(&mut *self.scoped(), args)?;
                self.stack.extend(results);
                return Ok(());
            }
        }

        let func = self.eval_value(callee)?;
        let args = self.eval_values(args)?;
        let results = match func.as_function() {
            Some(FunctionValue::User(user)) => self.call_function(user, args, span)?,
            _ => dispatch(&mut *self.scoped(), &func, Message::Call(args))?,
        };
        self.stack.extend(results);
        Ok(())
    }

    /// The registry entry for `name`, if no frame binds it.
    fn unbound_builtin(&self, name: &str) -> Option<BuiltinFn> {
        if self.env.lookup(name).is_some() {
            return None;
        }
        self.builtins.get(name)
    }

    /// Run a user function with evaluated arguments; returns its results.
    ///
    /// The parameter frame is chained under the caller's environment or the
    /// function's closure, per [`CallScoping`]. The body runs with its own
    /// loop depth and flags; the caller's are restored afterwards, on error
    /// as well.
    #[tracing::instrument(level = "debug", skip_all, fields(function = func.name()))]
    pub(crate) fn call_function(
        &mut self,
        func: &UserFunction,
        args: Vec<Value>,
        call_span: Span,
    ) -> EvalResult<Results> {
        let decl = &func.decl;
        if args.len() != decl.arity() {
            return Err(wrong_arg_count(func.name(), decl.arity(), args.len()));
        }
        self.call_stack.push(CallFrame {
            name: func.name().to_string(),
            call_span: (!call_span.is_dummy()).then_some(call_span),
        })?;

        let parent = match self.call_scoping {
            CallScoping::CallSite => self.env.clone(),
            CallScoping::Lexical => func.closure.clone(),
        };
        let frame = parent.child();
        for (param, arg) in decl.params.iter().zip(args) {
            frame.define(param, arg);
        }

        let base = self.stack.len();
        let saved = SavedContext {
            function: self.function.replace(ActiveFunction {
                decl: Arc::clone(decl),
                frame: frame.clone(),
            }),
            loop_depth: mem::take(&mut self.loop_depth),
            flags: mem::take(&mut self.flags),
        };
        let result = {
            let mut scoped = self.scoped_in(frame);
            ensure_sufficient_stack(|| scoped.exec_block(&decl.body))
        };
        self.function = saved.function;
        self.loop_depth = saved.loop_depth;
        self.flags = saved.flags;

        let result = match result {
            Ok(()) => Ok(self.stack.take_from(base)),
            Err(err) => {
                self.stack.truncate(base);
                Err(self.call_stack.attach_backtrace(err))
            }
        };
        self.call_stack.pop();
        result
    }
}
