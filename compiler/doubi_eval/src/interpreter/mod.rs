//! Tree-walking interpreter for doubi.
//!
//! # Architecture
//!
//! The interpreter walks `doubi_ir` trees directly. Expressions push their
//! results onto a single operand stack; statements leave its depth
//! unchanged. Every value-level operation goes through
//! [`dispatch`](crate::dispatch::dispatch); the interpreter never inspects
//! operand types itself.
//!
//! - `expr` - expression nodes, literals, identifiers
//! - `call` - call resolution and user-function invocation
//! - `stmt` - blocks, `if`, `return`, `break`/`continue`
//! - `assign` - plain, multi and compound assignment, `++`/`--`
//! - `loops` - conditional and collection loops
//! - `spawn` - the `go` statement
//!
//! # Control flow
//!
//! `return`, `break` and `continue` set a flag and let every enclosing block
//! and loop unwind by checking it. Errors travel separately as `Err`, which
//! short-circuits the same way; frames and function context are restored on
//! the way out by guards and explicit saves.

mod assign;
mod builder;
mod call;
mod expr;
mod literal;
mod loops;
mod operand_stack;
mod scope_guard;
mod spawn;
mod stmt;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use std::sync::Arc;

use doubi_ir::{Expr, FuncDecl, Span, Stmt};

use crate::builtins::{BuiltinFn, BuiltinRegistry};
use crate::diagnostics::CallStack;
use crate::dispatch::{expect_single, Invoker, Results};
use crate::environment::{Environment, FunctionScope, LocalRebinding};
use crate::errors::EvalResult;
use crate::print_handler::SharedPrintHandler;
use crate::shared::SharedRegistry;
use crate::value::{UserFunction, Value};
use operand_stack::OperandStack;

/// Which frame a user call's parameter frame is chained under.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CallScoping {
    /// Under the caller's current environment. The captured closure frame
    /// is not consulted, so the body resolves names through the caller.
    #[default]
    CallSite,
    /// Under the environment captured when the function was created.
    Lexical,
}

/// The three pending-exit flags.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct ControlFlags {
    pub(crate) returning: bool,
    pub(crate) breaking: bool,
    pub(crate) continuing: bool,
}

/// The user function whose body is executing.
#[derive(Clone, Debug)]
pub(crate) struct ActiveFunction {
    pub(crate) decl: Arc<FuncDecl>,
    /// Frame holding the call's parameters.
    pub(crate) frame: Environment,
}

/// Tree-walking interpreter.
///
/// One interpreter runs on one thread; `go` forks a new interpreter that
/// shares environment frames, values, builtins and the print handler with
/// this one.
pub struct Interpreter {
    /// Current environment frame.
    pub(crate) env: Environment,
    /// Outermost frame; `run_program` executes here.
    pub(crate) globals: Environment,
    pub(crate) stack: OperandStack,
    pub(crate) function: Option<ActiveFunction>,
    pub(crate) loop_depth: usize,
    pub(crate) flags: ControlFlags,
    pub(crate) builtins: SharedRegistry<BuiltinRegistry>,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) call_scoping: CallScoping,
    pub(crate) local_rebinding: LocalRebinding,
    pub(crate) call_stack: CallStack,
}

impl Interpreter {
    /// Interpreter with default settings, printing to stdout.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// Execute `program` statement by statement in the outermost frame.
    ///
    /// A top-level `return` stops the program. On error the operand stack,
    /// flags and call stack are reset so the interpreter can run again;
    /// bindings made before the error are kept.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
    pub fn run_program(&mut self, program: &[Stmt]) -> EvalResult<()> {
        self.env = self.globals.clone();
        let base = self.stack.len();
        let result = self.exec_stmts(program);
        self.stack.truncate(base);
        self.flags = ControlFlags::default();
        if result.is_err() {
            self.reset();
        }
        result
    }

    /// Evaluate one expression in the current environment.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        let result = self.eval_value(expr);
        if result.is_err() {
            self.reset();
        }
        result
    }

    /// Value bound to `name`, searching outward from the current frame.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.env.lookup(name)
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn call_scoping(&self) -> CallScoping {
        self.call_scoping
    }

    pub fn local_rebinding(&self) -> LocalRebinding {
        self.local_rebinding
    }

    /// Drop transient state: operand stack, flags, call stack, function
    /// context. The current environment returns to the outermost frame.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.flags = ControlFlags::default();
        self.call_stack.clear();
        self.function = None;
        self.loop_depth = 0;
        self.env = self.globals.clone();
    }

    /// Evaluate `expr` and take its single result.
    pub(crate) fn eval_value(&mut self, expr: &Expr) -> EvalResult<Value> {
        let base = self.stack.len();
        self.eval_expr(expr)?;
        let results = self.stack.take_from(base);
        expect_single(results, expr.kind.label()).map_err(|e| e.or_span(expr.span))
    }

    /// Evaluate `exprs` left to right, one value each.
    pub(crate) fn eval_values(&mut self, exprs: &[Expr]) -> EvalResult<Vec<Value>> {
        exprs.iter().map(|e| self.eval_value(e)).collect()
    }

    /// Assignment-rule view of the active function.
    pub(crate) fn function_scope(&self) -> Option<FunctionScope<'_>> {
        self.function.as_ref().map(|f| FunctionScope {
            locals: &f.decl.locals,
            frame: &f.frame,
            rebinding: self.local_rebinding,
        })
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Invoker for Interpreter {
    fn call_user(&mut self, func: &UserFunction, args: Vec<Value>) -> EvalResult<Results> {
        self.call_function(func, args, Span::DUMMY)
    }

    fn builtin(&self, name: &str) -> Option<BuiltinFn> {
        self.builtins.get(name)
    }

    fn write_output(&mut self, text: &str) {
        self.print_handler.print(text);
    }
}
