//! Doubi Eval - tree-walking evaluator for the doubi scripting language.
//!
//! # Architecture
//!
//! - `environment`: chained scope frames shared between closures and threads
//! - `value`: the object model; every value carries a property table
//! - `dispatch`: the message protocol every operator, index, property access
//!   and call goes through
//! - `builtins`: process-wide native function registry
//! - `interpreter`: walks `doubi_ir` trees, drives the pieces above
//!
//! # Errors
//!
//! Every operation returns [`EvalResult`]. Nothing in this crate terminates
//! the process; deciding what to do with an [`EvalError`] is up to the host.

mod builtins;
mod diagnostics;
pub mod dispatch;
mod environment;
mod errors;
mod interpreter;
mod print_handler;
mod shared;
mod stack;
mod value;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use builtins::{global_builtins, BuiltinFn, BuiltinRegistry};
pub use diagnostics::{CallFrame, CallStack};
pub use dispatch::{dispatch, Invoker, Message, Results};
pub use environment::{AssignOutcome, Environment, FunctionScope, LocalRebinding};
pub use errors::*;
pub use interpreter::{CallScoping, Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
    StdoutPrintHandler,
};
pub use shared::SharedRegistry;
pub use stack::ensure_sufficient_stack;
pub use value::{BuiltinMethod, FunctionValue, Heap, UserFunction, Value, ValueKind};
