//! Test helpers for exercising dispatch without an interpreter.

#![allow(clippy::unwrap_used)]

use doubi_ir::build;

use crate::builtins::{BuiltinFn, BuiltinRegistry};
use crate::dispatch::{dispatch, expect_single, Invoker, Message, Results};
use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::value::{UserFunction, Value};

/// Records user calls and output instead of evaluating anything.
///
/// Every user call returns the configured result (none by default).
pub(crate) struct MockInvoker {
    builtins: BuiltinRegistry,
    output: String,
    calls: Vec<(String, Vec<Value>)>,
    call_result: Option<Value>,
}

impl MockInvoker {
    pub(crate) fn new() -> Self {
        MockInvoker {
            builtins: BuiltinRegistry::standard(),
            output: String::new(),
            calls: Vec::new(),
            call_result: None,
        }
    }

    /// Value every user call returns.
    pub(crate) fn with_call_result(mut self, value: Value) -> Self {
        self.call_result = Some(value);
        self
    }

    pub(crate) fn output(&self) -> &str {
        &self.output
    }

    /// `(function name, arguments)` of every user call, in order.
    pub(crate) fn calls(&self) -> &[(String, Vec<Value>)] {
        &self.calls
    }

    /// Dispatch and unwrap a single result.
    pub(crate) fn send(&mut self, receiver: &Value, message: Message<'_>) -> EvalResult<Value> {
        let results = dispatch(self, receiver, message)?;
        expect_single(results, "dispatch")
    }

    /// Dispatch expecting no results.
    pub(crate) fn send_unit(&mut self, receiver: &Value, message: Message<'_>) -> EvalResult<()> {
        let results = dispatch(self, receiver, message)?;
        assert!(results.is_empty(), "unexpected results: {results:?}");
        Ok(())
    }
}

impl Invoker for MockInvoker {
    fn call_user(&mut self, func: &UserFunction, args: Vec<Value>) -> EvalResult<Results> {
        self.calls.push((func.name().to_string(), args));
        Ok(self.call_result.clone().into_iter().collect())
    }

    fn builtin(&self, name: &str) -> Option<BuiltinFn> {
        self.builtins.get(name)
    }

    fn write_output(&mut self, text: &str) {
        self.output.push_str(text);
    }
}

/// A user function value with the given parameters and an empty body.
pub(crate) fn user_fn(name: &str, params: &[&str]) -> Value {
    Value::user_function(
        build::func_decl(Some(name), params, build::block(Vec::new())),
        Environment::new(),
    )
}
