//! Built-in instance methods, reached through bound function values.

use super::{dispatch, one, Message, Results};
use crate::dispatch::Invoker;
use crate::errors::{
    integer_overflow, type_mismatch, unsupported_operation, wrong_arg_count, EvalResult,
};
use crate::value::{BuiltinMethod, FunctionValue, Value, ValueKind};

pub(super) fn invoke(
    ctx: &mut dyn Invoker,
    receiver: &Value,
    method: BuiltinMethod,
    args: Vec<Value>,
) -> EvalResult<Results> {
    if BuiltinMethod::lookup(receiver.kind(), method.name()) != Some(method) {
        return Err(unsupported_operation(receiver.type_name(), method.name()));
    }
    match method {
        BuiltinMethod::Times => times(ctx, receiver, args),
        BuiltinMethod::Abs => {
            expect_no_args(method, &args)?;
            let n = receiver.as_int().unwrap_or_default();
            n.checked_abs()
                .map(|n| one(Value::int(n)))
                .ok_or_else(|| integer_overflow("abs"))
        }
        BuiltinMethod::Append => {
            if args.is_empty() {
                return Err(wrong_arg_count(method.name(), 1, 0));
            }
            if let ValueKind::Array(items) = receiver.kind() {
                items.write().extend(args);
            }
            Ok(Results::new())
        }
        BuiltinMethod::Length => {
            expect_no_args(method, &args)?;
            let len = receiver.length().unwrap_or_default();
            i64::try_from(len)
                .map(|n| one(Value::int(n)))
                .map_err(|_| integer_overflow("length"))
        }
    }
}

/// `n.times(f)` calls `f(i)` for `i` in `0..n`. A callback declared with no
/// parameters is called without the index.
fn times(ctx: &mut dyn Invoker, receiver: &Value, args: Vec<Value>) -> EvalResult<Results> {
    let count = receiver.as_int().unwrap_or_default();
    let [callback]: [Value; 1] = args
        .try_into()
        .map_err(|args: Vec<Value>| wrong_arg_count("times", 1, args.len()))?;
    let Some(func) = callback.as_function() else {
        return Err(type_mismatch("function", callback.type_name()));
    };
    let pass_index = !matches!(func, FunctionValue::User(f) if f.decl.arity() == 0);
    for i in 0..count {
        let call_args = if pass_index {
            vec![Value::int(i)]
        } else {
            Vec::new()
        };
        dispatch(ctx, &callback, Message::Call(call_args))?;
    }
    Ok(Results::new())
}

fn expect_no_args(method: BuiltinMethod, args: &[Value]) -> EvalResult<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(wrong_arg_count(method.name(), 0, args.len()))
    }
}
