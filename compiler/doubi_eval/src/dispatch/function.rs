//! The `call` message.

use super::{dispatch, Invoker, Message, Results};
use crate::errors::{undefined_name, unsupported_operation, EvalResult};
use crate::value::{FunctionValue, Value};

pub(super) fn call(ctx: &mut dyn Invoker, callee: &Value, args: Vec<Value>) -> EvalResult<Results> {
    let Some(func) = callee.as_function() else {
        return Err(unsupported_operation(callee.type_name(), "__call__"));
    };
    match func {
        FunctionValue::User(func) => ctx.call_user(func, args),
        FunctionValue::Builtin { name } => {
            let native = ctx.builtin(name).ok_or_else(|| undefined_name(name))?;
            native(ctx, args)
        }
        FunctionValue::Bound { receiver, method } => {
            dispatch(ctx, receiver, Message::Method(*method, args))
        }
    }
}
