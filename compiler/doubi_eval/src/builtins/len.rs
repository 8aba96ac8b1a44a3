use crate::dispatch::{one, Invoker, Results};
use crate::errors::{integer_overflow, type_mismatch, wrong_arg_count, EvalResult};
use crate::value::Value;

/// `len(x)` for strings and collections.
pub(super) fn len(_ctx: &mut dyn Invoker, args: Vec<Value>) -> EvalResult<Results> {
    let [value]: [Value; 1] = args
        .try_into()
        .map_err(|args: Vec<Value>| wrong_arg_count("len", 1, args.len()))?;
    let Some(len) = value.length() else {
        return Err(type_mismatch("string or collection", value.type_name()));
    };
    i64::try_from(len)
        .map(|n| one(Value::int(n)))
        .map_err(|_| integer_overflow("len"))
}
