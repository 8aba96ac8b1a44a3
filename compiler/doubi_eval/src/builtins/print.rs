//! Output builtins.

use crate::dispatch::{Invoker, Results};
use crate::errors::EvalResult;
use crate::value::Value;

fn render(args: &[Value]) -> String {
    let mut out = String::new();
    for arg in args {
        out.push_str(&arg.to_string());
    }
    out
}

/// Writes each argument's display form with no separators or newline.
pub(super) fn print(ctx: &mut dyn Invoker, args: Vec<Value>) -> EvalResult<Results> {
    ctx.write_output(&render(&args));
    Ok(Results::new())
}

pub(super) fn println(ctx: &mut dyn Invoker, args: Vec<Value>) -> EvalResult<Results> {
    let mut line = render(&args);
    line.push('\n');
    ctx.write_output(&line);
    Ok(Results::new())
}
