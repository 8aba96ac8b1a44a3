//! String messages.

use doubi_ir::{AssignOp, BinaryOp};

use super::{one, Message, Results};
use crate::errors::{binary_type_mismatch, unsupported_operation, EvalResult};
use crate::value::Value;

const STR: &str = "string";

pub(super) fn dispatch_str(s: &str, message: Message<'_>) -> EvalResult<Results> {
    let selector = message.name();
    match message {
        // Concatenation accepts any right operand through its display form.
        Message::Binary(BinaryOp::Add, rhs) | Message::Compound(AssignOp::Add, rhs) => {
            Ok(one(Value::string(format!("{s}{rhs}"))))
        }
        Message::Binary(op, rhs) if op.is_comparison() => {
            let Some(other) = rhs.as_str() else {
                return Err(binary_type_mismatch(op, STR, rhs.type_name()));
            };
            let result = match op {
                BinaryOp::Eq => s == other,
                BinaryOp::NotEq => s != other,
                BinaryOp::Lt => s < other,
                BinaryOp::LtEq => s <= other,
                BinaryOp::Gt => s > other,
                _ => s >= other,
            };
            Ok(one(Value::boolean(result)))
        }
        _ => Err(unsupported_operation(STR, selector)),
    }
}
