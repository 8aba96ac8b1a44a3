//! Bool messages. `&&` and `||` see both operands already evaluated.

use doubi_ir::BinaryOp;

use super::{one, Message, Results};
use crate::errors::{binary_type_mismatch, unsupported_operation, EvalResult};
use crate::value::Value;

const BOOL: &str = "bool";

pub(super) fn dispatch_bool(b: bool, message: Message<'_>) -> EvalResult<Results> {
    let selector = message.name();
    match message {
        Message::Binary(op @ (BinaryOp::And | BinaryOp::Or | BinaryOp::Eq | BinaryOp::NotEq), rhs) => {
            let Some(other) = rhs.as_bool() else {
                return Err(binary_type_mismatch(op, BOOL, rhs.type_name()));
            };
            let result = match op {
                BinaryOp::And => b && other,
                BinaryOp::Or => b || other,
                BinaryOp::Eq => b == other,
                _ => b != other,
            };
            Ok(one(Value::boolean(result)))
        }
        Message::Not => Ok(one(Value::boolean(!b))),
        _ => Err(unsupported_operation(BOOL, selector)),
    }
}
