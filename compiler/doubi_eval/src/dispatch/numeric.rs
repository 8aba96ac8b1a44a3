//! Integer and float messages.
//!
//! Integer with integer stays integer, using checked arithmetic; integer
//! with float promotes both sides to `f64`. Integer division and remainder
//! truncate toward zero. Float arithmetic follows IEEE 754.

use doubi_ir::BinaryOp;

use super::{one, Message, Results};
use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, unsupported_operation, EvalError,
    EvalResult,
};
use crate::value::{Value, ValueKind};

const INT: &str = "integer";
const FLOAT: &str = "float";

pub(super) fn dispatch_int(n: i64, message: Message<'_>) -> EvalResult<Results> {
    let selector = message.name();
    match message {
        Message::Binary(op, rhs) => int_binary(n, op, &rhs, selector).map(one),
        Message::Compound(op, rhs) => match op.binary_op() {
            Some(op) => int_binary(n, op, &rhs, selector).map(one),
            None => Err(unsupported_operation(INT, selector)),
        },
        Message::Inc => checked(n.checked_add(1), "increment").map(one),
        Message::Dec => checked(n.checked_sub(1), "decrement").map(one),
        Message::Neg => checked(n.checked_neg(), "negation").map(one),
        _ => Err(unsupported_operation(INT, selector)),
    }
}

pub(super) fn dispatch_float(x: f64, message: Message<'_>) -> EvalResult<Results> {
    let selector = message.name();
    match message {
        Message::Binary(op, rhs) => float_binary(x, op, &rhs, selector).map(one),
        Message::Compound(op, rhs) => match op.binary_op() {
            Some(op) => float_binary(x, op, &rhs, selector).map(one),
            None => Err(unsupported_operation(FLOAT, selector)),
        },
        Message::Inc => Ok(one(Value::float(x + 1.0))),
        Message::Dec => Ok(one(Value::float(x - 1.0))),
        Message::Neg => Ok(one(Value::float(-x))),
        _ => Err(unsupported_operation(FLOAT, selector)),
    }
}

#[allow(clippy::cast_precision_loss)]
fn int_binary(a: i64, op: BinaryOp, rhs: &Value, selector: &str) -> EvalResult {
    if matches!(op, BinaryOp::And | BinaryOp::Or) {
        return Err(unsupported_operation(INT, selector));
    }
    match rhs.kind() {
        ValueKind::Int(b) => int_int(a, *b, op),
        ValueKind::Float(b) => float_float(a as f64, *b, op, selector),
        _ => Err(binary_type_mismatch(op, INT, rhs.type_name())),
    }
}

#[allow(clippy::cast_precision_loss)]
fn float_binary(a: f64, op: BinaryOp, rhs: &Value, selector: &str) -> EvalResult {
    match rhs.kind() {
        ValueKind::Float(b) => float_float(a, *b, op, selector),
        ValueKind::Int(b) => float_float(a, *b as f64, op, selector),
        _ => Err(binary_type_mismatch(op, FLOAT, rhs.type_name())),
    }
}

#[inline]
fn checked(result: Option<i64>, operation: &str) -> EvalResult {
    result.map(Value::int).ok_or_else(|| integer_overflow(operation))
}

fn int_int(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked(a.checked_mul(b), "multiplication"),
        BinaryOp::Div if b == 0 => Err(division_by_zero()),
        BinaryOp::Div => checked(a.checked_div(b), "division"),
        BinaryOp::Rem if b == 0 => Err(division_by_zero()),
        BinaryOp::Rem => checked(a.checked_rem(b), "remainder"),
        BinaryOp::BitAnd => Ok(Value::int(a & b)),
        BinaryOp::BitOr => Ok(Value::int(a | b)),
        BinaryOp::BitXor => Ok(Value::int(a ^ b)),
        BinaryOp::AndNot => Ok(Value::int(a & !b)),
        BinaryOp::Shl => shift_amount(b).map(|s| Value::int(if s >= 64 { 0 } else { a << s })),
        // Arithmetic: the sign bit fills in from the left.
        BinaryOp::Shr => shift_amount(b).map(|s| {
            if s >= 64 {
                Value::int(if a < 0 { -1 } else { 0 })
            } else {
                Value::int(a >> s)
            }
        }),
        BinaryOp::Eq => Ok(Value::boolean(a == b)),
        BinaryOp::NotEq => Ok(Value::boolean(a != b)),
        BinaryOp::Lt => Ok(Value::boolean(a < b)),
        BinaryOp::LtEq => Ok(Value::boolean(a <= b)),
        BinaryOp::Gt => Ok(Value::boolean(a > b)),
        BinaryOp::GtEq => Ok(Value::boolean(a >= b)),
        BinaryOp::And | BinaryOp::Or => Err(binary_type_mismatch(op, INT, INT)),
    }
}

fn shift_amount(b: i64) -> EvalResult<u32> {
    u32::try_from(b).map_err(|_| EvalError::new(format!("invalid shift amount {b}")))
}

#[allow(clippy::float_cmp)]
fn float_float(a: f64, b: f64, op: BinaryOp, selector: &str) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::float(a + b)),
        BinaryOp::Sub => Ok(Value::float(a - b)),
        BinaryOp::Mul => Ok(Value::float(a * b)),
        BinaryOp::Div => Ok(Value::float(a / b)),
        BinaryOp::Rem => Ok(Value::float(a % b)),
        BinaryOp::Eq => Ok(Value::boolean(a == b)),
        BinaryOp::NotEq => Ok(Value::boolean(a != b)),
        BinaryOp::Lt => Ok(Value::boolean(a < b)),
        BinaryOp::LtEq => Ok(Value::boolean(a <= b)),
        BinaryOp::Gt => Ok(Value::boolean(a > b)),
        BinaryOp::GtEq => Ok(Value::boolean(a >= b)),
        BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::Shl
        | BinaryOp::Shr
        | BinaryOp::AndNot
        | BinaryOp::And
        | BinaryOp::Or => Err(unsupported_operation(FLOAT, selector)),
    }
}
