//! Array and dict messages.
//!
//! Writes go through the collection's own lock and are visible to every
//! holder of the value. Operands are snapshotted before the receiver is
//! locked for writing, so `a += a` and `a[0] = a` never lock one collection
//! twice.

use doubi_ir::{AssignOp, BinaryOp};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{one, unsupported, Message, Results};
use crate::errors::{
    binary_type_mismatch, index_out_of_bounds, key_not_found, type_mismatch, EvalResult,
};
use crate::value::{Value, ValueKind};

pub(super) fn dispatch_array(
    receiver: &Value,
    items: &RwLock<Vec<Value>>,
    message: Message<'_>,
) -> EvalResult<Results> {
    match message {
        Message::Binary(BinaryOp::Add, rhs) => {
            let tail = array_operand(BinaryOp::Add, &rhs)?;
            let mut joined = items.read().clone();
            joined.extend(tail);
            Ok(one(Value::array(joined)))
        }
        Message::Compound(AssignOp::Add, rhs) => {
            let tail = array_operand(BinaryOp::Add, &rhs)?;
            items.write().extend(tail);
            Ok(one(receiver.clone()))
        }
        Message::GetIndex(index) => {
            let items = items.read();
            let i = element_index(&index, items.len())?;
            Ok(one(items[i].clone()))
        }
        Message::SetIndex(index, value) => {
            let mut items = items.write();
            let i = element_index(&index, items.len())?;
            items[i] = value;
            Ok(Results::new())
        }
        Message::Slice(low, high) => {
            let items = items.read();
            let len = items.len();
            let high = slice_bound(high.as_ref(), len, len)?;
            let low_bound = slice_bound(low.as_ref(), 0, len)?;
            if low_bound > high {
                let low = low.and_then(|v| v.as_int()).unwrap_or_default();
                return Err(index_out_of_bounds(low, len));
            }
            Ok(one(Value::array(items[low_bound..high].to_vec())))
        }
        message => Err(unsupported(receiver, &message)),
    }
}

pub(super) fn dispatch_dict(
    receiver: &Value,
    entries: &RwLock<FxHashMap<String, Value>>,
    message: Message<'_>,
) -> EvalResult<Results> {
    match message {
        Message::GetIndex(key) => {
            let found = entries.read().get(&key.hash_key()).cloned();
            found
                .map(one)
                .ok_or_else(|| key_not_found(&key.to_string()))
        }
        Message::SetIndex(key, value) => {
            entries.write().insert(key.hash_key(), value);
            Ok(Results::new())
        }
        message => Err(unsupported(receiver, &message)),
    }
}

fn array_operand(op: BinaryOp, rhs: &Value) -> EvalResult<Vec<Value>> {
    match rhs.kind() {
        ValueKind::Array(items) => Ok(items.read().clone()),
        _ => Err(binary_type_mismatch(op, "array", rhs.type_name())),
    }
}

/// Zero-based element index, bounds-checked against `len`.
fn element_index(index: &Value, len: usize) -> EvalResult<usize> {
    let i = index
        .as_int()
        .ok_or_else(|| type_mismatch("integer", index.type_name()))?;
    usize::try_from(i)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_bounds(i, len))
}

/// Slice bound in `0..=len`, or `default` when absent.
fn slice_bound(bound: Option<&Value>, default: usize, len: usize) -> EvalResult<usize> {
    let Some(bound) = bound else {
        return Ok(default);
    };
    let i = bound
        .as_int()
        .ok_or_else(|| type_mismatch("integer", bound.type_name()))?;
    usize::try_from(i)
        .ok()
        .filter(|&i| i <= len)
        .ok_or_else(|| index_out_of_bounds(i, len))
}
