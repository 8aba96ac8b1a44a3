//! The message protocol.
//!
//! Every operator, property access, index, slice and call the evaluator
//! performs is a `Message` sent to a receiver through [`dispatch`]. The
//! message set is closed; each value kind handles the messages it
//! understands and reports every other one as an unsupported operation.
//!
//! Dispatch never mutates scalars. `Compound`, `Inc` and `Dec` return the
//! updated value and the evaluator writes it back to the assignment target.
//! Collections mutate in place (`+=` on an array extends it and returns the
//! same array).

mod collections;
mod function;
mod logic;
mod methods;
mod numeric;
mod text;

use doubi_ir::{AssignOp, BinaryOp};
use smallvec::{smallvec, SmallVec};

use crate::builtins::BuiltinFn;
use crate::errors::{
    undefined_property, unsupported_operation, value_count_mismatch, value_expected, EvalError,
    EvalResult,
};
use crate::value::{BuiltinMethod, UserFunction, Value, ValueKind};

/// Values produced by one dispatch. Almost always exactly one.
pub type Results = SmallVec<[Value; 1]>;

/// Protocol operations a value can receive.
#[derive(Debug)]
pub enum Message<'a> {
    /// `x.name`
    GetProperty(&'a str),
    /// `x.name = value`
    SetProperty(&'a str, Value),
    /// `x[index]`
    GetIndex(Value),
    /// `x[index] = value`
    SetIndex(Value, Value),
    /// `x[low:high]`; a missing bound defaults to 0 or the length.
    Slice(Option<Value>, Option<Value>),
    /// `x(args...)`
    Call(Vec<Value>),
    Inc,
    Dec,
    Neg,
    Not,
    Binary(BinaryOp, Value),
    /// `x op= rhs`; produces the updated value.
    Compound(AssignOp, Value),
    /// Built-in instance method invoked through a bound function.
    Method(BuiltinMethod, Vec<Value>),
}

impl Message<'_> {
    /// Protocol selector, used in error messages and traces.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetProperty(_) => "__get_property__",
            Self::SetProperty(..) => "__set_property__",
            Self::GetIndex(_) => "__get_index__",
            Self::SetIndex(..) => "__set_index__",
            Self::Slice(..) => "__slice__",
            Self::Call(_) => "__call__",
            Self::Inc => "__inc__",
            Self::Dec => "__dec__",
            Self::Neg => "__neg__",
            Self::Not => "__not__",
            Self::Binary(op, _) => binary_selector(*op),
            Self::Compound(op, _) => compound_selector(*op),
            Self::Method(method, _) => method.name(),
        }
    }
}

/// Selector for a binary operator.
pub const fn binary_selector(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "__add__",
        BinaryOp::Sub => "__sub__",
        BinaryOp::Mul => "__mul__",
        BinaryOp::Div => "__quo__",
        BinaryOp::Rem => "__rem__",
        BinaryOp::BitAnd => "__and__",
        BinaryOp::BitOr => "__or__",
        BinaryOp::BitXor => "__xor__",
        BinaryOp::Shl => "__shl__",
        BinaryOp::Shr => "__shr__",
        BinaryOp::AndNot => "__and_not__",
        BinaryOp::And => "__land__",
        BinaryOp::Or => "__lor__",
        BinaryOp::Eq => "__eql__",
        BinaryOp::NotEq => "__neq__",
        BinaryOp::Lt => "__lss__",
        BinaryOp::LtEq => "__leq__",
        BinaryOp::Gt => "__gtr__",
        BinaryOp::GtEq => "__geq__",
    }
}

/// Selector for a compound assignment operator.
pub const fn compound_selector(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "__=__",
        AssignOp::Add => "__+=__",
        AssignOp::Sub => "__-=__",
        AssignOp::Mul => "__*=__",
        AssignOp::Div => "__/=__",
        AssignOp::Rem => "__%=__",
        AssignOp::BitAnd => "__&=__",
        AssignOp::BitOr => "__|=__",
        AssignOp::BitXor => "__^=__",
        AssignOp::Shl => "__<<=__",
        AssignOp::Shr => "__>>=__",
        AssignOp::AndNot => "__&^=__",
    }
}

/// Services dispatch needs from whoever is evaluating.
///
/// The interpreter implements this; `test_helpers::MockInvoker` stands in
/// for it in unit tests.
pub trait Invoker {
    /// Run a user function with already-evaluated arguments.
    fn call_user(&mut self, func: &UserFunction, args: Vec<Value>) -> EvalResult<Results>;

    /// Resolve a builtin by name.
    fn builtin(&self, name: &str) -> Option<BuiltinFn>;

    /// Write to the output sink, as is.
    fn write_output(&mut self, text: &str);
}

/// Send `message` to `receiver`.
pub fn dispatch(
    ctx: &mut dyn Invoker,
    receiver: &Value,
    message: Message<'_>,
) -> EvalResult<Results> {
    tracing::trace!(
        receiver = receiver.type_name(),
        message = message.name(),
        "dispatch"
    );
    match message {
        Message::GetProperty(name) => get_property(receiver, name).map(one),
        Message::SetProperty(name, value) => {
            set_property(receiver, name, value);
            Ok(Results::new())
        }
        Message::Call(args) => function::call(ctx, receiver, args),
        Message::Method(method, args) => methods::invoke(ctx, receiver, method, args),
        message => match receiver.kind() {
            ValueKind::Int(n) => numeric::dispatch_int(*n, message),
            ValueKind::Float(x) => numeric::dispatch_float(*x, message),
            ValueKind::Str(s) => text::dispatch_str(s, message),
            ValueKind::Bool(b) => logic::dispatch_bool(*b, message),
            ValueKind::Array(items) => collections::dispatch_array(receiver, items, message),
            ValueKind::Set(_) | ValueKind::Function(_) => Err(unsupported(receiver, &message)),
            ValueKind::Dict(entries) => collections::dispatch_dict(receiver, entries, message),
        },
    }
}

/// Property lookup: the receiver's own table first, then its kind's
/// built-in methods. A dict's entries are its property table.
fn get_property(receiver: &Value, name: &str) -> EvalResult {
    let own = match receiver.kind() {
        ValueKind::Dict(entries) => entries.read().get(name).cloned(),
        _ => receiver.property(name),
    };
    if let Some(value) = own {
        return Ok(value);
    }
    match BuiltinMethod::lookup(receiver.kind(), name) {
        Some(method) => Ok(Value::bound_method(receiver.clone(), method)),
        None => Err(undefined_property(name, receiver.type_name())),
    }
}

fn set_property(receiver: &Value, name: &str, value: Value) {
    match receiver.kind() {
        ValueKind::Dict(entries) => {
            entries.write().insert(name.to_string(), value);
        }
        _ => receiver.set_property(name, value),
    }
}

#[inline]
pub(crate) fn one(value: Value) -> Results {
    smallvec![value]
}

/// The single value of `results`; `context` names the producer for errors.
pub fn expect_single(results: Results, context: &str) -> EvalResult<Value> {
    let got = results.len();
    let mut iter = results.into_iter();
    match (iter.next(), iter.next()) {
        (Some(value), None) => Ok(value),
        (None, _) => Err(value_expected(context)),
        (Some(_), Some(_)) => Err(value_count_mismatch(1, got)),
    }
}

#[cold]
fn unsupported(receiver: &Value, message: &Message<'_>) -> EvalError {
    unsupported_operation(receiver.type_name(), message.name())
}
