//! Function values: user closures, registry builtins, bound methods.

use std::fmt;
use std::sync::Arc;

use doubi_ir::FuncDecl;

use super::{Value, ValueKind};
use crate::environment::Environment;

/// Display name of functions declared without a name.
pub const ANONYMOUS_FUNCTION: &str = "#<closure>";

/// Native instance methods every value of a given kind understands.
///
/// Looked up after the receiver's own property table, so a user field with
/// the same name shadows the method.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinMethod {
    /// `n.times(f)`: call `f` with 0..n.
    Times,
    /// `n.abs()`
    Abs,
    /// `arr.append(x, ...)`: push in place.
    Append,
    /// `x.length()` on strings, arrays, sets and dicts.
    Length,
}

impl BuiltinMethod {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Times => "times",
            Self::Abs => "abs",
            Self::Append => "append",
            Self::Length => "length",
        }
    }

    /// The built-in method called `name` on receivers of `kind`, if any.
    pub fn lookup(kind: &ValueKind, name: &str) -> Option<Self> {
        match (kind, name) {
            (ValueKind::Int(_), "times") => Some(Self::Times),
            (ValueKind::Int(_), "abs") => Some(Self::Abs),
            (ValueKind::Array(_), "append") => Some(Self::Append),
            (
                ValueKind::Str(_) | ValueKind::Array(_) | ValueKind::Set(_) | ValueKind::Dict(_),
                "length",
            ) => Some(Self::Length),
            _ => None,
        }
    }
}

/// A function declared in source plus the frame it was created in.
#[derive(Clone)]
pub struct UserFunction {
    pub decl: Arc<FuncDecl>,
    /// Frame active when the declaration was evaluated. Fixed for the
    /// function's lifetime.
    pub closure: Environment,
}

impl UserFunction {
    pub fn name(&self) -> &str {
        self.decl.name.as_deref().unwrap_or(ANONYMOUS_FUNCTION)
    }
}

#[derive(Clone)]
pub enum FunctionValue {
    User(UserFunction),
    /// Entry in the builtin registry, resolved by name at call time.
    Builtin { name: String },
    /// Instance method bound to its receiver. Calling it re-dispatches the
    /// method on the receiver.
    Bound {
        receiver: Value,
        method: BuiltinMethod,
    },
}

impl FunctionValue {
    pub fn name(&self) -> &str {
        match self {
            Self::User(func) => func.name(),
            Self::Builtin { name } => name,
            Self::Bound { method, .. } => method.name(),
        }
    }

    /// Builtins and bound methods are native; user functions are not.
    pub fn is_native(&self) -> bool {
        !matches!(self, Self::User(_))
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(func) => write!(f, "User({})", func.name()),
            Self::Builtin { name } => write!(f, "Builtin({name})"),
            Self::Bound { receiver, method } => {
                write!(f, "Bound({}.{})", receiver.type_name(), method.name())
            }
        }
    }
}
