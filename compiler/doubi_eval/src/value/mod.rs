//! Runtime values.
//!
//! A `Value` is a shared handle to a heap object. Cloning a value clones the
//! handle, so arrays, sets, dicts and property tables mutate in place and
//! every holder observes the change. Scalars never change after creation;
//! operators that "modify" a number produce a new value the evaluator writes
//! back to the target.
//!
//! Every object carries a property table for ad-hoc fields (`obj.x = 1`).
//! Built-in instance methods live in a fixed table (`BuiltinMethod`) that
//! `dispatch` consults after the property table, so both share one
//! namespace from the script's point of view.

mod function;
mod heap;

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::thread::LocalKey;

use doubi_ir::FuncDecl;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::environment::Environment;

pub use function::{BuiltinMethod, FunctionValue, UserFunction};
pub use heap::Heap;

/// Runtime value handle.
#[derive(Clone)]
pub struct Value(Heap<Object>);

struct Object {
    kind: ValueKind,
    props: RwLock<FxHashMap<String, Value>>,
}

/// The closed set of value variants.
pub enum ValueKind {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Array(RwLock<Vec<Value>>),
    /// Built like an array; no set semantics beyond storage.
    Set(RwLock<Vec<Value>>),
    /// Entries keyed by the key value's `hash_key()`.
    Dict(RwLock<FxHashMap<String, Value>>),
    Function(FunctionValue),
}

impl ValueKind {
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Array(_) => "array",
            Self::Set(_) => "set",
            Self::Dict(_) => "dict",
            Self::Function(_) => "function",
        }
    }
}

// Factory methods

impl Value {
    fn from_kind(kind: ValueKind) -> Self {
        Value(Heap::new(Object {
            kind,
            props: RwLock::new(FxHashMap::default()),
        }))
    }

    #[inline]
    pub fn int(n: i64) -> Self {
        Self::from_kind(ValueKind::Int(n))
    }

    #[inline]
    pub fn float(x: f64) -> Self {
        Self::from_kind(ValueKind::Float(x))
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Self::from_kind(ValueKind::Bool(b))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::from_kind(ValueKind::Str(s.into()))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Self::from_kind(ValueKind::Array(RwLock::new(items)))
    }

    pub fn set(items: Vec<Value>) -> Self {
        Self::from_kind(ValueKind::Set(RwLock::new(items)))
    }

    /// Dict from entries already keyed by `hash_key()`.
    pub fn dict(entries: FxHashMap<String, Value>) -> Self {
        Self::from_kind(ValueKind::Dict(RwLock::new(entries)))
    }

    /// Build a dict from key values, hashing each key.
    pub fn dict_from_pairs(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(key, value)| (key.hash_key(), value))
            .collect();
        Self::dict(entries)
    }

    pub fn user_function(decl: Arc<FuncDecl>, closure: Environment) -> Self {
        Self::from_kind(ValueKind::Function(FunctionValue::User(UserFunction {
            decl,
            closure,
        })))
    }

    /// Function value naming an entry of the builtin registry.
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::from_kind(ValueKind::Function(FunctionValue::Builtin {
            name: name.into(),
        }))
    }

    pub fn bound_method(receiver: Value, method: BuiltinMethod) -> Self {
        Self::from_kind(ValueKind::Function(FunctionValue::Bound { receiver, method }))
    }
}

// Accessors

impl Value {
    #[inline]
    pub fn kind(&self) -> &ValueKind {
        &self.0.kind
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.kind() {
            ValueKind::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.kind() {
            ValueKind::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind() {
            ValueKind::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.kind() {
            ValueKind::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self.kind() {
            ValueKind::Function(func) => Some(func),
            _ => None,
        }
    }

    /// Snapshot of an array's or set's elements.
    pub fn elements(&self) -> Option<Vec<Value>> {
        match self.kind() {
            ValueKind::Array(items) | ValueKind::Set(items) => Some(items.read().clone()),
            _ => None,
        }
    }

    /// Dict entry by key value.
    pub fn dict_get(&self, key: &Value) -> Option<Value> {
        match self.kind() {
            ValueKind::Dict(entries) => entries.read().get(&key.hash_key()).cloned(),
            _ => None,
        }
    }

    /// Element count for strings (in chars) and collections.
    pub fn length(&self) -> Option<usize> {
        match self.kind() {
            ValueKind::Str(s) => Some(s.chars().count()),
            ValueKind::Array(items) | ValueKind::Set(items) => Some(items.read().len()),
            ValueKind::Dict(entries) => Some(entries.read().len()),
            ValueKind::Bool(_) | ValueKind::Int(_) | ValueKind::Float(_) | ValueKind::Function(_) => {
                None
            }
        }
    }

    /// Key under which this value is stored in a dict.
    ///
    /// Scalars hash by their printed form, so `"1"` and `1` collide.
    /// Aggregates and functions hash by identity.
    pub fn hash_key(&self) -> String {
        match self.kind() {
            ValueKind::Str(_) | ValueKind::Bool(_) | ValueKind::Int(_) | ValueKind::Float(_) => {
                self.to_string()
            }
            ValueKind::Array(_) | ValueKind::Set(_) | ValueKind::Dict(_) | ValueKind::Function(_) => {
                format!("{:p}", Heap::as_ptr(&self.0))
            }
        }
    }

    /// Identity comparison.
    #[inline]
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Heap::ptr_eq(&self.0, &other.0)
    }

    // Property table

    pub fn property(&self, name: &str) -> Option<Value> {
        self.0.props.read().get(name).cloned()
    }

    pub fn set_property(&self, name: &str, value: Value) {
        self.0.props.write().insert(name.to_string(), value);
    }

    /// Names in the property table, sorted.
    pub fn property_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.props.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

thread_local! {
    /// Aggregates being displayed on this thread.
    static RENDERING: RefCell<FxHashSet<usize>> = RefCell::new(FxHashSet::default());
    /// Aggregate pairs being compared on this thread.
    static COMPARING: RefCell<FxHashSet<(usize, usize)>> = RefCell::new(FxHashSet::default());
}

/// Marks `key` as in progress in a thread-local set until dropped, so a walk
/// that reaches the same aggregate again through its own elements stops.
struct Visit<K: Copy + Eq + Hash + 'static> {
    set: &'static LocalKey<RefCell<FxHashSet<K>>>,
    key: K,
}

impl<K: Copy + Eq + Hash + 'static> Visit<K> {
    /// `None` if `key` is already in progress.
    fn enter(set: &'static LocalKey<RefCell<FxHashSet<K>>>, key: K) -> Option<Self> {
        set.with(|active| active.borrow_mut().insert(key))
            .then_some(Visit { set, key })
    }
}

impl<K: Copy + Eq + Hash + 'static> Drop for Visit<K> {
    fn drop(&mut self) {
        let _ = self.set.try_with(|active| active.borrow_mut().remove(&self.key));
    }
}

impl Value {
    #[inline]
    fn addr(&self) -> usize {
        Heap::as_ptr(&self.0) as usize
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value]) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

/// Display form used by `print` and string concatenation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ValueKind::Str(s) => f.write_str(s),
            ValueKind::Bool(b) => write!(f, "{b}"),
            ValueKind::Int(n) => write!(f, "{n}"),
            ValueKind::Float(x) => write!(f, "{x:.6}"),
            // An aggregate reached again while displaying itself prints as
            // its elided form.
            ValueKind::Array(items) => match Visit::enter(&RENDERING, self.addr()) {
                Some(_visit) => write_seq(f, "[", &items.read_recursive()),
                None => f.write_str("[...]"),
            },
            ValueKind::Set(items) => match Visit::enter(&RENDERING, self.addr()) {
                Some(_visit) => write_seq(f, "#[", &items.read_recursive()),
                None => f.write_str("#[...]"),
            },
            ValueKind::Dict(entries) => {
                let Some(_visit) = Visit::enter(&RENDERING, self.addr()) else {
                    return f.write_str("#{...}");
                };
                let entries = entries.read_recursive();
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort_unstable();
                f.write_str("#{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{key}:")?;
                    if let Some(value) = entries.get(key) {
                        write!(f, "{value}")?;
                    }
                }
                f.write_str("}")
            }
            ValueKind::Function(func) => f.write_str(func.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ValueKind::Str(s) => write!(f, "{s:?}"),
            ValueKind::Function(func) => write!(f, "{func:?}"),
            _ => write!(f, "{self}"),
        }
    }
}

/// Structural equality for host-side inspection.
///
/// Scripts compare values through dispatch (`==`); this impl exists so hosts
/// and tests can compare results directly. Functions are equal only to
/// themselves. Self-containing aggregates compare equal when their shapes
/// match; a pair met again inside its own comparison counts as equal.
impl PartialEq for Value {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (self.kind(), other.kind()) {
            (ValueKind::Str(a), ValueKind::Str(b)) => a == b,
            (ValueKind::Bool(a), ValueKind::Bool(b)) => a == b,
            (ValueKind::Int(a), ValueKind::Int(b)) => a == b,
            (ValueKind::Float(a), ValueKind::Float(b)) => a == b,
            (ValueKind::Array(a), ValueKind::Array(b)) | (ValueKind::Set(a), ValueKind::Set(b)) => {
                let Some(_visit) = Visit::enter(&COMPARING, (self.addr(), other.addr())) else {
                    return true;
                };
                *a.read_recursive() == *b.read_recursive()
            }
            (ValueKind::Dict(a), ValueKind::Dict(b)) => {
                let Some(_visit) = Visit::enter(&COMPARING, (self.addr(), other.addr())) else {
                    return true;
                };
                *a.read_recursive() == *b.read_recursive()
            }
            _ => false,
        }
    }
}
