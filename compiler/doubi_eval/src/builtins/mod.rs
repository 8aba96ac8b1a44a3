//! Builtin function registry.
//!
//! An unqualified call consults the registry only when its name is bound in
//! no environment frame. The registry is built once, shared behind a
//! `SharedRegistry`, and never mutated afterwards, so spawned units read it
//! without locking.

mod len;
mod print;

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::dispatch::{Invoker, Results};
use crate::errors::EvalResult;
use crate::shared::SharedRegistry;
use crate::value::Value;

/// Native callable: evaluated arguments in, results out.
pub type BuiltinFn = fn(&mut dyn Invoker, Vec<Value>) -> EvalResult<Results>;

#[derive(Clone, Default)]
pub struct BuiltinRegistry {
    functions: FxHashMap<String, BuiltinFn>,
}

impl BuiltinRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with `print`, `println` and `len`.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("print", print::print);
        registry.register("println", print::println);
        registry.register("len", len::len);
        registry
    }

    /// Add or replace a builtin. Only possible before the registry is shared.
    pub fn register(&mut self, name: impl Into<String>, func: BuiltinFn) {
        self.functions.insert(name.into(), func);
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<BuiltinFn> {
        self.functions.get(name).copied()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// The process-wide standard registry, created on first use.
pub fn global_builtins() -> SharedRegistry<BuiltinRegistry> {
    static GLOBAL: OnceLock<SharedRegistry<BuiltinRegistry>> = OnceLock::new();
    GLOBAL
        .get_or_init(|| SharedRegistry::new(BuiltinRegistry::standard()))
        .clone()
}
