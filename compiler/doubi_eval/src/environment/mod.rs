//! Environment frames for variable scoping.
//!
//! An `Environment` is a handle to one frame. Frames link to their parent,
//! forming a chain toward the outermost (global) frame. The interpreter
//! opens a child frame for every block, call and collection loop and drops
//! its handle on exit; closures keep the frame they were created in alive
//! by holding a handle to it.
//!
//! Frames are shared with spawned units, so each frame sits behind its own
//! `RwLock`. Every operation takes at most one frame lock at a time: lookups
//! walk the chain lock by lock and never hold a lock across a write.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::value::Value;

/// A single frame of bindings.
struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<Environment>,
}

/// Handle to an environment frame.
#[derive(Clone)]
pub struct Environment(Arc<RwLock<Scope>>);

/// When a plain assignment to one of a function's syntactic locals makes a
/// new binding instead of overwriting the one it found.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LocalRebinding {
    /// Whenever the binding was found in any frame other than the current
    /// one, including an enclosing block of the same call. `x = 1` inside
    /// an `if` body leaves the function's earlier `x` untouched.
    #[default]
    CurrentFrame,
    /// Only when the binding was found outside the function's call frame.
    /// Nested blocks update locals bound earlier in the same call.
    FunctionFrame,
}

/// The active function call as seen by the assignment rule.
#[derive(Copy, Clone, Debug)]
pub struct FunctionScope<'a> {
    /// Names the function body assigns with plain `=`.
    pub locals: &'a FxHashSet<String>,
    /// Frame holding the call's parameters.
    pub frame: &'a Environment,
    pub rebinding: LocalRebinding,
}

impl FunctionScope<'_> {
    /// Whether assigning `name` from `current`, where it is bound in
    /// `owner`, makes a new binding in `current`.
    fn rebinds(&self, name: &str, current: &Environment, owner: &Environment) -> bool {
        if !self.locals.contains(name) {
            return false;
        }
        match self.rebinding {
            LocalRebinding::CurrentFrame => !owner.ptr_eq(current),
            LocalRebinding::FunctionFrame => !current.reaches(owner, self.frame),
        }
    }
}

/// Which branch of the assignment rule a plain `name = value` took.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssignOutcome {
    /// Unbound anywhere in the chain; bound in the current frame.
    Declared,
    /// A syntactic local of the active function bound in another frame;
    /// bound in the current frame, the other binding untouched.
    Shadowed,
    /// Overwritten in the frame that already held it.
    Updated,
}

impl Environment {
    /// A new outermost frame.
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    fn with_parent(parent: Option<Environment>) -> Self {
        Environment(Arc::new(RwLock::new(Scope {
            bindings: FxHashMap::default(),
            parent,
        })))
    }

    /// A new frame chained under this one.
    #[must_use]
    pub fn child(&self) -> Self {
        Self::with_parent(Some(self.clone()))
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.read().parent.clone()
    }

    /// Number of frames from here to the outermost, counting this one.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut frame = self.parent();
        while let Some(env) = frame {
            depth += 1;
            frame = env.parent();
        }
        depth
    }

    /// Whether both handles refer to the same frame.
    #[inline]
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Create or overwrite `name` in this frame.
    pub fn define(&self, name: &str, value: Value) {
        let mut scope = self.0.write();
        if let Some(slot) = scope.bindings.get_mut(name) {
            *slot = value;
        } else {
            scope.bindings.insert(name.to_string(), value);
        }
    }

    /// Whether this frame itself binds `name`.
    pub fn binds(&self, name: &str) -> bool {
        self.0.read().bindings.contains_key(name)
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.resolve(name).map(|(value, _)| value)
    }

    /// The value of `name` and the frame holding it, searching outward.
    pub fn resolve(&self, name: &str) -> Option<(Value, Environment)> {
        let mut frame = self.clone();
        loop {
            let parent = {
                let scope = frame.0.read();
                if let Some(value) = scope.bindings.get(name) {
                    let value = value.clone();
                    drop(scope);
                    return Some((value, frame));
                }
                scope.parent.clone()
            };
            frame = parent?;
        }
    }

    /// Frame holding `name`, searching outward.
    fn owner_of(&self, name: &str) -> Option<Environment> {
        let mut frame = self.clone();
        loop {
            let parent = {
                let scope = frame.0.read();
                if scope.bindings.contains_key(name) {
                    drop(scope);
                    return Some(frame);
                }
                scope.parent.clone()
            };
            frame = parent?;
        }
    }

    /// Plain assignment `name = value` from this frame.
    ///
    /// `function` describes the active function call, if any:
    /// 1. `name` unbound anywhere: bind it here.
    /// 2. `name` is one of the function's syntactic locals and bound in
    ///    another frame (see [`LocalRebinding`]): bind it here, leaving the
    ///    other binding alone.
    /// 3. Otherwise overwrite it in the frame that holds it.
    pub fn assign(
        &self,
        name: &str,
        value: Value,
        function: Option<FunctionScope<'_>>,
    ) -> AssignOutcome {
        match self.owner_of(name) {
            None => {
                self.define(name, value);
                AssignOutcome::Declared
            }
            Some(owner) if function.is_some_and(|f| f.rebinds(name, self, &owner)) => {
                self.define(name, value);
                AssignOutcome::Shadowed
            }
            Some(owner) => {
                owner.define(name, value);
                AssignOutcome::Updated
            }
        }
    }

    /// Whether `target` lies on the chain from this frame out to `boundary`,
    /// both ends included.
    fn reaches(&self, target: &Environment, boundary: &Environment) -> bool {
        let mut frame = self.clone();
        loop {
            if frame.ptr_eq(target) {
                return true;
            }
            if frame.ptr_eq(boundary) {
                return false;
            }
            match frame.parent() {
                Some(parent) => frame = parent,
                None => return false,
            }
        }
    }

    /// Overwrite `name` where it is bound. Returns `false` if it is unbound.
    pub fn update(&self, name: &str, value: Value) -> bool {
        match self.owner_of(name) {
            Some(owner) => {
                owner.define(name, value);
                true
            }
            None => false,
        }
    }

    /// Names bound in this frame only, sorted.
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.read().bindings.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.local_names())
            .field("depth", &self.depth())
            .finish()
    }
}
