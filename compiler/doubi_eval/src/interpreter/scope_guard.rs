//! RAII guard for environment frames.
//!
//! [`ScopedInterpreter`] swaps a fresh frame in as the current environment
//! and puts the previous one back when dropped, however the scope is left:
//! normal completion, an early `?` return, or a panic unwinding through it.
//!
//! ```text
//! {
//!     let mut scoped = interpreter.scoped();
//!     scoped.env.define(name, value);
//!     scoped.exec_block(body)?;
//! } // previous environment restored here
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::Environment;

/// Access the interpreter through this guard; it implements `Deref` and
/// `DerefMut`. The environment active before the guard was created is
/// restored on drop.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    saved: Option<Environment>,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        if let Some(env) = self.saved.take() {
            self.interpreter.env = env;
        }
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Enter a child frame of the current environment.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        let frame = self.env.child();
        self.scoped_in(frame)
    }

    /// Make `frame` the current environment until the guard drops.
    pub fn scoped_in(&mut self, frame: Environment) -> ScopedInterpreter<'_> {
        let saved = std::mem::replace(&mut self.env, frame);
        ScopedInterpreter {
            interpreter: self,
            saved: Some(saved),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn scope_restores_environment_on_drop() {
        let mut interp = Interpreter::new();
        let outer = interp.env().clone();
        {
            let scoped = interp.scoped();
            scoped.env.define("x", Value::int(1));
            assert!(!scoped.env.ptr_eq(&outer));
        }
        assert!(interp.env().ptr_eq(&outer));
        assert_eq!(interp.lookup("x"), None);
    }

    #[test]
    fn scope_restores_on_error() {
        fn leave_early(interp: &mut Interpreter) -> Result<(), &'static str> {
            let scoped = interp.scoped();
            scoped.env.define("y", Value::int(2));
            if scoped.env.lookup("y").is_some() {
                return Err("left early");
            }
            Ok(())
        }

        let mut interp = Interpreter::new();
        let outer = interp.env().clone();
        assert!(leave_early(&mut interp).is_err());
        assert_eq!(interp.lookup("y"), None);
        assert!(interp.env().ptr_eq(&outer));
    }

    #[test]
    fn scoped_in_uses_given_frame() {
        let mut interp = Interpreter::new();
        let detached = Environment::new();
        detached.define("z", Value::int(3));
        {
            let scoped = interp.scoped_in(detached.child());
            assert_eq!(scoped.env.lookup("z"), Some(Value::int(3)));
        }
        assert_eq!(interp.lookup("z"), None);
    }
}
