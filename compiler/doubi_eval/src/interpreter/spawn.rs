//! The `go` statement.
//!
//! A spawned unit is a forked interpreter on its own OS thread. It shares
//! environment frames, values, the builtin registry and the print handler
//! with the spawner and gets a fresh operand stack, flags and call stack.
//! There is no join: the unit runs to completion or until the process
//! exits. Each frame and collection is individually locked, so a single
//! read or write is atomic, but compound updates such as `x += 1` from two
//! units can interleave and lose writes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use doubi_ir::Expr;

use super::{ControlFlags, Interpreter, OperandStack};
use crate::diagnostics::CallStack;
use crate::errors::{spawn_failed, EvalResult};

static SPAWN_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl Interpreter {
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn exec_go(&mut self, call: &Expr) -> EvalResult<()> {
        let mut unit = self.fork();
        let call = call.clone();
        let name = format!("doubi-spawn-{}", SPAWN_COUNTER.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(unit = %name, "spawning");

        thread::Builder::new()
            .name(name)
            .spawn(move || {
                if let Err(err) = unit.eval_expr(&call) {
                    let current = thread::current();
                    tracing::warn!(
                        unit = current.name().unwrap_or_default(),
                        error = %err,
                        "spawned unit failed"
                    );
                }
            })
            .map_err(|e| spawn_failed(e.to_string()))?;
        Ok(())
    }

    /// A new interpreter sharing this one's environment and registries.
    fn fork(&self) -> Interpreter {
        Interpreter {
            env: self.env.clone(),
            globals: self.globals.clone(),
            stack: OperandStack::default(),
            function: self.function.clone(),
            loop_depth: 0,
            flags: ControlFlags::default(),
            builtins: self.builtins.clone(),
            print_handler: Arc::clone(&self.print_handler),
            call_scoping: self.call_scoping,
            local_rebinding: self.local_rebinding,
            call_stack: CallStack::new(self.call_stack.max_depth()),
        }
    }
}
