//! `InterpreterBuilder` for creating interpreters with non-default settings.

use super::{CallScoping, ControlFlags, Interpreter, OperandStack};
use crate::builtins::{global_builtins, BuiltinRegistry};
use crate::diagnostics::CallStack;
use crate::environment::{Environment, LocalRebinding};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::shared::SharedRegistry;

/// Default limit on nested user calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Builder for [`Interpreter`].
///
/// ```text
/// let interp = InterpreterBuilder::new()
///     .print_handler(buffer_handler())
///     .call_scoping(CallScoping::Lexical)
///     .build();
/// ```
pub struct InterpreterBuilder {
    globals: Option<Environment>,
    builtins: Option<SharedRegistry<BuiltinRegistry>>,
    print_handler: Option<SharedPrintHandler>,
    call_scoping: CallScoping,
    local_rebinding: LocalRebinding,
    max_call_depth: Option<usize>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            globals: None,
            builtins: None,
            print_handler: None,
            call_scoping: CallScoping::default(),
            local_rebinding: LocalRebinding::default(),
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
        }
    }

    /// Start from an existing outermost frame instead of an empty one.
    #[must_use]
    pub fn globals(mut self, env: Environment) -> Self {
        self.globals = Some(env);
        self
    }

    /// Builtin registry. Defaults to the process-wide standard registry.
    #[must_use]
    pub fn builtins(mut self, registry: SharedRegistry<BuiltinRegistry>) -> Self {
        self.builtins = Some(registry);
        self
    }

    /// Output sink for `print`/`println`. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn call_scoping(mut self, scoping: CallScoping) -> Self {
        self.call_scoping = scoping;
        self
    }

    /// When assigning a function local from a nested block makes a new
    /// binding.
    #[must_use]
    pub fn local_rebinding(mut self, rebinding: LocalRebinding) -> Self {
        self.local_rebinding = rebinding;
        self
    }

    /// Limit on nested user calls; `None` for unlimited.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        let globals = self.globals.unwrap_or_default();
        Interpreter {
            env: globals.clone(),
            globals,
            stack: OperandStack::default(),
            function: None,
            loop_depth: 0,
            flags: ControlFlags::default(),
            builtins: self.builtins.unwrap_or_else(global_builtins),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_scoping: self.call_scoping,
            local_rebinding: self.local_rebinding,
            call_stack: CallStack::new(self.max_call_depth),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
