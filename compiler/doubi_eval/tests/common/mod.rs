//! Shared harness for the integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Once;
use std::time::{Duration, Instant};

use doubi_eval::{
    buffer_handler, CallScoping, EvalError, EvalResult, Interpreter, InterpreterBuilder,
    LocalRebinding, Value,
};
use doubi_ir::Stmt;

static TRACING_INIT: Once = Once::new();

/// Install a fmt subscriber once per test binary when `DOUBI_LOG` is set,
/// e.g. `DOUBI_LOG=doubi_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("DOUBI_LOG").is_ok() {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer())
                .with(EnvFilter::from_env("DOUBI_LOG"))
                .try_init();
        }
    });
}

/// A finished program run with captured output.
pub struct Run {
    pub interp: Interpreter,
    pub result: EvalResult<()>,
}

impl Run {
    pub fn output(&self) -> String {
        self.interp.print_handler().output()
    }

    /// Global binding `name`; panics if unbound.
    pub fn global(&self, name: &str) -> Value {
        self.interp
            .globals()
            .lookup(name)
            .unwrap_or_else(|| panic!("`{name}` is not bound"))
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.interp.globals().lookup(name).is_some()
    }

    pub fn error(self) -> EvalError {
        match self.result {
            Ok(()) => panic!("program succeeded, output: {:?}", self.output()),
            Err(err) => err,
        }
    }
}

/// Run `program` on an interpreter from `builder`, capturing output.
pub fn run_built(builder: InterpreterBuilder, program: &[Stmt]) -> Run {
    init_tracing();
    let mut interp = builder.print_handler(buffer_handler()).build();
    let result = interp.run_program(program);
    Run { interp, result }
}

pub fn run_with(scoping: CallScoping, program: &[Stmt]) -> Run {
    run_built(InterpreterBuilder::new().call_scoping(scoping), program)
}

pub fn run_with_rebinding(rebinding: LocalRebinding, program: &[Stmt]) -> Run {
    run_built(InterpreterBuilder::new().local_rebinding(rebinding), program)
}

pub fn run(program: &[Stmt]) -> Run {
    run_with(CallScoping::default(), program)
}

/// Run and require success.
pub fn run_ok(program: &[Stmt]) -> Run {
    let run = run(program);
    if let Err(err) = &run.result {
        panic!("program failed: {err}");
    }
    run
}

/// Poll `condition` until it holds or five seconds pass.
pub fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}
