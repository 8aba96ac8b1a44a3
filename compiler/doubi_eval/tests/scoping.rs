//! Name binding: the three-way assignment rule and call-frame chaining.

mod common;

use common::{run, run_ok, run_with, run_with_rebinding};
use doubi_eval::{CallScoping, EvalErrorKind, LocalRebinding, Value};
use doubi_ir::build::*;
use doubi_ir::{AssignOp, BinaryOp};
use pretty_assertions::assert_eq;

#[test]
fn first_assignment_declares_in_current_frame() {
    let err = run(&[
        block_stmt(block(vec![assign(ident("y"), int(1))])),
        expr_stmt(ident("y")),
    ])
    .error();
    assert_eq!(err.kind, EvalErrorKind::UndefinedName { name: "y".to_string() });
}

#[test]
fn nested_block_mutates_outer_binding() {
    let run = run_ok(&[
        assign(ident("x"), int(1)),
        block_stmt(block(vec![assign(ident("x"), int(2))])),
    ]);
    assert_eq!(run.global("x"), Value::int(2));
}

#[test]
fn function_local_shadows_global() {
    let run = run_ok(&[
        assign(ident("x"), int(10)),
        func_stmt(
            "f",
            &[],
            block(vec![
                assign(ident("x"), int(1)),
                expr_stmt(call(ident("print"), vec![ident("x")])),
            ]),
        ),
        expr_stmt(call(ident("f"), vec![])),
        expr_stmt(call(ident("print"), vec![string(" "), ident("x")])),
    ]);
    assert_eq!(run.output(), "1 10");
    assert_eq!(run.global("x"), Value::int(10));
}

#[test]
fn local_declared_in_other_function_never_touches_outer() {
    let run = run_ok(&[
        assign(ident("counter"), int(0)),
        assign(
            ident("bump"),
            func(None, &[], block(vec![compound(AssignOp::Add, ident("counter"), int(1))])),
        ),
        func_stmt("other", &[], block(vec![assign(ident("counter"), int(100))])),
        expr_stmt(call(ident("bump"), vec![])),
        expr_stmt(call(ident("other"), vec![])),
    ]);
    assert_eq!(run.global("counter"), Value::int(1));
}

/// `func f() { x = 0; if true { x = 1 }; return x }; r = f()`
fn assign_in_if_body() -> Vec<doubi_ir::Stmt> {
    vec![
        func_stmt(
            "f",
            &[],
            block(vec![
                assign(ident("x"), int(0)),
                if_then(ident("true"), block(vec![assign(ident("x"), int(1))])),
                ret(vec![ident("x")]),
            ]),
        ),
        assign(ident("r"), call(ident("f"), vec![])),
    ]
}

#[test]
fn nested_block_rebinds_function_local() {
    let run = run_ok(&assign_in_if_body());
    assert_eq!(run.global("r"), Value::int(0));
    assert!(!run.is_bound("x"));
}

#[test]
fn function_frame_rebinding_updates_from_nested_block() {
    let run = run_with_rebinding(LocalRebinding::FunctionFrame, &assign_in_if_body());
    assert!(run.result.is_ok());
    assert_eq!(run.global("r"), Value::int(1));
}

#[test]
fn nested_loop_body_updates_function_local() {
    let countdown = [
        func_stmt(
            "countdown",
            &["n"],
            block(vec![
                for_loop(
                    None,
                    Some(binary(BinaryOp::Gt, ident("n"), int(0))),
                    None,
                    block(vec![assign(ident("n"), binary(BinaryOp::Sub, ident("n"), int(1)))]),
                ),
                ret(vec![ident("n")]),
            ]),
        ),
        assign(ident("r"), call(ident("countdown"), vec![int(5)])),
    ];
    let run = run_with_rebinding(LocalRebinding::FunctionFrame, &countdown);
    assert!(run.result.is_ok());
    assert_eq!(run.global("r"), Value::int(0));
}

/// `func total(xs) { s = 0; for _, v := range xs { s = s + v }; return s }`
fn accumulator() -> Vec<doubi_ir::Stmt> {
    vec![
        func_stmt(
            "total",
            &["xs"],
            block(vec![
                assign(ident("s"), int(0)),
                range(
                    "_",
                    "v",
                    ident("xs"),
                    block(vec![assign(ident("s"), binary(BinaryOp::Add, ident("s"), ident("v")))]),
                ),
                ret(vec![ident("s")]),
            ]),
        ),
        assign(ident("s"), int(-1)),
        assign(ident("r"), call(ident("total"), vec![array(vec![int(1), int(2), int(3)])])),
    ]
}

#[test]
fn accumulator_in_range_body() {
    // Each iteration binds its own `s`; the function's `s` stays 0.
    let run = run_ok(&accumulator());
    assert_eq!(run.global("r"), Value::int(0));
    assert_eq!(run.global("s"), Value::int(-1));

    let run = run_with_rebinding(LocalRebinding::FunctionFrame, &accumulator());
    assert!(run.result.is_ok());
    assert_eq!(run.global("r"), Value::int(6));
    assert_eq!(run.global("s"), Value::int(-1));
}

#[test]
fn parameters_are_local_to_the_call() {
    let run = run_ok(&[
        assign(ident("x"), int(1)),
        func_stmt("f", &["x"], block(vec![assign(ident("x"), int(2))])),
        expr_stmt(call(ident("f"), vec![int(9)])),
    ]);
    assert_eq!(run.global("x"), Value::int(1));
}

fn counter_factory() -> Vec<doubi_ir::Stmt> {
    vec![
        func_stmt(
            "make",
            &[],
            block(vec![
                assign(ident("count"), int(0)),
                ret(vec![func(
                    None,
                    &[],
                    block(vec![
                        compound(AssignOp::Add, ident("count"), int(1)),
                        ret(vec![ident("count")]),
                    ]),
                )]),
            ]),
        ),
        assign(ident("c"), call(ident("make"), vec![])),
        assign(ident("a"), call(ident("c"), vec![])),
        assign(ident("b"), call(ident("c"), vec![])),
    ]
}

#[test]
fn lexical_closure_keeps_its_frame() {
    let run = run_with(CallScoping::Lexical, &counter_factory());
    assert!(run.result.is_ok());
    assert_eq!(run.global("a"), Value::int(1));
    assert_eq!(run.global("b"), Value::int(2));
    assert!(!run.is_bound("count"));
}

#[test]
fn call_site_scoping_ignores_closure_frame() {
    let err = run_with(CallScoping::CallSite, &counter_factory()).error();
    assert_eq!(err.kind, EvalErrorKind::UndefinedName { name: "count".to_string() });
}

fn caller_leak() -> Vec<doubi_ir::Stmt> {
    vec![
        func_stmt("show", &[], block(vec![ret(vec![ident("hidden")])])),
        func_stmt(
            "caller",
            &[],
            block(vec![
                assign(ident("hidden"), int(5)),
                ret(vec![call(ident("show"), vec![])]),
            ]),
        ),
        assign(ident("v"), call(ident("caller"), vec![])),
    ]
}

#[test]
fn call_site_scoping_sees_caller_locals() {
    let run = run_with(CallScoping::CallSite, &caller_leak());
    assert!(run.result.is_ok());
    assert_eq!(run.global("v"), Value::int(5));
}

#[test]
fn lexical_scoping_hides_caller_locals() {
    let err = run_with(CallScoping::Lexical, &caller_leak()).error();
    assert_eq!(err.category(), "NameError");
}

#[test]
fn closure_captured_at_top_level_mutates_global() {
    let run = run_ok(&[
        assign(ident("hits"), int(0)),
        func_stmt("hit", &[], block(vec![inc(ident("hits"))])),
        expr_stmt(call(ident("hit"), vec![])),
        expr_stmt(call(ident("hit"), vec![])),
    ]);
    assert_eq!(run.global("hits"), Value::int(2));
}
