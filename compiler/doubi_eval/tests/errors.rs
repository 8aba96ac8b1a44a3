//! Error categories surfaced to the host.

mod common;

use common::run;
use doubi_eval::EvalErrorKind;
use doubi_ir::build::*;
use doubi_ir::{LitKind, Stmt};
use pretty_assertions::assert_eq;

fn fails_with(program: &[Stmt]) -> (EvalErrorKind, &'static str) {
    let err = run(program).error();
    let category = err.category();
    (err.kind, category)
}

#[test]
fn undefined_name() {
    let err = run(&[assign(ident("x"), ident("nope"))]).error();
    assert_eq!(err.category(), "NameError");
    assert_eq!(err.to_string(), "name `nope` is not defined");
}

#[test]
fn malformed_literals() {
    let (kind, category) = fails_with(&[assign(ident("x"), lit(LitKind::Int, "12x"))]);
    assert_eq!(category, "LiteralError");
    assert!(matches!(kind, EvalErrorKind::InvalidLiteral { text, .. } if text == "12x"));

    let (kind, _) = fails_with(&[assign(ident("x"), lit(LitKind::Int, "99999999999999999999"))]);
    assert!(matches!(kind, EvalErrorKind::InvalidLiteral { .. }));

    let (_, category) = fails_with(&[assign(ident("x"), lit(LitKind::String, r#""\q""#))]);
    assert_eq!(category, "LiteralError");
}

#[test]
fn indexing_an_integer_is_unsupported() {
    let (kind, category) = fails_with(&[assign(ident("x"), index(int(1), int(0)))]);
    assert_eq!(category, "UnsupportedOperationError");
    assert_eq!(
        kind,
        EvalErrorKind::UnsupportedOperation {
            type_name: "integer".to_string(),
            message: "__get_index__".to_string(),
        }
    );
}

#[test]
fn calling_a_non_function() {
    let (kind, _) = fails_with(&[expr_stmt(call(int(3), vec![]))]);
    assert_eq!(
        kind,
        EvalErrorKind::UnsupportedOperation {
            type_name: "integer".to_string(),
            message: "__call__".to_string(),
        }
    );
}

#[test]
fn missing_property() {
    let (kind, _) = fails_with(&[
        assign(ident("x"), int(1)),
        assign(ident("y"), selector(ident("x"), "foo")),
    ]);
    assert_eq!(
        kind,
        EvalErrorKind::UndefinedProperty {
            name: "foo".to_string(),
            type_name: "integer".to_string(),
        }
    );
}

#[test]
fn index_out_of_bounds() {
    let program = |i: i64| {
        vec![
            assign(ident("a"), array(vec![int(1), int(2)])),
            assign(ident("x"), index(ident("a"), int(i))),
        ]
    };
    let (kind, category) = fails_with(&program(2));
    assert_eq!(category, "LookupError");
    assert_eq!(kind, EvalErrorKind::IndexOutOfBounds { index: 2, len: 2 });

    let (kind, _) = fails_with(&program(-1));
    assert_eq!(kind, EvalErrorKind::IndexOutOfBounds { index: -1, len: 2 });
}

#[test]
fn non_integer_index_is_a_type_error() {
    let (kind, category) = fails_with(&[
        assign(ident("a"), array(vec![int(1)])),
        assign(ident("x"), index(ident("a"), string("0"))),
    ]);
    assert_eq!(category, "TypeError");
    assert_eq!(
        kind,
        EvalErrorKind::TypeMismatch {
            expected: "integer".to_string(),
            got: "string".to_string(),
        }
    );
}

#[test]
fn user_function_arity() {
    let (kind, category) = fails_with(&[
        func_stmt("f", &["a"], block(vec![])),
        expr_stmt(call(ident("f"), vec![int(1), int(2)])),
    ]);
    assert_eq!(category, "ArgumentError");
    assert_eq!(
        kind,
        EvalErrorKind::ArityMismatch {
            name: "f".to_string(),
            expected: 1,
            got: 2,
        }
    );
}

#[test]
fn assignment_count_mismatch() {
    let (kind, category) = fails_with(&[assign_many(vec![ident("a"), ident("b")], vec![int(1)])]);
    assert_eq!(category, "ArgumentError");
    assert_eq!(kind, EvalErrorKind::ValueCountMismatch { expected: 2, got: 1 });
}

#[test]
fn using_a_valueless_call() {
    let (kind, _) = fails_with(&[
        func_stmt("f", &[], block(vec![])),
        assign(ident("x"), call(ident("f"), vec![])),
    ]);
    assert!(matches!(kind, EvalErrorKind::ValueExpected { .. } | EvalErrorKind::ValueCountMismatch { .. }));
}

#[test]
fn errors_inside_functions_carry_a_backtrace() {
    let err = run(&[
        func_stmt(
            "inner",
            &[],
            block(vec![assign(ident("x"), binary(doubi_ir::BinaryOp::Div, int(1), int(0)))]),
        ),
        func_stmt("outer", &[], block(vec![expr_stmt(call(ident("inner"), vec![]))])),
        expr_stmt(call(ident("outer"), vec![])),
    ])
    .error();
    assert_eq!(err.category(), "DivideByZeroError");
    let names: Vec<&str> = err
        .backtrace
        .as_ref()
        .map(|bt| bt.frames().iter().map(|f| f.name.as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["inner", "outer"]);
}

#[test]
fn host_errors_are_runtime_errors() {
    let err = doubi_eval::EvalError::new("host said no");
    assert_eq!(err.category(), "RuntimeError");
    assert_eq!(err.to_string(), "host said no");
}
