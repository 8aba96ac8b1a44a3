//! Arrays, sets and dicts: reference semantics, indexing, properties.

mod common;

use common::{run, run_ok};
use doubi_eval::{EvalErrorKind, Value};
use doubi_ir::build::*;
use doubi_ir::AssignOp;
use pretty_assertions::assert_eq;

fn print_stmt(args: Vec<doubi_ir::Expr>) -> doubi_ir::Stmt {
    expr_stmt(call(ident("print"), args))
}

#[test]
fn array_append_length_and_index() {
    let run = run_ok(&[
        assign(ident("a"), array(vec![int(1), int(2)])),
        expr_stmt(method_call(ident("a"), "append", vec![int(3), int(4)])),
        assign(ident("n"), method_call(ident("a"), "length", vec![])),
        assign(ident("l"), call(ident("len"), vec![ident("a")])),
        assign(ident("x"), index(ident("a"), int(3))),
    ]);
    assert_eq!(run.global("n"), Value::int(4));
    assert_eq!(run.global("l"), Value::int(4));
    assert_eq!(run.global("x"), Value::int(4));
}

#[test]
fn dict_index_and_property_share_entries() {
    let run = run_ok(&[
        assign(
            ident("d"),
            dict(vec![(string("a"), int(1)), (int(2), string("two"))]),
        ),
        assign(index(ident("d"), string("b")), int(5)),
        assign(selector(ident("d"), "c"), int(7)),
        assign(ident("by_index"), index(ident("d"), string("a"))),
        assign(ident("by_int"), index(ident("d"), int(2))),
        assign(ident("by_prop"), selector(ident("d"), "b")),
        assign(ident("set_by_prop"), index(ident("d"), string("c"))),
        assign(ident("n"), method_call(ident("d"), "length", vec![])),
    ]);
    assert_eq!(run.global("by_index"), Value::int(1));
    assert_eq!(run.global("by_int"), Value::string("two"));
    assert_eq!(run.global("by_prop"), Value::int(5));
    assert_eq!(run.global("set_by_prop"), Value::int(7));
    assert_eq!(run.global("n"), Value::int(4));
}

#[test]
fn collections_are_shared_by_reference() {
    let run = run_ok(&[
        assign(ident("a"), array(vec![int(1)])),
        assign(ident("b"), ident("a")),
        expr_stmt(method_call(ident("b"), "append", vec![int(2)])),
        assign(index(ident("b"), int(0)), int(10)),
        assign(ident("d"), dict(vec![])),
        assign(ident("e"), ident("d")),
        assign(index(ident("e"), string("k")), string("v")),
    ]);
    assert_eq!(
        run.global("a"),
        Value::array(vec![Value::int(10), Value::int(2)])
    );
    assert!(run.global("a").ptr_eq(&run.global("b")));
    assert_eq!(
        run.global("d").dict_get(&Value::string("k")),
        Some(Value::string("v"))
    );
}

#[test]
fn slicing_copies() {
    let run = run_ok(&[
        assign(ident("a"), array(vec![int(1), int(2), int(3), int(4)])),
        assign(ident("mid"), slice(ident("a"), Some(int(1)), Some(int(3)))),
        assign(ident("head"), slice(ident("a"), None, Some(int(2)))),
        assign(ident("tail"), slice(ident("a"), Some(int(2)), None)),
        assign(index(ident("mid"), int(0)), int(9)),
    ]);
    assert_eq!(
        run.global("mid"),
        Value::array(vec![Value::int(9), Value::int(3)])
    );
    assert_eq!(
        run.global("head"),
        Value::array(vec![Value::int(1), Value::int(2)])
    );
    assert_eq!(
        run.global("tail"),
        Value::array(vec![Value::int(3), Value::int(4)])
    );
    assert_eq!(
        run.global("a").elements().map(|items| items[1].clone()),
        Some(Value::int(2))
    );
}

#[test]
fn slice_past_end_is_out_of_bounds() {
    let err = run(&[
        assign(ident("a"), array(vec![int(1)])),
        assign(ident("s"), slice(ident("a"), Some(int(0)), Some(int(3)))),
    ])
    .error();
    assert_eq!(err.kind, EvalErrorKind::IndexOutOfBounds { index: 3, len: 1 });
}

#[test]
fn plus_assign_extends_in_place() {
    let run = run_ok(&[
        assign(ident("a"), array(vec![int(1)])),
        assign(ident("alias"), ident("a")),
        compound(AssignOp::Add, ident("a"), array(vec![int(2), int(3)])),
        assign(ident("joined"), binary(doubi_ir::BinaryOp::Add, ident("a"), array(vec![int(4)]))),
    ]);
    assert_eq!(run.global("alias").length(), Some(3));
    assert!(run.global("a").ptr_eq(&run.global("alias")));
    assert_eq!(run.global("joined").length(), Some(4));
    assert_eq!(run.global("a").length(), Some(3));
}

#[test]
fn compound_and_increment_on_elements() {
    let run = run_ok(&[
        assign(ident("a"), array(vec![int(1), int(2)])),
        compound(AssignOp::Add, index(ident("a"), int(0)), int(5)),
        dec(index(ident("a"), int(1))),
        assign(ident("d"), dict(vec![(string("count"), int(1))])),
        inc(selector(ident("d"), "count")),
    ]);
    assert_eq!(
        run.global("a"),
        Value::array(vec![Value::int(6), Value::int(1)])
    );
    assert_eq!(
        run.global("d").dict_get(&Value::string("count")),
        Some(Value::int(2))
    );
}

#[test]
fn user_properties_on_arrays() {
    let run = run_ok(&[
        assign(ident("a"), array(vec![])),
        assign(selector(ident("a"), "tag"), string("x")),
        assign(ident("t"), selector(ident("a"), "tag")),
    ]);
    assert_eq!(run.global("t"), Value::string("x"));
    assert_eq!(run.global("a").property_names(), vec!["tag".to_string()]);
}

#[test]
fn sets_support_length_but_not_indexing() {
    let run = run_ok(&[
        assign(ident("s"), set(vec![int(1), int(2), int(2)])),
        assign(ident("n"), method_call(ident("s"), "length", vec![])),
    ]);
    assert_eq!(run.global("n"), Value::int(3));

    let err = common::run(&[
        assign(ident("s"), set(vec![int(1)])),
        assign(ident("x"), index(ident("s"), int(0))),
    ])
    .error();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnsupportedOperation {
            type_name: "set".to_string(),
            message: "__get_index__".to_string(),
        }
    );
}

#[test]
fn times_passes_the_index() {
    let run = run_ok(&[
        assign(ident("total"), int(0)),
        expr_stmt(method_call(
            int(3),
            "times",
            vec![func(
                None,
                &["i"],
                block(vec![compound(AssignOp::Add, ident("total"), ident("i"))]),
            )],
        )),
        assign(ident("count"), int(0)),
        expr_stmt(method_call(
            int(4),
            "times",
            vec![func(None, &[], block(vec![inc(ident("count"))]))],
        )),
    ]);
    assert_eq!(run.global("total"), Value::int(3));
    assert_eq!(run.global("count"), Value::int(4));
}

#[test]
fn collection_display() {
    let run = run_ok(&[print_stmt(vec![
        array(vec![int(1), string("a")]),
        string(" "),
        set(vec![int(1)]),
        string(" "),
        dict(vec![(string("b"), int(1)), (string("a"), int(2))]),
    ])]);
    assert_eq!(run.output(), "[1,a] #[1] #{a:2,b:1}");
}

#[test]
fn int_and_string_keys_collide() {
    let run = run_ok(&[
        assign(ident("d"), dict(vec![])),
        assign(index(ident("d"), int(1)), string("int")),
        assign(index(ident("d"), string("1")), string("str")),
        assign(ident("n"), call(ident("len"), vec![ident("d")])),
        assign(ident("v"), index(ident("d"), int(1))),
    ]);
    assert_eq!(run.global("n"), Value::int(1));
    assert_eq!(run.global("v"), Value::string("str"));
}

#[test]
fn missing_key_is_a_lookup_error() {
    let err = run(&[
        assign(ident("d"), dict(vec![])),
        assign(ident("v"), index(ident("d"), string("nope"))),
    ])
    .error();
    assert_eq!(err.kind, EvalErrorKind::KeyNotFound { key: "nope".to_string() });
    assert_eq!(err.category(), "LookupError");
}

#[test]
fn self_containing_collections_print_elided() {
    let run = run_ok(&[
        assign(ident("a"), array(vec![int(1)])),
        expr_stmt(method_call(ident("a"), "append", vec![ident("a")])),
        assign(ident("d"), dict(vec![])),
        assign(index(ident("d"), string("self")), ident("d")),
        print_stmt(vec![ident("a"), string(" "), ident("d")]),
        assign(ident("n"), call(ident("len"), vec![ident("a")])),
    ]);
    assert_eq!(run.output(), "[1,[...]] #{self:#{...}}");
    assert_eq!(run.global("n"), Value::int(2));
}
