#![allow(clippy::unwrap_used)]

use super::*;
use crate::errors::EvalErrorKind;
use pretty_assertions::assert_eq;

fn frame(name: &str, start: u32) -> CallFrame {
    CallFrame {
        name: name.to_string(),
        call_span: Some(Span::new(start, start + 3)),
    }
}

#[test]
fn push_and_pop_track_depth() {
    let mut stack = CallStack::default();
    assert!(stack.is_empty());
    stack.push(frame("f", 0)).unwrap();
    stack.push(frame("g", 10)).unwrap();
    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.current_frame().map(|f| f.name.as_str()), Some("g"));
    stack.pop();
    assert_eq!(stack.depth(), 1);
}

#[test]
fn push_past_limit_fails_without_pushing() {
    let mut stack = CallStack::new(Some(2));
    stack.push(frame("a", 0)).unwrap();
    stack.push(frame("b", 0)).unwrap();
    let err = stack.push(frame("c", 0)).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 2 });
    assert_eq!(stack.depth(), 2);
}

#[test]
fn capture_lists_most_recent_first() {
    let mut stack = CallStack::default();
    stack.push(frame("outer", 1)).unwrap();
    stack.push(frame("inner", 20)).unwrap();
    let captured = stack.capture();
    let names: Vec<&str> = captured
        .frames()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["inner", "outer"]);
}

#[test]
fn attach_backtrace_keeps_innermost() {
    let mut stack = CallStack::default();
    let plain = stack.attach_backtrace(EvalError::new("boom"));
    assert!(plain.backtrace.is_none());

    stack.push(frame("inner", 0)).unwrap();
    let err = stack.attach_backtrace(EvalError::new("boom"));
    stack.pop();
    stack.push(frame("other", 0)).unwrap();
    let err = stack.attach_backtrace(err);
    let trace = err.backtrace.unwrap();
    assert_eq!(trace.len(), 1);
    assert_eq!(trace.frames()[0].name, "inner");
}

#[test]
fn clear_keeps_limit() {
    let mut stack = CallStack::new(Some(5));
    stack.push(frame("a", 0)).unwrap();
    stack.clear();
    assert!(stack.is_empty());
    assert_eq!(stack.max_depth(), Some(5));
}
