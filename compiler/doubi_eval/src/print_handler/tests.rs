use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_print_has_no_separator() {
    let handler = buffer_handler();
    handler.print("a");
    handler.print("b");
    assert_eq!(handler.output(), "ab");
}

#[test]
fn buffer_println_appends_newline() {
    let handler = buffer_handler();
    handler.println("hello");
    handler.print("x");
    assert_eq!(handler.output(), "hello\nx");
}

#[test]
fn clear_empties_buffer() {
    let handler = buffer_handler();
    handler.print("data");
    handler.clear();
    assert!(handler.output().is_empty());
}

#[test]
fn stdout_captures_nothing() {
    let handler = stdout_handler();
    handler.print("");
    assert_eq!(handler.output(), "");
}

#[test]
fn buffer_is_shared_across_threads() {
    let handler = buffer_handler();
    let worker = {
        let handler = Arc::clone(&handler);
        std::thread::spawn(move || handler.print("from thread"))
    };
    #[allow(clippy::unwrap_used)]
    worker.join().unwrap();
    assert_eq!(handler.output(), "from thread");
}
