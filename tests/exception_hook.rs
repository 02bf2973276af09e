//! The panic hook, driven by a real panic.
//!
//! The hook is process-wide, so this file holds a single test.

use std::panic;
use std::sync::Arc;

use richtrace::lifecycle::hook::payload_of;
use richtrace::lifecycle::{default_exception_hook, set_exception_hook};

mod common;

#[test]
fn test_panics_are_logged_with_a_traceback() {
    let (subscriber, captured) = common::capture(common::options());
    let dispatch = tracing::Dispatch::new(subscriber);

    // Panic hooks run on the panicking thread, so the scoped dispatcher
    // set below is the one the hook logs to.
    set_exception_hook(default_exception_hook());
    let result = tracing::dispatcher::with_default(&dispatch, || {
        panic::catch_unwind(|| {
            let items: Vec<u32> = Vec::new();
            panic!("index {} out of range", items.len() + 2);
        })
    });
    let _ = panic::take_hook();

    assert!(result.is_err());
    let lines = captured.lines();
    assert!(lines[1].starts_with("ERROR    Exception:"));
    assert!(lines.iter().any(|line| line.contains("Traceback (most recent call last)")));
    assert!(lines
        .iter()
        .any(|line| line.starts_with("panicked at tests/exception_hook.rs:")));
    assert!(lines.contains(&"index 2 out of range".to_string()));

    // A custom hook replaces the default one.
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = seen.clone();
    set_exception_hook(Arc::new(move |info: &panic::PanicHookInfo<'_>| {
        sink.lock().unwrap().push(payload_of(info).to_string());
    }));
    let _ = panic::catch_unwind(|| panic!("custom"));
    let _ = panic::take_hook();
    assert_eq!(*seen.lock().unwrap(), vec!["custom".to_string()]);
}
