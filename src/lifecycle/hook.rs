//! Uncaught panic handling.
//!
//! # Responsibilities
//! - Replace the process-wide panic hook with a configurable one
//! - By default, report panics through `tracing` at ERROR with a traceback
//!
//! # Design Decisions
//! - The hook only emits fields (`panic.payload`, `panic.location`,
//!   `panic.backtrace`, `panic.note`); the renderer owns the traceback layout
//! - Backtraces follow `RUST_BACKTRACE` via `Backtrace::capture`

use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::PanicHookInfo;
use std::sync::Arc;

/// Called for every panic once installed.
pub type ExceptionHook = Arc<dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static>;

/// The hook [`install`](super::install) uses unless told otherwise.
pub fn default_exception_hook() -> ExceptionHook {
    Arc::new(log_panic)
}

/// Make `hook` the process-wide panic hook.
pub fn set_exception_hook(hook: ExceptionHook) {
    std::panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| hook(info)));
}

/// The panic message, when it is a string.
pub fn payload_of<'a>(info: &'a PanicHookInfo<'_>) -> &'a str {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s
    } else {
        "Box<dyn Any>"
    }
}

/// Log a panic at ERROR with whatever backtrace is available.
pub fn log_panic(info: &PanicHookInfo<'_>) {
    let backtrace = Backtrace::capture();
    let (backtrace, note) = match backtrace.status() {
        BacktraceStatus::Captured => (Some(backtrace), None),
        BacktraceStatus::Disabled => (
            None,
            Some("run with `RUST_BACKTRACE=1` to display a backtrace"),
        ),
        BacktraceStatus::Unsupported => {
            (None, Some("backtraces are not supported on this platform"))
        }
        _ => (None, Some("backtrace status is unknown")),
    };

    let location = info.location().map(|location| location.to_string());

    tracing::error!(
        panic.payload = payload_of(info),
        panic.location = location,
        panic.backtrace = backtrace.map(tracing::field::display),
        panic.note = note,
        "Exception:",
    );
}
