//! Shared utilities for integration tests.

use richtrace::console::Captured;
use richtrace::lifecycle::subscriber;
use richtrace::text::Text;
use richtrace::{Console, InstallOptions, TimeFormat};
use tracing::Subscriber;

/// Width of every captured console.
#[allow(dead_code)]
pub const WIDTH: usize = 60;

/// Options with a fixed clock so output is deterministic.
pub fn options() -> InstallOptions {
    InstallOptions::default()
        .time_format(TimeFormat::custom(|_| Text::new("[TIME]")))
        .exception_hook(None)
}

/// A subscriber built from `options` that renders into memory.
pub fn capture(options: InstallOptions) -> (impl Subscriber + Send + Sync + 'static, Captured) {
    let (console, captured) = Console::capture(WIDTH);
    let subscriber = subscriber(&options.console(console)).unwrap();
    (subscriber, captured)
}

/// Run `f` with a capturing subscriber and return the rendered lines.
#[allow(dead_code)]
pub fn render_with(options: InstallOptions, f: impl FnOnce()) -> Vec<String> {
    let (subscriber, captured) = capture(options);
    tracing::subscriber::with_default(subscriber, f);
    captured.lines()
}
