//! `RUST_LOG` directives applied to both facades.
//!
//! The environment is process-wide, so this file holds a single test.

use log::{Level, Log, Record};
use richtrace::LogBridge;

mod common;
use common::{options, render_with};

fn bridged(level: Level, target: &str, message: &str) {
    LogBridge::default().log(
        &Record::builder()
            .level(level)
            .target(target)
            .file(Some("src/jobs.rs"))
            .line(Some(3))
            .args(format_args!("{message}"))
            .build(),
    );
}

#[test]
fn test_directives_match_record_targets() {
    std::env::set_var("RUST_LOG", "warn,inventory=debug");

    let lines = render_with(options().level("debug").env_filter(true), || {
        bridged(Level::Debug, "inventory", "bridged inventory detail");
        bridged(Level::Debug, "billing", "bridged billing detail");
        bridged(Level::Warn, "billing", "bridged billing warning");
        tracing::debug!(target: "inventory", "native inventory detail");
        tracing::info!("native chatter");
    });

    assert!(lines
        .iter()
        .any(|line| line.starts_with("DEBUG    bridged inventory detail")));
    assert!(lines
        .iter()
        .any(|line| line.starts_with("WARNING  bridged billing warning")));
    assert!(lines
        .iter()
        .any(|line| line.starts_with("DEBUG    native inventory detail")));
    assert!(!lines.iter().any(|line| line.contains("billing detail")));
    assert!(!lines.iter().any(|line| line.contains("native chatter")));

    // Without the flag the directives are ignored.
    let lines = render_with(options().level("debug"), || {
        bridged(Level::Debug, "billing", "bridged billing detail");
    });
    assert!(lines[1].starts_with("DEBUG    bridged billing detail"));
}
