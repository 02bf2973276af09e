//! Process-wide installation.
//!
//! Installing touches global state (the `log` logger and the default
//! subscriber), so this file holds a single test.

use richtrace::{install, success, Console, InstallError};

mod common;

#[test]
fn test_install_routes_both_facades() {
    let (console, captured) = Console::capture(common::WIDTH);
    install(common::options().console(console).level("debug")).unwrap();

    let at = line!() + 1;
    log::info!("from log");
    tracing::debug!("from tracing");
    success!("done");
    log::trace!("below the minimum");

    let lines = captured.lines();
    assert!(lines.iter().any(|line| line.starts_with("DEBUG    rich logging installed")));
    assert!(lines
        .iter()
        .any(|line| line.starts_with("INFO     from log") && line.ends_with(&format!(" install.rs:{at}"))));
    assert!(lines.iter().any(|line| line.starts_with("DEBUG    from tracing")));
    assert!(lines.iter().any(|line| line.starts_with("SUCCESS  done")));
    assert!(!lines.iter().any(|line| line.contains("below the minimum")));

    let (console, _) = Console::capture(common::WIDTH);
    assert!(matches!(
        install(common::options().console(console)),
        Err(InstallError::Logger(_))
    ));
}
