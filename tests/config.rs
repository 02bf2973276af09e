//! Loading config files from disk and turning them into a layer.

use std::io::Write;

use richtrace::config::{load_config, ConfigError, ValidationError};
use richtrace::lifecycle::layer;
use richtrace::LevelSpec;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
        [logging]
        level = "AUDIT"
        time_format = "%H:%M:%S"
        keywords = ["SELECT", "INSERT"]
        show_path = false

        [console]
        stream = "stdout"
        width = 120
        color = "never"

        [traceback]
        extra_lines = 1
        theme = "plain"
        suppress = ["std::rt"]

        [theme]
        "logging.level.audit" = "magenta bold"

        [levels]
        AUDIT = 35
        "#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.logging.level, LevelSpec::Name("AUDIT".into()));
    assert_eq!(config.traceback.extra_lines, 1);

    let layer = layer(&config.into_options()).unwrap();
    let settings = layer.settings();
    assert_eq!(settings.min_severity, 35);
    assert!(!settings.show_path);
    assert_eq!(settings.keywords, vec!["SELECT", "INSERT"]);
    assert_eq!(layer.console().width(), 120);
    assert!(!layer.console().is_ansi());
    assert!(layer.console().theme().contains("logging.level.audit"));
}

#[test]
fn test_validation_reports_every_problem() {
    let file = write_config(
        r#"
        [logging]
        level = "chatty"
        time_format = "%Q"

        [traceback]
        theme = "neon"

        [theme]
        "log.path" = "on"
        "#,
    );

    match load_config(file.path()) {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(errors.len(), 4);
            assert!(errors.contains(&ValidationError::UnknownLevel("chatty".into())));
            assert!(errors.contains(&ValidationError::InvalidTimeFormat("%Q".into())));
            assert!(errors.contains(&ValidationError::UnknownTracebackTheme("neon".into())));
        }
        other => panic!("expected validation errors, got {other:?}"),
    }
}

#[test]
fn test_mistyped_values_are_parse_errors() {
    let file = write_config("[logging]\nlevel = true\n");
    assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
}
