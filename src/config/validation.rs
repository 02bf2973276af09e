//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that level names resolve, counting the file's own `[levels]`
//! - Check style definitions, the traceback theme and the time pattern
//! - Validate value ranges (width > 0, max_frames > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RichConfig → Result<(), Vec<ValidationError>>
//! - Custom levels are checked against a private copy of the table, so
//!   validating never registers anything

use std::fmt;

use crate::config::schema::RichConfig;
use crate::render::time::is_valid_strftime;
use crate::severity::levels;
use crate::text::Style;
use crate::traceback::TracebackTheme;

/// A single semantic problem in a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnknownLevel(String),
    InvalidLevelName(String),
    InvalidStyle { name: String, reason: String },
    UnknownTracebackTheme(String),
    InvalidTimeFormat(String),
    ZeroWidth,
    ZeroMaxFrames,
    EmptyKeyword,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownLevel(name) => write!(f, "unknown level '{}'", name),
            ValidationError::InvalidLevelName(name) => {
                write!(f, "invalid custom level name '{}'", name)
            }
            ValidationError::InvalidStyle { name, reason } => {
                write!(f, "theme entry '{}': {}", name, reason)
            }
            ValidationError::UnknownTracebackTheme(name) => {
                write!(f, "unknown traceback theme '{}'", name)
            }
            ValidationError::InvalidTimeFormat(pattern) => {
                write!(f, "invalid time format '{}'", pattern)
            }
            ValidationError::ZeroWidth => write!(f, "console width must be greater than 0"),
            ValidationError::ZeroMaxFrames => {
                write!(f, "traceback max_frames must be greater than 0")
            }
            ValidationError::EmptyKeyword => write!(f, "keywords must not be empty strings"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_config(config: &RichConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut table = levels().clone();
    for (name, no) in &config.levels {
        if table.register(name, *no).is_err() {
            errors.push(ValidationError::InvalidLevelName(name.clone()));
        }
    }
    if config.logging.level.severity(&table).is_err() {
        errors.push(ValidationError::UnknownLevel(config.logging.level.to_string()));
    }

    for (name, definition) in &config.theme {
        if let Err(e) = Style::parse(definition) {
            errors.push(ValidationError::InvalidStyle {
                name: name.clone(),
                reason: e.to_string(),
            });
        }
    }

    if let Some(theme) = &config.traceback.theme {
        if TracebackTheme::by_name(theme).is_none() {
            errors.push(ValidationError::UnknownTracebackTheme(theme.clone()));
        }
    }

    if !is_valid_strftime(&config.logging.time_format) {
        errors.push(ValidationError::InvalidTimeFormat(
            config.logging.time_format.clone(),
        ));
    }

    if config.console.width == Some(0) {
        errors.push(ValidationError::ZeroWidth);
    }
    if config.traceback.max_frames == 0 {
        errors.push(ValidationError::ZeroMaxFrames);
    }

    if let Some(keywords) = &config.logging.keywords {
        if keywords.iter().any(|k| k.trim().is_empty()) {
            errors.push(ValidationError::EmptyKeyword);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::LevelSpec;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RichConfig::default()).is_ok());
    }

    #[test]
    fn test_custom_level_satisfies_minimum() {
        let mut config = RichConfig::default();
        config.logging.level = LevelSpec::Name("audit_only".into());
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::UnknownLevel("audit_only".into())])
        );

        config.levels.insert("AUDIT_ONLY".into(), 33);
        assert!(validate_config(&config).is_ok());
        assert!(levels().by_name("audit_only").is_none());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = RichConfig::default();
        config.theme.insert("log.time".into(), "sparkly".into());
        config.traceback.theme = Some("solarized".into());
        config.traceback.max_frames = 0;
        config.console.width = Some(0);
        config.logging.keywords = Some(vec!["GET".into(), " ".into()]);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::UnknownTracebackTheme("solarized".into())));
        assert!(errors.contains(&ValidationError::ZeroWidth));
        assert!(errors.contains(&ValidationError::ZeroMaxFrames));
        assert!(errors.contains(&ValidationError::EmptyKeyword));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidStyle { name, .. } if name == "log.time")));
    }

    #[test]
    fn test_invalid_time_format() {
        let mut config = RichConfig::default();
        config.logging.time_format = "%Q".into();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidTimeFormat("%Q".into())])
        );
    }
}
