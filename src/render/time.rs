//! Timestamp display.

use std::fmt::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::text::Text;

pub const DEFAULT_TIME_FORMAT: &str = "[%x %X]";

type TimeFn = dyn Fn(&DateTime<Local>) -> Text + Send + Sync;

/// How the time of a record is displayed.
#[derive(Clone)]
pub enum TimeFormat {
    /// A `strftime` pattern.
    Strftime(String),
    /// A custom renderer.
    Custom(Arc<TimeFn>),
}

impl TimeFormat {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&DateTime<Local>) -> Text + Send + Sync + 'static,
    {
        TimeFormat::Custom(Arc::new(f))
    }

    /// Render `time`. An invalid pattern renders with the default one.
    pub fn format(&self, time: &DateTime<Local>) -> Text {
        match self {
            TimeFormat::Strftime(pattern) => {
                let mut out = String::new();
                if write!(out, "{}", time.format(pattern)).is_err() {
                    out.clear();
                    let _ = write!(out, "{}", time.format(DEFAULT_TIME_FORMAT));
                }
                Text::new(out)
            }
            TimeFormat::Custom(f) => f(time),
        }
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        TimeFormat::Strftime(DEFAULT_TIME_FORMAT.to_string())
    }
}

impl fmt::Debug for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::Strftime(pattern) => f.debug_tuple("Strftime").field(pattern).finish(),
            TimeFormat::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for TimeFormat {
    fn from(value: &str) -> Self {
        TimeFormat::Strftime(value.to_string())
    }
}

/// True when every specifier in `pattern` is understood by chrono.
pub fn is_valid_strftime(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Remembers the last displayed time so repeats can be skipped.
#[derive(Debug, Default)]
pub struct TimeTracker {
    last: Mutex<Option<String>>,
}

impl TimeTracker {
    /// Returns true when `display` differs from the previous one (or
    /// `omit_repeated` is off) and records it as the latest.
    pub fn should_show(&self, display: &str, omit_repeated: bool) -> bool {
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if omit_repeated && last.as_deref() == Some(display) {
            return false;
        }
        *last = Some(display.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_strftime_and_fallback() {
        let time = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(TimeFormat::from("%H:%M:%S").format(&time).plain(), "14:05:07");

        let fallback = TimeFormat::from("%Q").format(&time);
        assert_eq!(fallback.plain(), TimeFormat::default().format(&time).plain());
    }

    #[test]
    fn test_validation() {
        assert!(is_valid_strftime("[%x %X]"));
        assert!(!is_valid_strftime("%Q"));
    }

    #[test]
    fn test_tracker_omits_repeats() {
        let tracker = TimeTracker::default();
        assert!(tracker.should_show("12:00", true));
        assert!(!tracker.should_show("12:00", true));
        assert!(tracker.should_show("12:00", false));
        assert!(tracker.should_show("12:01", true));
    }
}
