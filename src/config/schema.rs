//! Configuration schema definitions.
//!
//! This module defines the file form of [`InstallOptions`].
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::console::{ColorChoice, Console, ConsoleTarget};
use crate::lifecycle::InstallOptions;
use crate::render::DEFAULT_TIME_FORMAT;
use crate::severity::LevelSpec;
use crate::traceback::{DEFAULT_EXTRA_LINES, DEFAULT_MAX_FRAMES};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RichConfig {
    /// Record filtering and line layout.
    pub logging: LoggingConfig,

    /// Output stream settings.
    pub console: ConsoleConfig,

    /// Panic and error report settings.
    pub traceback: TracebackConfig,

    /// Style overrides, e.g. `"log.time" = "magenta"`.
    pub theme: BTreeMap<String, String>,

    /// Custom levels, e.g. `NOTICE = 27`.
    pub levels: BTreeMap<String, u8>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level, by name ("success") or number (25).
    pub level: LevelSpec,

    /// strftime pattern for the time line.
    pub time_format: String,

    pub show_time: bool,

    /// Skip the time line when it matches the previous one.
    pub omit_repeated_times: bool,

    /// Highlighted words. Unset means the HTTP verbs.
    pub keywords: Option<Vec<String>>,

    pub show_path: bool,

    pub show_fields: bool,

    /// Parse messages as markup by default.
    pub markup: bool,

    /// Honour RUST_LOG directives.
    pub env_filter: bool,

    /// Install the default panic hook.
    pub exception_hook: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelSpec::default(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            show_time: true,
            omit_repeated_times: true,
            keywords: None,
            show_path: true,
            show_fields: true,
            markup: false,
            env_filter: false,
            exception_hook: true,
        }
    }
}

/// Which standard stream to render into.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Stdout,
    #[default]
    Stderr,
}

/// Console configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub stream: Stream,

    /// Render width. Unset uses $COLUMNS, then 100.
    pub width: Option<usize>,

    pub color: ColorChoice,
}

/// Traceback configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct TracebackConfig {
    /// Rich tracebacks; plain text when off.
    pub enabled: bool,

    /// Source lines around each frame.
    pub extra_lines: usize,

    /// Color scheme name (ansi_dark, ansi_light, monokai, plain).
    pub theme: Option<String>,

    /// Module paths or path fragments whose frames are collapsed.
    pub suppress: Vec<String>,

    pub max_frames: usize,
}

impl Default for TracebackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extra_lines: DEFAULT_EXTRA_LINES,
            theme: None,
            suppress: Vec::new(),
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

impl RichConfig {
    /// Translate into installer options. Run validation first; bad values
    /// surface again as install errors.
    pub fn into_options(self) -> InstallOptions {
        let mut builder = Console::builder()
            .color(self.console.color)
            .target(match self.console.stream {
                Stream::Stdout => ConsoleTarget::Stdout,
                Stream::Stderr => ConsoleTarget::Stderr,
            });
        if let Some(width) = self.console.width {
            builder = builder.width(width);
        }

        let mut options = InstallOptions::default()
            .console(builder.build())
            .level(self.logging.level)
            .time_format(self.logging.time_format.as_str())
            .rich_tracebacks(self.traceback.enabled)
            .traceback_extra_lines(self.traceback.extra_lines)
            .traceback_suppress(self.traceback.suppress)
            .markup(self.logging.markup);

        options.show_time = self.logging.show_time;
        options.omit_repeated_times = self.logging.omit_repeated_times;
        options.keywords = self.logging.keywords;
        options.show_path = self.logging.show_path;
        options.show_fields = self.logging.show_fields;
        options.env_filter = self.logging.env_filter;
        options.traceback_theme = self.traceback.theme;
        options.traceback_max_frames = self.traceback.max_frames;
        options.theme_overrides = self.theme.into_iter().collect();
        options.custom_levels = self.levels.into_iter().collect();
        if !self.logging.exception_hook {
            options.exception_hook = None;
        }

        options
    }
}
