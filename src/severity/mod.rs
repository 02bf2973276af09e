//! Severity levels shared by the `log` bridge and the renderer.
//!
//! # Data Flow
//! ```text
//! log::Record level ("WARN") ─┐
//! tracing::Level / `severity` ├─→ LevelTable (name ⇄ number) → Severity
//! config `level = "success"` ─┘
//! ```
//!
//! # Design Decisions
//! - Severities are numbers (5..=50) so custom levels slot between the
//!   five `tracing` levels; names are optional
//! - One process-wide table, lazily seeded with the built-ins on first use,
//!   so every record sees the same names
//! - Events choose a non-default severity with a `severity = <n>` field and
//!   keep the nearest `tracing::Level` for filtering

pub mod table;

use tracing::level_filters::LevelFilter;
use tracing::Level;

pub use table::{levels, register_level, LevelError, LevelSpec, LevelTable};

pub const TRACE: u8 = 5;
pub const DEBUG: u8 = 10;
pub const INFO: u8 = 20;
pub const SUCCESS: u8 = 25;
pub const WARNING: u8 = 30;
pub const ERROR: u8 = 40;
pub const CRITICAL: u8 = 50;

pub(crate) const BUILTIN_LEVELS: [(&str, u8); 7] = [
    ("TRACE", TRACE),
    ("DEBUG", DEBUG),
    ("INFO", INFO),
    ("SUCCESS", SUCCESS),
    ("WARNING", WARNING),
    ("ERROR", ERROR),
    ("CRITICAL", CRITICAL),
];

/// A numeric severity with an optional name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Severity {
    pub no: u8,
    pub name: Option<String>,
}

impl Severity {
    pub fn named(name: impl Into<String>, no: u8) -> Self {
        Self {
            no,
            name: Some(name.into()),
        }
    }

    pub fn numeric(no: u8) -> Self {
        Self { no, name: None }
    }

    /// The label shown in the level column.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Level {}", self.no),
        }
    }

    /// Theme entry for the level column, if the level is named.
    pub fn style_name(&self) -> Option<String> {
        self.name
            .as_ref()
            .map(|name| format!("logging.level.{}", name.to_ascii_lowercase()))
    }

    pub fn tracing_level(&self) -> Level {
        match self.no {
            n if n >= ERROR => Level::ERROR,
            n if n >= WARNING => Level::WARN,
            n if n >= INFO => Level::INFO,
            n if n >= DEBUG => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// The coarsest `tracing` filter that still lets this severity through.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_level(self.tracing_level())
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        match self.tracing_level() {
            Level::ERROR => log::LevelFilter::Error,
            Level::WARN => log::LevelFilter::Warn,
            Level::INFO => log::LevelFilter::Info,
            Level::DEBUG => log::LevelFilter::Debug,
            Level::TRACE => log::LevelFilter::Trace,
        }
    }
}

/// Default severity for an event without a `severity` field.
pub fn of_tracing(level: &Level) -> u8 {
    match *level {
        Level::ERROR => ERROR,
        Level::WARN => WARNING,
        Level::INFO => INFO,
        Level::DEBUG => DEBUG,
        Level::TRACE => TRACE,
    }
}

pub fn of_log(level: log::Level) -> u8 {
    match level {
        log::Level::Error => ERROR,
        log::Level::Warn => WARNING,
        log::Level::Info => INFO,
        log::Level::Debug => DEBUG,
        log::Level::Trace => TRACE,
    }
}
