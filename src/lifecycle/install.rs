//! Wiring the pieces together.
//!
//! # Responsibilities
//! - Build the console, theme and render settings from [`InstallOptions`]
//! - Install the `log` bridge and the global `tracing` subscriber
//! - Install the panic hook
//!
//! # Design Decisions
//! - Fail fast: a bad level, style or theme aborts before anything global
//!   is touched
//! - `layer` and `subscriber` build the same pipeline for scoped use with
//!   `tracing::subscriber::with_default`. Their only global effect is adding
//!   custom levels to the level table, once everything else has validated

use std::fmt;
use std::sync::Arc;

use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};

use super::hook::{default_exception_hook, set_exception_hook, ExceptionHook};
use crate::bridge::LogBridge;
use crate::console::Console;
use crate::error::InstallError;
use crate::render::{RenderSettings, RichLayer, TimeFormat, DEFAULT_KEYWORDS};
use crate::severity::{levels, register_level, LevelSpec, Severity};
use crate::text::{Highlighter, HighlighterRegistry, Style};
use crate::traceback::{TracebackOptions, TracebackTheme, DEFAULT_EXTRA_LINES, DEFAULT_MAX_FRAMES};

/// Everything [`install`] can be told.
#[derive(Clone)]
pub struct InstallOptions {
    /// Where to render. Defaults to stderr.
    pub console: Option<Console>,
    /// Replaces the panic hook when set.
    pub exception_hook: Option<ExceptionHook>,
    pub rich_tracebacks: bool,
    /// Source lines around each traceback frame.
    pub traceback_extra_lines: usize,
    pub traceback_theme: Option<String>,
    pub traceback_suppress: Vec<String>,
    pub traceback_max_frames: usize,
    pub time_format: TimeFormat,
    pub show_time: bool,
    pub omit_repeated_times: bool,
    /// Highlighted words; `None` means the HTTP verbs.
    pub keywords: Option<Vec<String>>,
    /// Minimum severity rendered.
    pub level: LevelSpec,
    pub show_path: bool,
    pub show_fields: bool,
    pub markup: bool,
    /// `(style name, definition)` pairs layered over the console theme.
    pub theme_overrides: Vec<(String, String)>,
    /// Levels registered before `level` is resolved.
    pub custom_levels: Vec<(String, u8)>,
    /// Honour `RUST_LOG` directives on top of `level`.
    pub env_filter: bool,
    pub highlighter: Option<Arc<dyn Highlighter>>,
    pub highlighters: HighlighterRegistry,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            console: None,
            exception_hook: Some(default_exception_hook()),
            rich_tracebacks: true,
            traceback_extra_lines: DEFAULT_EXTRA_LINES,
            traceback_theme: None,
            traceback_suppress: Vec::new(),
            traceback_max_frames: DEFAULT_MAX_FRAMES,
            time_format: TimeFormat::default(),
            show_time: true,
            omit_repeated_times: true,
            keywords: None,
            level: LevelSpec::default(),
            show_path: true,
            show_fields: true,
            markup: false,
            theme_overrides: Vec::new(),
            custom_levels: Vec::new(),
            env_filter: false,
            highlighter: None,
            highlighters: HighlighterRegistry::default(),
        }
    }
}

impl fmt::Debug for InstallOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstallOptions")
            .field("console", &self.console)
            .field("exception_hook", &self.exception_hook.as_ref().map(|_| ".."))
            .field("rich_tracebacks", &self.rich_tracebacks)
            .field("traceback_extra_lines", &self.traceback_extra_lines)
            .field("traceback_theme", &self.traceback_theme)
            .field("traceback_suppress", &self.traceback_suppress)
            .field("time_format", &self.time_format)
            .field("keywords", &self.keywords)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl InstallOptions {
    pub fn console(mut self, console: Console) -> Self {
        self.console = Some(console);
        self
    }

    pub fn exception_hook(mut self, hook: Option<ExceptionHook>) -> Self {
        self.exception_hook = hook;
        self
    }

    pub fn rich_tracebacks(mut self, enabled: bool) -> Self {
        self.rich_tracebacks = enabled;
        self
    }

    pub fn traceback_extra_lines(mut self, lines: usize) -> Self {
        self.traceback_extra_lines = lines;
        self
    }

    pub fn traceback_theme(mut self, theme: impl Into<String>) -> Self {
        self.traceback_theme = Some(theme.into());
        self
    }

    pub fn traceback_suppress<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.traceback_suppress = modules.into_iter().map(Into::into).collect();
        self
    }

    pub fn time_format(mut self, format: impl Into<TimeFormat>) -> Self {
        self.time_format = format.into();
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    pub fn level(mut self, level: impl Into<LevelSpec>) -> Self {
        self.level = level.into();
        self
    }

    pub fn markup(mut self, enabled: bool) -> Self {
        self.markup = enabled;
        self
    }

    pub fn theme_override(mut self, name: impl Into<String>, definition: impl Into<String>) -> Self {
        self.theme_overrides.push((name.into(), definition.into()));
        self
    }

    pub fn custom_level(mut self, name: impl Into<String>, no: u8) -> Self {
        self.custom_levels.push((name.into(), no));
        self
    }

    pub fn env_filter(mut self, enabled: bool) -> Self {
        self.env_filter = enabled;
        self
    }

    pub fn highlighter(mut self, highlighter: Arc<dyn Highlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    pub fn register_highlighter(mut self, name: impl Into<String>, highlighter: Arc<dyn Highlighter>) -> Self {
        self.highlighters.register(name, highlighter);
        self
    }
}

/// Build the rendering layer described by `options`.
pub fn layer(options: &InstallOptions) -> Result<RichLayer, InstallError> {
    let mut table = levels().clone();
    for (name, no) in &options.custom_levels {
        table.register(name, *no)?;
    }
    let min = options.level.severity(&table)?;

    let console = options.console.clone().unwrap_or_else(Console::stderr);
    let mut theme = console.theme().clone();

    let traceback_theme = match &options.traceback_theme {
        Some(name) => TracebackTheme::by_name(name)
            .ok_or_else(|| InstallError::UnknownTracebackTheme(name.clone()))?,
        None => TracebackTheme::default(),
    };
    traceback_theme.apply(&mut theme);

    for (name, definition) in &options.theme_overrides {
        let style = Style::parse(definition).map_err(|source| InstallError::Style {
            name: name.clone(),
            source,
        })?;
        theme.insert(name.clone(), style);
    }

    for (name, no) in &options.custom_levels {
        register_level(name, *no)?;
    }

    let defaults = RenderSettings::default();
    let settings = RenderSettings {
        min_severity: min.no,
        show_time: options.show_time,
        time_format: options.time_format.clone(),
        omit_repeated_times: options.omit_repeated_times,
        show_level: true,
        show_path: options.show_path,
        show_fields: options.show_fields,
        markup: options.markup,
        keywords: options
            .keywords
            .clone()
            .unwrap_or_else(|| DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()),
        highlighter: options.highlighter.clone().unwrap_or(defaults.highlighter),
        highlighters: options.highlighters.clone(),
        traceback: options.rich_tracebacks.then(|| TracebackOptions {
            extra_lines: options.traceback_extra_lines,
            suppress: options.traceback_suppress.clone(),
            max_frames: options.traceback_max_frames,
            theme: traceback_theme,
        }),
    };

    Ok(RichLayer::new(console.with_theme(theme), settings))
}

/// Build a complete subscriber without installing it.
pub fn subscriber(
    options: &InstallOptions,
) -> Result<impl Subscriber + Send + Sync + 'static, InstallError> {
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(directives) if options.env_filter && !directives.trim().is_empty() => {
            Some(EnvFilter::try_new(directives)?)
        }
        _ => None,
    };

    let layer = layer(options)?;
    let coarse = Severity::numeric(layer.settings().min_severity).level_filter();

    Ok(tracing_subscriber::registry()
        .with(env_filter)
        .with(layer.with_filter(coarse)))
}

/// Install rich rendering process-wide: the `log` bridge, the global
/// `tracing` subscriber and (unless disabled) the panic hook.
pub fn install(options: InstallOptions) -> Result<(), InstallError> {
    let subscriber = subscriber(&options)?;

    LogBridge::new(0).install()?;
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(hook) = options.exception_hook {
        set_exception_hook(hook);
    }

    tracing::debug!("rich logging installed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_traceback_theme_is_rejected() {
        let options = InstallOptions::default().traceback_theme("solarized");
        assert!(matches!(
            layer(&options),
            Err(InstallError::UnknownTracebackTheme(name)) if name == "solarized"
        ));
    }

    #[test]
    fn test_bad_style_override_is_rejected() {
        let options = InstallOptions::default().theme_override("log.time", "sparkly");
        assert!(matches!(
            layer(&options),
            Err(InstallError::Style { name, .. }) if name == "log.time"
        ));
    }

    #[test]
    fn test_failed_layer_leaves_levels_alone() {
        let options = InstallOptions::default()
            .custom_level("STAGED", 33)
            .level("staged")
            .traceback_theme("bogus");
        assert!(layer(&options).is_err());
        assert_eq!(levels().by_name("STAGED"), None);

        let options = InstallOptions::default()
            .custom_level("STAGED", 33)
            .level("staged");
        assert_eq!(layer(&options).unwrap().settings().min_severity, 33);
        assert_eq!(levels().by_name("STAGED"), Some(Severity::named("STAGED", 33)));
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let options = InstallOptions::default().level("verbose");
        assert!(matches!(layer(&options), Err(InstallError::Level(_))));
    }

    #[test]
    fn test_settings_follow_options() {
        let (console, _) = Console::capture(80);
        let options = InstallOptions::default()
            .console(console)
            .level("success")
            .rich_tracebacks(false)
            .keywords(["SELECT"]);
        let layer = layer(&options).unwrap();
        assert_eq!(layer.settings().min_severity, 25);
        assert!(layer.settings().traceback.is_none());
        assert_eq!(layer.settings().keywords, vec!["SELECT".to_string()]);
    }
}
