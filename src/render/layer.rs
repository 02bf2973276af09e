//! The rendering layer.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{Event, Metadata, Subscriber};
use tracing_log::AsLog;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use super::fields::EventFields;
use crate::bridge::LogBridge;
use super::time::{TimeFormat, TimeTracker};
use crate::console::Console;
use crate::severity::{self, levels, Severity};
use crate::text::highlighter::{
    Highlighter, HighlighterRegistry, KeywordHighlighter, ReplaceHighlighter, ReprHighlighter,
    StyleHighlighter,
};
use crate::text::{StyleRef, Text};
use crate::traceback::{self, Traceback, TracebackOptions};

/// Words highlighted with `logging.keyword` when none are configured.
pub const DEFAULT_KEYWORDS: [&str; 8] = [
    "GET", "POST", "HEAD", "PUT", "DELETE", "OPTIONS", "TRACE", "PATCH",
];

const LEVEL_WIDTH: usize = 8;
const MIN_MESSAGE_WIDTH: usize = 20;

/// Rendering options for [`RichLayer`].
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Records below this severity are dropped.
    pub min_severity: u8,
    pub show_time: bool,
    pub time_format: TimeFormat,
    pub omit_repeated_times: bool,
    pub show_level: bool,
    pub show_path: bool,
    /// Append non-special fields as `key=value`.
    pub show_fields: bool,
    /// Parse messages as markup unless the record says otherwise.
    pub markup: bool,
    pub keywords: Vec<String>,
    pub highlighter: Arc<dyn Highlighter>,
    pub highlighters: HighlighterRegistry,
    /// `None` prints failures as plain text.
    pub traceback: Option<TracebackOptions>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            min_severity: severity::INFO,
            show_time: true,
            time_format: TimeFormat::default(),
            omit_repeated_times: true,
            show_level: true,
            show_path: true,
            show_fields: true,
            markup: false,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            highlighter: Arc::new(ReprHighlighter),
            highlighters: HighlighterRegistry::default(),
            traceback: Some(TracebackOptions::default()),
        }
    }
}

/// The message column of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageCell {
    /// Pre-rendered output, written as-is.
    Verbatim(String),
    Text(Text),
}

/// A `tracing` layer that renders events to a [`Console`].
#[derive(Debug)]
pub struct RichLayer {
    console: Console,
    settings: RenderSettings,
    keywords: KeywordHighlighter,
    times: TimeTracker,
}

impl RichLayer {
    pub fn new(console: Console, settings: RenderSettings) -> Self {
        let keywords = KeywordHighlighter::new(settings.keywords.clone(), "logging.keyword");
        Self {
            console,
            settings,
            keywords,
            times: TimeTracker::default(),
        }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// The severity of an event: its `severity` field, else its level.
    /// Bridged `log` records resolve their level by its `log` name.
    pub fn severity_of(level: &tracing::Level, fields: &EventFields) -> Severity {
        let no = match fields.severity {
            Some(no) => no,
            None if fields.origin.target.is_some() => LogBridge::severity_of(level.as_log()).no,
            None => severity::of_tracing(level),
        };
        levels().describe(no)
    }

    /// Render one event, or `None` when it is below the minimum severity.
    pub fn render_event(
        &self,
        metadata: &Metadata<'_>,
        fields: &EventFields,
        now: &DateTime<Local>,
    ) -> Option<String> {
        let severity = Self::severity_of(metadata.level(), fields);
        if severity.no < self.settings.min_severity {
            return None;
        }

        let mut out = String::new();

        if self.settings.show_time {
            let mut time = self.settings.time_format.format(now);
            if self
                .times
                .should_show(time.plain(), self.settings.omit_repeated_times)
            {
                time.stylize_before(StyleRef::Named("log.time".into()));
                push_line(&mut out, self.console.render(&time));
            }
        }

        let path = self.path_of(metadata, fields);
        for line in self.layout(&severity, self.message_cell(fields), path) {
            push_line(&mut out, line);
        }

        for line in self.failure_lines(fields) {
            push_line(&mut out, self.console.render(&line));
        }

        Some(out)
    }

    /// Build the message column from the message and the special keys.
    ///
    /// `rich` wins outright. Otherwise `style` (or failing that
    /// `highlighter`) picks the highlighter, `alt` swaps the message and
    /// turns markup on, `markup` sets markup explicitly, and `text` replaces
    /// whatever the highlighter would have produced.
    pub fn message_cell(&self, fields: &EventFields) -> MessageCell {
        if let Some(rich) = &fields.rich {
            return MessageCell::Verbatim(rich.clone());
        }

        let settings = &self.settings;
        let mut highlighter: Arc<dyn Highlighter> = settings.highlighter.clone();
        if let Some(style) = &fields.style {
            highlighter = Arc::new(StyleHighlighter::new(style.as_str()));
        } else if let Some(name) = &fields.highlighter {
            if let Some(named) = settings.highlighters.get(name) {
                highlighter = named;
            }
        }

        let mut message = fields.message.clone().unwrap_or_default();
        let mut markup = settings.markup;
        if let Some(alt) = &fields.alt {
            message = alt.clone();
            markup = true;
        }
        if let Some(flag) = fields.markup {
            markup = flag;
        }
        if let Some(text) = &fields.text {
            highlighter = Arc::new(ReplaceHighlighter::new(Text::from_markup_lossy(text)));
        }

        let mut text = if markup {
            Text::from_markup_lossy(&message)
        } else {
            Text::new(message)
        };

        if settings.show_fields {
            for (key, value) in &fields.extra {
                if !text.is_empty() {
                    text.append(" ", None);
                }
                text.append(&format!("{key}={value}"), None);
            }
        }

        let text = highlighter.highlight(text);
        MessageCell::Text(self.keywords.highlight(text))
    }

    /// `file:line` of the caller, preferring the bridged origin.
    fn path_of(&self, metadata: &Metadata<'_>, fields: &EventFields) -> Option<String> {
        if !self.settings.show_path {
            return None;
        }
        let (file, line) = match (&fields.origin.file, &fields.origin.target) {
            (Some(file), _) => (file.as_str(), fields.origin.line),
            // Bridged without a location: the bridge's own callsite means nothing.
            (None, Some(_)) => return None,
            (None, None) => (metadata.file()?, metadata.line()),
        };
        let name = Path::new(file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(file);
        Some(match line {
            Some(line) => format!("{name}:{line}"),
            None => name.to_string(),
        })
    }

    fn layout(&self, severity: &Severity, cell: MessageCell, path: Option<String>) -> Vec<String> {
        let width = self.console.width();

        let level_cell = if self.settings.show_level {
            let label = severity.label();
            let mut level = Text::new(format!("{label:<LEVEL_WIDTH$}"));
            if let Some(style) = severity.style_name() {
                level.stylize(0..label.len(), StyleRef::Named(style));
            }
            level.append(" ", None);
            Some(level)
        } else {
            None
        };
        let indent = level_cell.as_ref().map_or(0, Text::width);

        let mut path = path.map(|p| Text::styled(p, StyleRef::Named("log.path".into())));
        let path_width = path.as_ref().map_or(0, |p| p.width() + 1);
        let mut message_width = width.saturating_sub(indent + path_width);
        if message_width < MIN_MESSAGE_WIDTH {
            path = None;
            message_width = width.saturating_sub(indent).max(MIN_MESSAGE_WIDTH);
        }

        let prefix = self.console.render(&level_cell.unwrap_or_default());
        let blank = " ".repeat(indent);

        match cell {
            MessageCell::Verbatim(raw) => {
                let mut rows: Vec<String> = raw
                    .lines()
                    .enumerate()
                    .map(|(i, line)| {
                        let lead = if i == 0 { &prefix } else { &blank };
                        format!("{lead}{line}")
                    })
                    .collect();
                if rows.is_empty() {
                    rows.push(prefix);
                }
                rows
            }
            MessageCell::Text(text) => {
                let mut wrapped = text.wrap(message_width);
                if wrapped.is_empty() {
                    wrapped.push(Text::new(""));
                }

                wrapped
                    .iter()
                    .enumerate()
                    .map(|(i, line)| {
                        if i == 0 {
                            match path.take() {
                                Some(p) => format!(
                                    "{prefix}{} {}",
                                    self.console.render(&line.fit(message_width)),
                                    self.console.render(&p)
                                ),
                                None => format!("{prefix}{}", self.console.render(line)),
                            }
                        } else {
                            format!("{blank}{}", self.console.render(line))
                        }
                    })
                    .collect()
            }
        }
    }

    fn failure_lines(&self, fields: &EventFields) -> Vec<Text> {
        let traceback = if let Some(payload) = &fields.panic.payload {
            Traceback::from_panic(
                payload,
                fields.panic.location.as_deref(),
                fields.panic.backtrace.as_deref(),
                fields.panic.note.as_deref(),
            )
        } else if let Some(chain) = &fields.error {
            Traceback::from_error(chain, fields.backtrace.as_deref())
        } else {
            return Vec::new();
        };

        match &self.settings.traceback {
            Some(options) => traceback::render(&traceback, options, self.console.width()),
            None => traceback.plain_lines(),
        }
    }
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end_matches(' '));
    out.push('\n');
}

impl<S> Layer<S> for RichLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = EventFields::default();
        event.record(&mut fields);

        if let Some(block) = self.render_event(event.metadata(), &fields, &Local::now()) {
            self.console.write_block(&block);
        }
    }
}
