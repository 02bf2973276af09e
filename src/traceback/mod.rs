//! Rich tracebacks for panics and error chains.
//!
//! # Data Flow
//! ```text
//! panic hook ──→ panic.payload / panic.location / panic.backtrace fields ─┐
//! error field (&dyn Error) ──→ message + source() chain ─────────────────┤
//!                                                                         ▼
//!                      Traceback::from_panic / from_error
//!                          → frames.rs (parse std backtrace, trim)
//!                          → render.rs (boxed frames + source context)
//! ```
//!
//! # Design Decisions
//! - Frames come from the `Display` form of `std::backtrace::Backtrace`,
//!   which is what travels through an event field
//! - Without a captured backtrace the panic location alone becomes the frame,
//!   so there is still source context to show
//! - Suppressed frames keep their header line and lose their source listing

pub mod frames;
pub mod render;
pub mod theme;

pub use frames::Frame;
pub use render::render;
pub use theme::TracebackTheme;

use crate::text::{StyleRef, Text};

pub const DEFAULT_EXTRA_LINES: usize = 3;
pub const DEFAULT_MAX_FRAMES: usize = 100;

const BACKTRACE_NOTE: &str = "run with `RUST_BACKTRACE=1` to display a backtrace";

/// What raised the traceback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TracebackKind {
    Panic { location: Option<String> },
    Error { causes: Vec<String> },
}

/// A captured failure, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traceback {
    pub kind: TracebackKind,
    pub message: String,
    /// Most recent call first, as std prints them.
    pub frames: Vec<Frame>,
    pub note: Option<String>,
}

impl Traceback {
    /// Build from panic hook data.
    pub fn from_panic(
        payload: &str,
        location: Option<&str>,
        backtrace: Option<&str>,
        note: Option<&str>,
    ) -> Self {
        let mut frames = backtrace
            .map(|bt| frames::trim_short_backtrace(frames::parse_backtrace(bt)))
            .unwrap_or_default();
        if frames.is_empty() {
            if let Some(location) = location {
                frames.push(Frame::at("<panic location>", location));
            }
        }

        let note = match (note, backtrace) {
            (Some(note), _) => Some(note.to_string()),
            (None, None) => Some(BACKTRACE_NOTE.to_string()),
            (None, Some(_)) => None,
        };

        Self {
            kind: TracebackKind::Panic {
                location: location.map(str::to_string),
            },
            message: payload.to_string(),
            frames,
            note,
        }
    }

    /// Build from an error and its `source()` chain, outermost first.
    pub fn from_error(chain: &[String], backtrace: Option<&str>) -> Self {
        let frames = backtrace
            .map(|bt| frames::trim_short_backtrace(frames::parse_backtrace(bt)))
            .unwrap_or_default();

        Self {
            kind: TracebackKind::Error {
                causes: chain.iter().skip(1).cloned().collect(),
            },
            message: chain.first().cloned().unwrap_or_default(),
            frames,
            note: None,
        }
    }

    /// The failure summary printed under the frames.
    pub fn summary(&self) -> Vec<Text> {
        let mut lines = Vec::new();

        match &self.kind {
            TracebackKind::Panic { location } => {
                let mut head = Text::styled("panicked", StyleRef::Named("traceback.error".into()));
                if let Some(location) = location {
                    head.append(" at ", None);
                    head.append(location, Some(StyleRef::Named("traceback.location".into())));
                }
                head.append(":", None);
                lines.push(head);
                for line in self.message.lines() {
                    lines.push(Text::styled(line, StyleRef::Named("traceback.message".into())));
                }
            }
            TracebackKind::Error { causes } => {
                let mut head = Text::styled("Error", StyleRef::Named("traceback.error".into()));
                head.append(": ", None);
                head.append(&self.message, Some(StyleRef::Named("traceback.message".into())));
                lines.push(head);

                if !causes.is_empty() {
                    lines.push(Text::styled("Caused by:", StyleRef::Named("traceback.error".into())));
                    for (i, cause) in causes.iter().enumerate() {
                        lines.push(Text::new(format!("    {i}: {cause}")));
                    }
                }
            }
        }

        if let Some(note) = &self.note {
            lines.push(Text::styled(
                format!("note: {note}"),
                StyleRef::Named("traceback.note".into()),
            ));
        }
        lines
    }

    /// Unstyled report used when rich tracebacks are off: the summary plus
    /// one line per frame.
    pub fn plain_lines(&self) -> Vec<Text> {
        let mut lines = self.summary();
        for (i, frame) in self.frames.iter().enumerate() {
            let mut line = format!("  {i}: {}", frame.function);
            if let (Some(file), Some(no)) = (&frame.file, frame.line) {
                line.push_str(&format!(" at {file}:{no}"));
            }
            lines.push(Text::new(line));
        }
        lines
    }
}

/// Knobs for [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracebackOptions {
    /// Source lines shown around the failing line.
    pub extra_lines: usize,
    /// Module paths (`tokio`) or path fragments (`/rustc/`) to collapse.
    pub suppress: Vec<String>,
    /// Frames beyond this are elided from the middle of the stack.
    pub max_frames: usize,
    pub theme: TracebackTheme,
}

impl Default for TracebackOptions {
    fn default() -> Self {
        Self {
            extra_lines: DEFAULT_EXTRA_LINES,
            suppress: Vec::new(),
            max_frames: DEFAULT_MAX_FRAMES,
            theme: TracebackTheme::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_without_backtrace_uses_location() {
        let tb = Traceback::from_panic("boom", Some("src/main.rs:4:5"), None, None);
        assert_eq!(tb.frames.len(), 1);
        assert_eq!(tb.frames[0].file.as_deref(), Some("src/main.rs"));
        assert_eq!(tb.frames[0].line, Some(4));
        assert_eq!(tb.note.as_deref(), Some(BACKTRACE_NOTE));
    }

    #[test]
    fn test_error_summary_lists_causes() {
        let chain = vec![
            "failed to load config".to_string(),
            "file not found".to_string(),
        ];
        let tb = Traceback::from_error(&chain, None);
        let lines: Vec<String> = tb.summary().iter().map(|t| t.plain().to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "Error: failed to load config",
                "Caused by:",
                "    0: file not found"
            ]
        );
    }

    #[test]
    fn test_panic_summary() {
        let tb = Traceback::from_panic("boom", Some("src/a.rs:1:1"), Some(""), None);
        let lines: Vec<String> = tb.summary().iter().map(|t| t.plain().to_string()).collect();
        assert_eq!(lines, vec!["panicked at src/a.rs:1:1:", "boom"]);
    }
}
