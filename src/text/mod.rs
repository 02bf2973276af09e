//! Styled text subsystem.
//!
//! # Data Flow
//! ```text
//! message string
//!     → markup.rs (optional "[bold red]..[/]" parsing)
//!     → Text (plain string + styled spans)
//!     → highlighter.rs (regex / keyword / whole-line styling)
//!     → Text::render(theme, ansi) → ANSI string for the console
//! ```
//!
//! # Design Decisions
//! - Spans hold byte ranges into the plain string and may overlap
//! - Named styles (`log.time`) resolve against the theme at render time,
//!   so a theme swap restyles everything without touching the spans
//! - Width is measured in chars; no East Asian width handling

pub mod highlighter;
pub mod markup;
pub mod style;
pub mod theme;

use std::ops::Range;

use regex::Regex;

pub use highlighter::{Highlighter, HighlighterRegistry};
pub use markup::MarkupError;
pub use style::{Style, StyleError};
pub use theme::Theme;

/// A style reference: either a theme entry or an inline style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleRef {
    Named(String),
    Inline(Style),
}

impl StyleRef {
    pub fn resolve(&self, theme: &Theme) -> Style {
        match self {
            StyleRef::Named(name) => theme.get(name),
            StyleRef::Inline(style) => *style,
        }
    }
}

impl From<&str> for StyleRef {
    /// Theme names win; anything else is parsed as an inline style. Strings
    /// that are neither stay named and resolve to the empty style.
    fn from(value: &str) -> Self {
        if value.contains('.') {
            return StyleRef::Named(value.to_string());
        }
        match Style::parse(value) {
            Ok(style) => StyleRef::Inline(style),
            Err(_) => StyleRef::Named(value.to_string()),
        }
    }
}

impl From<Style> for StyleRef {
    fn from(value: Style) -> Self {
        StyleRef::Inline(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    range: Range<usize>,
    style: StyleRef,
}

/// A string with styled regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    plain: String,
    spans: Vec<Span>,
}

impl Text {
    pub fn new(plain: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            spans: Vec::new(),
        }
    }

    /// Text with one style covering all of it.
    pub fn styled(plain: impl Into<String>, style: impl Into<StyleRef>) -> Self {
        let mut text = Text::new(plain);
        text.stylize_all(style);
        text
    }

    /// Parse console markup. See [`markup`].
    pub fn from_markup(markup: &str) -> Result<Self, MarkupError> {
        markup::parse(markup)
    }

    /// Parse console markup, keeping the literal string when it is malformed.
    pub fn from_markup_lossy(markup: &str) -> Self {
        markup::parse(markup).unwrap_or_else(|_| Text::new(markup))
    }

    pub fn plain(&self) -> &str {
        &self.plain
    }

    pub fn len(&self) -> usize {
        self.plain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    /// Display width in columns.
    pub fn width(&self) -> usize {
        self.plain.chars().count()
    }

    pub fn stylize(&mut self, range: Range<usize>, style: impl Into<StyleRef>) {
        let end = range.end.min(self.plain.len());
        if range.start >= end {
            return;
        }
        self.spans.push(Span {
            range: range.start..end,
            style: style.into(),
        });
    }

    pub fn stylize_all(&mut self, style: impl Into<StyleRef>) {
        let len = self.plain.len();
        self.stylize(0..len, style);
    }

    /// Apply a style underneath every existing span.
    pub fn stylize_before(&mut self, style: impl Into<StyleRef>) {
        if self.plain.is_empty() {
            return;
        }
        self.spans.insert(
            0,
            Span {
                range: 0..self.plain.len(),
                style: style.into(),
            },
        );
    }

    pub fn append(&mut self, plain: &str, style: Option<StyleRef>) {
        let start = self.plain.len();
        self.plain.push_str(plain);
        if let Some(style) = style {
            self.stylize(start..self.plain.len(), style);
        }
    }

    pub fn append_text(&mut self, other: &Text) {
        let offset = self.plain.len();
        self.plain.push_str(&other.plain);
        self.spans.extend(other.spans.iter().map(|span| Span {
            range: span.range.start + offset..span.range.end + offset,
            style: span.style.clone(),
        }));
    }

    /// Style each match of `re`. Named capture groups are styled as
    /// `{prefix}{group}`; without named groups the whole match gets `prefix`.
    pub fn highlight_regex(&mut self, re: &Regex, prefix: &str) {
        let names: Vec<&str> = re.capture_names().flatten().collect();
        let mut found = Vec::new();

        for caps in re.captures_iter(&self.plain) {
            if names.is_empty() {
                if let Some(m) = caps.get(0) {
                    found.push((m.range(), prefix.to_string()));
                }
                continue;
            }
            for name in &names {
                if let Some(m) = caps.name(name) {
                    if !m.is_empty() {
                        found.push((m.range(), format!("{prefix}{name}")));
                    }
                }
            }
        }

        for (range, style) in found {
            self.stylize(range, StyleRef::Named(style));
        }
    }

    /// Style every occurrence of each word.
    pub fn highlight_words<S: AsRef<str>>(&mut self, words: &[S], style: &str) {
        let mut found = Vec::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            for (start, _) in self.plain.match_indices(word) {
                found.push(start..start + word.len());
            }
        }
        for range in found {
            self.stylize(range, StyleRef::Named(style.to_string()));
        }
    }

    /// Copy out a byte range, keeping the spans that overlap it.
    pub fn slice(&self, range: Range<usize>) -> Text {
        let spans = self
            .spans
            .iter()
            .filter(|span| span.range.start < range.end && span.range.end > range.start)
            .map(|span| Span {
                range: span.range.start.max(range.start) - range.start
                    ..span.range.end.min(range.end) - range.start,
                style: span.style.clone(),
            })
            .collect();

        Text {
            plain: self.plain[range].to_string(),
            spans,
        }
    }

    /// Split into lines no wider than `width`, breaking at whitespace when
    /// possible. Embedded newlines always break.
    pub fn wrap(&self, width: usize) -> Vec<Text> {
        let width = width.max(1);
        let mut lines = Vec::new();
        let mut line_start = 0;

        for segment in self.plain.split('\n') {
            let seg_end = line_start + segment.len();
            let mut start = line_start;

            while self.plain[start..seg_end].chars().count() > width {
                let window = &self.plain[start..seg_end];
                let hard = window
                    .char_indices()
                    .nth(width)
                    .map(|(i, _)| start + i)
                    .unwrap_or(seg_end);
                let soft = window[..hard - start]
                    .rfind(char::is_whitespace)
                    .filter(|&i| i > 0)
                    .map(|i| start + i);

                match soft {
                    Some(brk) => {
                        lines.push(self.slice(start..brk));
                        start = brk + self.plain[brk..].chars().next().map_or(1, char::len_utf8);
                    }
                    None => {
                        lines.push(self.slice(start..hard));
                        start = hard;
                    }
                }
            }

            lines.push(self.slice(start..seg_end));
            line_start = seg_end + 1;
        }

        lines
    }

    /// Pad with spaces up to `width` columns, or cut down to it.
    pub fn fit(&self, width: usize) -> Text {
        let current = self.width();
        if current <= width {
            let mut padded = self.clone();
            padded.plain.push_str(&" ".repeat(width - current));
            return padded;
        }
        let end = self
            .plain
            .char_indices()
            .nth(width)
            .map_or(self.plain.len(), |(i, _)| i);
        self.slice(0..end)
    }

    /// Render to a string, with ANSI escapes when `ansi` is set.
    pub fn render(&self, theme: &Theme, ansi: bool) -> String {
        if !ansi || self.spans.is_empty() {
            return self.plain.clone();
        }

        let mut cuts: Vec<usize> = vec![0, self.plain.len()];
        for span in &self.spans {
            cuts.push(span.range.start);
            cuts.push(span.range.end);
        }
        cuts.sort_unstable();
        cuts.dedup();

        let resolved: Vec<(Range<usize>, Style)> = self
            .spans
            .iter()
            .map(|span| (span.range.clone(), span.style.resolve(theme)))
            .collect();

        let mut out = String::with_capacity(self.plain.len() + 16);
        for pair in cuts.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let style = resolved
                .iter()
                .filter(|(range, _)| range.start <= start && range.end >= end)
                .fold(Style::new(), |acc, (_, style)| acc.combine(style));
            out.push_str(&style.paint(&self.plain[start..end], true));
        }
        out
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text::new(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text::new(value)
    }
}

impl std::fmt::Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.plain)
    }
}
