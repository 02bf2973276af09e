//! Highlighters restyle a [`Text`] after it has been built.
//!
//! Events pick a highlighter with the `highlighter` field (by registry
//! name), override it entirely with `style`, or replace the text with `text`.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::{StyleRef, Text};

/// Transforms a text, usually by adding spans.
pub trait Highlighter: Send + Sync + fmt::Debug {
    fn highlight(&self, text: Text) -> Text;
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHighlighter;

impl Highlighter for NullHighlighter {
    fn highlight(&self, text: Text) -> Text {
        text
    }
}

static REPR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?P<url>(?:https?|wss?|file)://[-0-9a-zA-Z$_+!`(),.?/;:&=%#~@]*)"#,
        r"|(?P<uuid>\b[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12}\b)",
        r"|(?P<ipv4>\b[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\b)",
        r#"|(?P<str>"[^"\n]*")"#,
        r"|(?P<bool_true>\btrue\b)|(?P<bool_false>\bfalse\b)",
        r"|(?P<none>\b(?:None|null)\b)",
        r"|(?P<path>\B/[-\w.+/]+)",
        r"|(?P<attrib_name>\b[A-Za-z_][\w.]*)=",
        r"|(?P<number>-?\b[0-9]+(?:\.[0-9]+)?(?:[eE][-+]?[0-9]+)?\b)",
        r"|(?P<brace>[\[\]{}()])",
    ))
    .expect("repr pattern is valid")
});

/// Highlights the usual suspects in log lines: numbers, strings, booleans,
/// URLs, paths, IPs, UUIDs and `key=` names. Styles are `repr.<group>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReprHighlighter;

impl Highlighter for ReprHighlighter {
    fn highlight(&self, mut text: Text) -> Text {
        text.highlight_regex(&REPR, "repr.");
        text
    }
}

/// Paints the whole text with one style.
#[derive(Debug, Clone)]
pub struct StyleHighlighter {
    style: StyleRef,
}

impl StyleHighlighter {
    pub fn new(style: impl Into<StyleRef>) -> Self {
        Self {
            style: style.into(),
        }
    }
}

impl Highlighter for StyleHighlighter {
    fn highlight(&self, text: Text) -> Text {
        Text::styled(text.plain().to_string(), self.style.clone())
    }
}

/// Ignores its input and yields a fixed text.
#[derive(Debug, Clone)]
pub struct ReplaceHighlighter {
    replacement: Text,
}

impl ReplaceHighlighter {
    pub fn new(replacement: Text) -> Self {
        Self { replacement }
    }
}

impl Highlighter for ReplaceHighlighter {
    fn highlight(&self, _text: Text) -> Text {
        self.replacement.clone()
    }
}

/// Styles fixed words, such as HTTP verbs.
#[derive(Debug, Clone)]
pub struct KeywordHighlighter {
    words: Vec<String>,
    style: String,
}

impl KeywordHighlighter {
    pub fn new(words: Vec<String>, style: impl Into<String>) -> Self {
        Self {
            words,
            style: style.into(),
        }
    }
}

impl Highlighter for KeywordHighlighter {
    fn highlight(&self, mut text: Text) -> Text {
        text.highlight_words(&self.words, &self.style);
        text
    }
}

static RUST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<comment>//.*$)",
        r#"|(?P<string>"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)')"#,
        r"|(?P<macro>\b[a-z_][a-z0-9_]*!)",
        r"|(?P<keyword>\b(?:as|async|await|break|const|continue|crate|dyn|else|enum|extern|false|fn|for|if|impl|in|let|loop|match|mod|move|mut|pub|ref|return|self|Self|static|struct|super|trait|true|type|unsafe|use|where|while)\b)",
        r"|(?P<number>\b[0-9][0-9_]*(?:\.[0-9_]+)?(?:[iuf](?:8|16|32|64|128|size))?\b)",
        r"|(?P<type>\b[A-Z][A-Za-z0-9_]*\b)",
    ))
    .expect("rust pattern is valid")
});

/// Minimal Rust source highlighting for traceback context lines.
/// Styles are `code.<group>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustHighlighter;

impl Highlighter for RustHighlighter {
    fn highlight(&self, mut text: Text) -> Text {
        text.highlight_regex(&RUST, "code.");
        text
    }
}

/// Named highlighters that events can select with `highlighter = "<name>"`.
#[derive(Debug, Clone)]
pub struct HighlighterRegistry {
    entries: HashMap<String, Arc<dyn Highlighter>>,
}

impl HighlighterRegistry {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, highlighter: Arc<dyn Highlighter>) {
        self.entries.insert(name.into(), highlighter);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Highlighter>> {
        self.entries.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for HighlighterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("repr", Arc::new(ReprHighlighter));
        registry.register("null", Arc::new(NullHighlighter));
        registry.register("rust", Arc::new(RustHighlighter));
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{Style, Theme};

    fn styled_words(text: &Text, theme: &Theme) -> String {
        text.render(theme, true)
    }

    #[test]
    fn test_repr_highlights_numbers_and_strings() {
        let mut theme = Theme::empty();
        theme.insert("repr.number", Style::parse("cyan").unwrap());
        theme.insert("repr.str", Style::parse("green").unwrap());

        let text = ReprHighlighter.highlight(Text::new(r#"took 42 ms for "job""#));
        let out = styled_words(&text, &theme);
        assert!(out.contains("\x1b[36m42\x1b[0m"));
        assert!(out.contains("\x1b[32m\"job\"\x1b[0m"));
    }

    #[test]
    fn test_repr_prefers_url_over_path() {
        let mut theme = Theme::empty();
        theme.insert("repr.url", Style::parse("blue").unwrap());
        theme.insert("repr.path", Style::parse("magenta").unwrap());

        let text = ReprHighlighter.highlight(Text::new("fetch https://example.com/a/b"));
        let out = styled_words(&text, &theme);
        assert!(out.contains("\x1b[34mhttps://example.com/a/b\x1b[0m"));
        assert!(!out.contains("\x1b[35m"));
    }

    #[test]
    fn test_repr_skips_digits_inside_words() {
        let text = ReprHighlighter.highlight(Text::new("sha256"));
        let mut theme = Theme::empty();
        theme.insert("repr.number", Style::parse("cyan").unwrap());
        assert_eq!(text.render(&theme, true), "sha256");
    }

    #[test]
    fn test_style_highlighter_replaces_spans() {
        let text = ReprHighlighter.highlight(Text::new("value 1"));
        let text = StyleHighlighter::new("red bold").highlight(text);
        assert_eq!(text.render(&Theme::empty(), true), "\x1b[1;31mvalue 1\x1b[0m");
    }

    #[test]
    fn test_rust_highlighter_keywords() {
        let mut theme = Theme::empty();
        theme.insert("code.keyword", Style::parse("magenta").unwrap());
        theme.insert("code.macro", Style::parse("cyan").unwrap());
        let text = RustHighlighter.highlight(Text::new("let x = vec![1];"));
        let out = text.render(&theme, true);
        assert!(out.starts_with("\x1b[35mlet\x1b[0m"));
        assert!(out.contains("\x1b[36mvec!\x1b[0m"));
    }

    #[test]
    fn test_registry_defaults() {
        let registry = HighlighterRegistry::default();
        assert!(registry.get("repr").is_some());
        assert!(registry.get("missing").is_none());
    }
}
