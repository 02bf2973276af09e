//! Color schemes for traceback code listings.

use colored::Color;

use crate::text::{Style, Theme};

pub const THEME_NAMES: [&str; 4] = ["ansi_dark", "ansi_light", "monokai", "plain"];

/// A named palette for `code.*` and `traceback.*` styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracebackTheme {
    #[default]
    AnsiDark,
    AnsiLight,
    Monokai,
    Plain,
}

impl TracebackTheme {
    pub fn by_name(name: &str) -> Option<Self> {
        let theme = match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "ansi_dark" | "default" => TracebackTheme::AnsiDark,
            "ansi_light" => TracebackTheme::AnsiLight,
            "monokai" => TracebackTheme::Monokai,
            "plain" | "none" => TracebackTheme::Plain,
            _ => return None,
        };
        Some(theme)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TracebackTheme::AnsiDark => "ansi_dark",
            TracebackTheme::AnsiLight => "ansi_light",
            TracebackTheme::Monokai => "monokai",
            TracebackTheme::Plain => "plain",
        }
    }

    /// Write this palette's entries into `theme`.
    pub fn apply(&self, theme: &mut Theme) {
        let s = Style::new();
        let entries: [(&str, Style); 8] = match self {
            TracebackTheme::AnsiDark => [
                ("code.keyword", s.fg(Color::BrightMagenta)),
                ("code.string", s.fg(Color::BrightYellow)),
                ("code.comment", s.fg(Color::BrightBlack).italic()),
                ("code.number", s.fg(Color::BrightCyan)),
                ("code.macro", s.fg(Color::BrightBlue)),
                ("code.type", s.fg(Color::BrightGreen)),
                ("traceback.lineno", s.fg(Color::BrightBlack)),
                ("traceback.border", s.fg(Color::Red)),
            ],
            TracebackTheme::AnsiLight => [
                ("code.keyword", s.fg(Color::Magenta)),
                ("code.string", s.fg(Color::Yellow)),
                ("code.comment", s.fg(Color::BrightBlack).italic()),
                ("code.number", s.fg(Color::Cyan)),
                ("code.macro", s.fg(Color::Blue)),
                ("code.type", s.fg(Color::Green)),
                ("traceback.lineno", s.fg(Color::BrightBlack)),
                ("traceback.border", s.fg(Color::Red)),
            ],
            TracebackTheme::Monokai => [
                ("code.keyword", s.fg(rgb(0xf9, 0x26, 0x72))),
                ("code.string", s.fg(rgb(0xe6, 0xdb, 0x74))),
                ("code.comment", s.fg(rgb(0x75, 0x71, 0x5e)).italic()),
                ("code.number", s.fg(rgb(0xae, 0x81, 0xff))),
                ("code.macro", s.fg(rgb(0x66, 0xd9, 0xef))),
                ("code.type", s.fg(rgb(0xa6, 0xe2, 0x2e))),
                ("traceback.lineno", s.fg(rgb(0x75, 0x71, 0x5e))),
                ("traceback.border", s.fg(rgb(0xf9, 0x26, 0x72))),
            ],
            TracebackTheme::Plain => [
                ("code.keyword", s),
                ("code.string", s),
                ("code.comment", s),
                ("code.number", s),
                ("code.macro", s),
                ("code.type", s),
                ("traceback.lineno", s),
                ("traceback.border", s),
            ],
        };

        for (name, style) in entries {
            theme.insert(name, style);
        }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::TrueColor { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        assert_eq!(TracebackTheme::by_name("Monokai"), Some(TracebackTheme::Monokai));
        assert_eq!(TracebackTheme::by_name("ansi-light"), Some(TracebackTheme::AnsiLight));
        assert_eq!(TracebackTheme::by_name("solarized"), None);
        for name in THEME_NAMES {
            assert_eq!(TracebackTheme::by_name(name).map(|t| t.name()), Some(name));
        }
    }

    #[test]
    fn test_apply_overrides_code_styles() {
        let mut theme = Theme::default();
        TracebackTheme::Plain.apply(&mut theme);
        assert!(theme.get("code.keyword").is_plain());
        TracebackTheme::AnsiDark.apply(&mut theme);
        assert_eq!(
            theme.get("code.keyword").foreground(),
            Some(Color::BrightMagenta)
        );
    }
}
