//! Named style tables.
//!
//! Everything the renderer paints goes through a theme name so users can
//! restyle output without touching call sites. Levels use
//! `logging.level.<lowercase name>`, highlighter groups use `repr.<group>`,
//! and traceback parts use `traceback.*` / `code.*`.

use std::collections::HashMap;

use colored::Color;

use super::style::{Style, StyleError};

/// Map from style name to style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    /// A theme with no entries; every lookup yields the empty style.
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Build a theme from `(name, definition)` pairs on top of the defaults.
    pub fn with_overrides<'a, I>(overrides: I) -> Result<Self, StyleError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut theme = Theme::default();
        theme.extend_parsed(overrides)?;
        Ok(theme)
    }

    /// Parse and insert style definitions, replacing existing names.
    pub fn extend_parsed<'a, I>(&mut self, overrides: I) -> Result<(), StyleError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, definition) in overrides {
            self.insert(name, Style::parse(definition)?);
        }
        Ok(())
    }

    pub fn insert(&mut self, name: impl Into<String>, style: Style) {
        self.styles.insert(name.into(), style);
    }

    /// Look up a style, falling back to the empty style.
    pub fn get(&self, name: &str) -> Style {
        self.styles.get(name).copied().unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Copy all entries of `other` into `self`.
    pub fn merge(&mut self, other: &Theme) {
        for (name, style) in &other.styles {
            self.styles.insert(name.clone(), *style);
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        let plain = Style::new();
        let entries = [
            ("log.time", plain.fg(Color::Cyan).dim()),
            ("log.message", plain),
            ("log.path", plain.dim()),
            ("log.level", plain),
            ("logging.keyword", plain.fg(Color::Yellow).bold()),
            ("logging.level.trace", plain.fg(Color::BrightBlack)),
            ("logging.level.debug", plain.fg(Color::Green)),
            ("logging.level.info", plain.fg(Color::Blue)),
            ("logging.level.success", plain.fg(Color::Green)),
            ("logging.level.warning", plain.fg(Color::Red)),
            ("logging.level.error", plain.fg(Color::Red).bold()),
            ("logging.level.critical", plain.fg(Color::Red).bold().underline()),
            ("repr.number", plain.fg(Color::Cyan).bold()),
            ("repr.str", plain.fg(Color::Green)),
            ("repr.bool_true", plain.fg(Color::BrightGreen).italic()),
            ("repr.bool_false", plain.fg(Color::BrightRed).italic()),
            ("repr.none", plain.fg(Color::Magenta).italic()),
            ("repr.url", plain.fg(Color::BrightBlue).underline()),
            ("repr.path", plain.fg(Color::Magenta)),
            ("repr.ipv4", plain.fg(Color::BrightGreen).bold()),
            ("repr.uuid", plain.fg(Color::BrightYellow)),
            ("repr.attrib_name", plain.fg(Color::Yellow)),
            ("repr.brace", plain.bold()),
            ("traceback.border", plain.fg(Color::Red)),
            ("traceback.title", plain.fg(Color::Red).bold()),
            ("traceback.location", plain.fg(Color::Magenta)),
            ("traceback.function", plain.fg(Color::Green)),
            ("traceback.lineno", plain.fg(Color::BrightBlack)),
            ("traceback.marker", plain.fg(Color::Red).bold()),
            ("traceback.error", plain.fg(Color::Red).bold()),
            ("traceback.message", plain),
            ("traceback.note", plain.dim()),
            ("traceback.suppressed", plain.dim()),
        ];

        let mut theme = Theme::empty();
        for (name, style) in entries {
            theme.insert(name, style);
        }
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_styles() {
        let theme = Theme::default();
        assert_eq!(
            theme.get("logging.level.success").foreground(),
            Some(Color::Green)
        );
        assert_eq!(
            theme.get("logging.level.trace").foreground(),
            Some(Color::BrightBlack)
        );
        assert!(theme.get("no.such.style").is_plain());
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let theme = Theme::with_overrides([("log.time", "magenta")]).unwrap();
        assert_eq!(theme.get("log.time").foreground(), Some(Color::Magenta));
        assert!(Theme::with_overrides([("log.time", "glitter")]).is_err());
    }
}
