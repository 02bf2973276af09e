//! Terminal styles.
//!
//! # Responsibilities
//! - Parse style definitions such as `"bold red on white"` or `"#ff8800 italic"`
//! - Combine styles (right-hand side wins per attribute)
//! - Emit ANSI SGR sequences
//!
//! # Design Decisions
//! - Colors reuse `colored::Color` so codes come from one place
//! - Attributes are tri-state (set, unset, inherit) via two bitmasks
//! - SGR codes are written directly instead of going through `ColoredString`,
//!   whose output depends on process-wide tty detection. The console decides.

use colored::Color;
use thiserror::Error;

const BOLD: u8 = 1;
const DIM: u8 = 1 << 1;
const ITALIC: u8 = 1 << 2;
const UNDERLINE: u8 = 1 << 3;
const BLINK: u8 = 1 << 4;
const REVERSE: u8 = 1 << 5;
const STRIKE: u8 = 1 << 6;
const HIDDEN: u8 = 1 << 7;

const ATTRIBUTE_CODES: [(u8, &str); 8] = [
    (BOLD, "1"),
    (DIM, "2"),
    (ITALIC, "3"),
    (UNDERLINE, "4"),
    (BLINK, "5"),
    (REVERSE, "7"),
    (HIDDEN, "8"),
    (STRIKE, "9"),
];

/// Error produced when a style definition cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("unknown color or attribute '{0}'")]
    UnknownToken(String),

    #[error("expected a color after 'on'")]
    MissingBackground,

    #[error("expected an attribute after 'not'")]
    MissingAttribute,

    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
}

/// A foreground/background color pair plus text attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    fg: Option<Color>,
    bg: Option<Color>,
    on: u8,
    off: u8,
}

impl Style {
    /// An empty style that leaves text untouched.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            on: 0,
            off: 0,
        }
    }

    /// Parse a style definition.
    ///
    /// Accepts color names (`red`, `bright_black`), hex colors (`#rrggbb`),
    /// attributes (`bold`, `dim`, `italic`, `underline`, `blink`, `reverse`,
    /// `strike`, `hidden`), `on <color>` for the background, `not <attribute>`
    /// to clear an attribute, and `none` for the empty style.
    pub fn parse(definition: &str) -> Result<Self, StyleError> {
        let mut style = Style::new();
        let mut words = definition.split_whitespace();

        while let Some(word) = words.next() {
            let word = word.to_ascii_lowercase();
            match word.as_str() {
                "none" | "default" => {}
                "on" => {
                    let color = words.next().ok_or(StyleError::MissingBackground)?;
                    style.bg = Some(parse_color(color)?);
                }
                "not" => {
                    let attr = words.next().ok_or(StyleError::MissingAttribute)?;
                    let bit = attribute_bit(&attr.to_ascii_lowercase())
                        .ok_or_else(|| StyleError::UnknownToken(attr.to_string()))?;
                    style.off |= bit;
                    style.on &= !bit;
                }
                other => {
                    if let Some(bit) = attribute_bit(other) {
                        style.on |= bit;
                        style.off &= !bit;
                    } else {
                        style.fg = Some(parse_color(other)?);
                    }
                }
            }
        }

        Ok(style)
    }

    /// Set the foreground color.
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    pub fn on(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(self) -> Self {
        self.with(BOLD)
    }

    pub fn dim(self) -> Self {
        self.with(DIM)
    }

    pub fn italic(self) -> Self {
        self.with(ITALIC)
    }

    pub fn underline(self) -> Self {
        self.with(UNDERLINE)
    }

    fn with(mut self, bit: u8) -> Self {
        self.on |= bit;
        self.off &= !bit;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.on & BOLD != 0
    }

    pub fn foreground(&self) -> Option<Color> {
        self.fg
    }

    pub fn background(&self) -> Option<Color> {
        self.bg
    }

    /// True when painting with this style would emit nothing.
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.on == 0
    }

    /// Layer `other` on top of `self`.
    pub fn combine(&self, other: &Style) -> Style {
        Style {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            on: (self.on & !other.off) | other.on,
            off: (self.off & !other.on) | other.off,
        }
    }

    /// The SGR parameter list for this style, e.g. `1;31`.
    pub fn sgr(&self) -> Option<String> {
        if self.is_plain() {
            return None;
        }

        let mut codes: Vec<String> = ATTRIBUTE_CODES
            .iter()
            .filter(|(bit, _)| self.on & bit != 0)
            .map(|(_, code)| (*code).to_string())
            .collect();
        if let Some(fg) = self.fg {
            codes.push(fg.to_fg_str().into_owned());
        }
        if let Some(bg) = self.bg {
            codes.push(bg.to_bg_str().into_owned());
        }

        Some(codes.join(";"))
    }

    /// Render `text` with this style. Returns the input unchanged when `ansi`
    /// is off or the style is empty.
    pub fn paint(&self, text: &str, ansi: bool) -> String {
        match self.sgr() {
            Some(sgr) if ansi && !text.is_empty() => format!("\x1b[{sgr}m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    }
}

impl std::str::FromStr for Style {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::parse(s)
    }
}

fn attribute_bit(word: &str) -> Option<u8> {
    let bit = match word {
        "bold" | "b" => BOLD,
        "dim" | "d" => DIM,
        "italic" | "i" => ITALIC,
        "underline" | "u" => UNDERLINE,
        "blink" => BLINK,
        "reverse" | "r" => REVERSE,
        "strike" | "s" => STRIKE,
        "conceal" | "hidden" => HIDDEN,
        _ => return None,
    };
    Some(bit)
}

/// Parse a single color token.
pub fn parse_color(token: &str) -> Result<Color, StyleError> {
    let token = token.to_ascii_lowercase();

    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| StyleError::InvalidHex(token.clone()));
    }

    let color = match token.replace(['_', ' '], "").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "brightblack" | "grey" | "gray" => Color::BrightBlack,
        "brightred" => Color::BrightRed,
        "brightgreen" => Color::BrightGreen,
        "brightyellow" => Color::BrightYellow,
        "brightblue" => Color::BrightBlue,
        "brightmagenta" | "brightpurple" => Color::BrightMagenta,
        "brightcyan" => Color::BrightCyan,
        "brightwhite" => Color::BrightWhite,
        _ => return Err(StyleError::UnknownToken(token)),
    };

    Ok(color)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::TrueColor {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}
