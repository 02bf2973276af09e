//! Terminal output.
//!
//! # Responsibilities
//! - Own the output stream (stdout, stderr, or an in-memory buffer)
//! - Decide whether ANSI colors are emitted
//! - Know the render width
//! - Carry the theme used to resolve style names
//!
//! # Design Decisions
//! - A console is a cheap `Arc` handle; clones share the same stream lock
//! - Each record is written as one block under the lock, so lines from
//!   concurrent threads never interleave
//! - Write errors are swallowed: logging must not take the process down

pub mod capture;

use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::text::{Text, Theme};

pub use capture::Captured;

const DEFAULT_WIDTH: usize = 100;

/// When to emit ANSI escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colors when the stream is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

/// Output stream.
#[derive(Debug, Clone)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
    Buffer(Arc<Mutex<Vec<u8>>>),
}

impl ConsoleTarget {
    fn is_terminal(&self) -> bool {
        match self {
            ConsoleTarget::Stdout => io::stdout().is_terminal(),
            ConsoleTarget::Stderr => io::stderr().is_terminal(),
            ConsoleTarget::Buffer(_) => false,
        }
    }
}

#[derive(Debug)]
struct ConsoleInner {
    target: ConsoleTarget,
    width: usize,
    ansi: bool,
    theme: Theme,
    /// Shared with every console derived from this one.
    lock: Arc<Mutex<()>>,
}

/// A rendering target.
#[derive(Debug, Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

impl Console {
    pub fn builder() -> ConsoleBuilder {
        ConsoleBuilder::default()
    }

    /// A console on stderr with default settings.
    pub fn stderr() -> Self {
        Self::builder().build()
    }

    /// A colorless console writing to memory, and a handle to read it back.
    pub fn capture(width: usize) -> (Self, Captured) {
        Self::builder()
            .width(width)
            .color(ColorChoice::Never)
            .capture()
    }

    pub fn width(&self) -> usize {
        self.inner.width
    }

    pub fn is_ansi(&self) -> bool {
        self.inner.ansi
    }

    pub fn theme(&self) -> &Theme {
        &self.inner.theme
    }

    /// The same stream and settings with a different theme.
    pub fn with_theme(&self, theme: Theme) -> Self {
        Self {
            inner: Arc::new(ConsoleInner {
                target: self.inner.target.clone(),
                width: self.inner.width,
                ansi: self.inner.ansi,
                theme,
                lock: self.inner.lock.clone(),
            }),
        }
    }

    /// Render a text with this console's theme and color setting.
    pub fn render(&self, text: &Text) -> String {
        text.render(&self.inner.theme, self.inner.ansi)
    }

    /// Print one line.
    pub fn print(&self, text: &Text) {
        let mut line = self.render(text);
        line.push('\n');
        self.write_block(&line);
    }

    /// Write pre-rendered output atomically with respect to other writers.
    pub fn write_block(&self, block: &str) {
        let _guard = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let _ = match &self.inner.target {
            ConsoleTarget::Stdout => write_flush(&mut io::stdout().lock(), block),
            ConsoleTarget::Stderr => write_flush(&mut io::stderr().lock(), block),
            ConsoleTarget::Buffer(buffer) => {
                let mut buffer = buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                buffer.extend_from_slice(block.as_bytes());
                Ok(())
            }
        };
    }
}

fn write_flush(out: &mut impl Write, block: &str) -> io::Result<()> {
    out.write_all(block.as_bytes())?;
    out.flush()
}

/// Builder for [`Console`].
#[derive(Debug, Clone)]
pub struct ConsoleBuilder {
    target: ConsoleTarget,
    width: Option<usize>,
    color: ColorChoice,
    theme: Theme,
}

impl Default for ConsoleBuilder {
    fn default() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
            width: None,
            color: ColorChoice::Auto,
            theme: Theme::default(),
        }
    }
}

impl ConsoleBuilder {
    pub fn target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn build(self) -> Console {
        let ansi = match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && self.target.is_terminal()
            }
        };
        let width = self.width.unwrap_or_else(detect_width).max(20);

        Console {
            inner: Arc::new(ConsoleInner {
                target: self.target,
                width,
                ansi,
                theme: self.theme,
                lock: Arc::new(Mutex::new(())),
            }),
        }
    }

    /// Build a console that writes into memory.
    pub fn capture(self) -> (Console, Captured) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let console = self.target(ConsoleTarget::Buffer(buffer.clone())).build();
        (console, Captured::new(buffer))
    }
}

fn detect_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|columns| columns.trim().parse::<usize>().ok())
        .filter(|&columns| columns > 0)
        .unwrap_or(DEFAULT_WIDTH)
}
