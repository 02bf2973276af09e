//! Stack frames from `std::backtrace::Backtrace` output.
//!
//! The std format is:
//! ```text
//!    0: rust_begin_unwind
//!              at /rustc/.../library/std/src/panicking.rs:665:5
//!    1: demo::main
//!              at ./src/main.rs:4:5
//! ```
//! Inlined symbols repeat without an index.

use std::sync::LazyLock;

use regex::Regex;

static FRAME_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\d+:\s+)?(\S.*?)\s*$").expect("frame pattern is valid"));
static AT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*at\s+(.+?)\s*$").expect("location pattern is valid"));
static HASH_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"::h[0-9a-f]{16}$").expect("hash pattern is valid"));

const END_SHORT: &str = "__rust_end_short_backtrace";
const BEGIN_SHORT: &str = "__rust_begin_short_backtrace";

/// One entry of a call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub function: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl Frame {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            file: None,
            line: None,
            column: None,
        }
    }

    /// A frame pointing at `file:line[:column]`.
    pub fn at(function: impl Into<String>, location: &str) -> Self {
        let mut frame = Frame::new(function);
        if let Some((file, line, column)) = parse_location(location) {
            frame.file = Some(file);
            frame.line = Some(line);
            frame.column = column;
        }
        frame
    }

    /// Whether any of the `suppress` entries covers this frame. Entries with
    /// a path separator match file paths, others match module paths.
    pub fn is_suppressed(&self, suppress: &[String]) -> bool {
        suppress.iter().any(|entry| {
            if entry.contains(['/', '\\']) {
                self.file.as_deref().is_some_and(|file| file.contains(entry.as_str()))
            } else {
                self.function == *entry
                    || self
                        .function
                        .strip_prefix(entry.as_str())
                        .is_some_and(|rest| rest.starts_with("::"))
                    || self
                        .function
                        .strip_prefix('<')
                        .and_then(|f| f.strip_prefix(entry.as_str()))
                        .is_some_and(|rest| rest.starts_with("::"))
            }
        })
    }
}

/// Split `path:line[:column]`, keeping any colons inside the path.
pub fn parse_location(location: &str) -> Option<(String, u32, Option<u32>)> {
    let (rest, last) = location.rsplit_once(':')?;
    let last: u32 = last.trim().parse().ok()?;

    match rest.rsplit_once(':') {
        Some((file, line)) if !file.is_empty() => match line.trim().parse::<u32>() {
            Ok(line) => Some((file.to_string(), line, Some(last))),
            Err(_) => Some((rest.to_string(), last, None)),
        },
        _ => Some((rest.to_string(), last, None)),
    }
}

/// Parse the `Display` output of a std backtrace.
pub fn parse_backtrace(text: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(caps) = AT_LINE.captures(line) {
            if let Some(frame) = frames.last_mut() {
                if frame.file.is_none() {
                    let location = &caps[1];
                    if let Some((file, line, column)) = parse_location(location) {
                        frame.file = Some(file);
                        frame.line = Some(line);
                        frame.column = column;
                    }
                }
            }
            continue;
        }
        if let Some(caps) = FRAME_LINE.captures(line) {
            let function = HASH_SUFFIX.replace(&caps[1], "").into_owned();
            frames.push(Frame::new(function));
        }
    }

    frames
}

/// Drop the panic machinery above `__rust_end_short_backtrace` and the
/// runtime startup below `__rust_begin_short_backtrace`.
pub fn trim_short_backtrace(frames: Vec<Frame>) -> Vec<Frame> {
    let start = frames
        .iter()
        .position(|frame| frame.function.contains(END_SHORT))
        .map_or(0, |i| i + 1);
    let end = frames
        .iter()
        .skip(start)
        .position(|frame| frame.function.contains(BEGIN_SHORT))
        .map_or(frames.len(), |i| start + i);

    frames.into_iter().take(end).skip(start).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "   0: std::panicking::begin_panic_handler
             at /rustc/abc/library/std/src/panicking.rs:665:5
   1: std::sys::backtrace::__rust_end_short_backtrace
             at /rustc/abc/library/std/src/sys/backtrace.rs:168:18
   2: core::panicking::panic_fmt::h0123456789abcdef
             at /rustc/abc/library/core/src/panicking.rs:74:14
   3: demo::load
             at ./src/main.rs:12:5
   4: demo::main
             at ./src/main.rs:4:5
   5: std::sys::backtrace::__rust_begin_short_backtrace
             at /rustc/abc/library/std/src/sys/backtrace.rs:152:18
   6: std::rt::lang_start
";

    #[test]
    fn test_parse_backtrace() {
        let frames = parse_backtrace(SAMPLE);
        assert_eq!(frames.len(), 7);
        assert_eq!(frames[2].function, "core::panicking::panic_fmt");
        assert_eq!(frames[3].file.as_deref(), Some("./src/main.rs"));
        assert_eq!(frames[3].line, Some(12));
        assert_eq!(frames[3].column, Some(5));
        assert_eq!(frames[6].file, None);
    }

    #[test]
    fn test_trim_short_backtrace() {
        let frames = trim_short_backtrace(parse_backtrace(SAMPLE));
        let names: Vec<&str> = frames.iter().map(|f| f.function.as_str()).collect();
        assert_eq!(names, vec!["core::panicking::panic_fmt", "demo::load", "demo::main"]);
    }

    #[test]
    fn test_trim_without_markers_keeps_everything() {
        let frames = vec![Frame::new("a"), Frame::new("b")];
        assert_eq!(trim_short_backtrace(frames.clone()), frames);
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(
            parse_location("src/lib.rs:10:3"),
            Some(("src/lib.rs".into(), 10, Some(3)))
        );
        assert_eq!(
            parse_location("C:\\src\\lib.rs:10"),
            Some(("C:\\src\\lib.rs".into(), 10, None))
        );
        assert_eq!(parse_location("no location"), None);
    }

    #[test]
    fn test_suppression() {
        let suppress = vec!["core".to_string(), "/rustc/".to_string()];
        assert!(Frame::new("core::panicking::panic_fmt").is_suppressed(&suppress));
        assert!(!Frame::new("corelib::x").is_suppressed(&suppress));
        assert!(Frame::new("<core::x as Y>::f").is_suppressed(&suppress));
        assert!(Frame::at("std::x", "/rustc/abc/std.rs:1:1").is_suppressed(&suppress));
        assert!(!Frame::at("demo::main", "./src/main.rs:1:1").is_suppressed(&suppress));
    }
}
