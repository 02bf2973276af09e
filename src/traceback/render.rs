//! Traceback layout.
//!
//! ```text
//! ╭──────────── Traceback (most recent call last) ────────────╮
//! │ ./src/main.rs:4 in demo::main                              │
//! │                                                            │
//! │    3 │ fn main() {                                         │
//! │ ❱  4 │     load();                                         │
//! │    5 │ }                                                   │
//! ╰────────────────────────────────────────────────────────────╯
//! panicked at src/main.rs:12:5:
//! boom
//! ```

use std::fs;

use super::{Frame, Traceback, TracebackOptions};
use crate::text::highlighter::{Highlighter, RustHighlighter};
use crate::text::{StyleRef, Text};

const TITLE: &str = "Traceback (most recent call last)";

/// Render a traceback into lines no wider than `width`.
pub fn render(traceback: &Traceback, options: &TracebackOptions, width: usize) -> Vec<Text> {
    let mut lines = Vec::new();

    if !traceback.frames.is_empty() {
        let mut body: Vec<Row> = Vec::new();
        // Oldest call first.
        let frames: Vec<&Frame> = traceback.frames.iter().rev().collect();
        let (head, hidden, tail) = split_frames(&frames, options.max_frames);

        for (i, frame) in head.iter().enumerate() {
            if i > 0 {
                body.push(Row::blank());
            }
            render_frame(frame, options, &mut body);
        }
        if hidden > 0 {
            body.push(Row::blank());
            body.push(Row::new(Text::styled(
                format!("... {hidden} frames hidden ..."),
                StyleRef::Named("traceback.suppressed".into()),
            )));
        }
        for frame in tail {
            body.push(Row::blank());
            render_frame(frame, options, &mut body);
        }

        lines.extend(boxed(body, TITLE, width));
    }

    lines.extend(traceback.summary());
    lines
}

fn split_frames<'a>(
    frames: &'a [&'a Frame],
    max_frames: usize,
) -> (&'a [&'a Frame], usize, &'a [&'a Frame]) {
    if max_frames == 0 || frames.len() <= max_frames {
        return (frames, 0, &[]);
    }
    let keep_head = max_frames.div_ceil(2);
    let keep_tail = max_frames / 2;
    let hidden = frames.len() - keep_head - keep_tail;
    (
        &frames[..keep_head],
        hidden,
        &frames[frames.len() - keep_tail..],
    )
}

/// A line of the box body. Wrapped continuations start `hang` columns in.
struct Row {
    text: Text,
    hang: usize,
}

impl Row {
    fn new(text: Text) -> Self {
        Self { text, hang: 0 }
    }

    fn blank() -> Self {
        Self::new(Text::new(""))
    }

    fn wrap(&self, width: usize) -> Vec<Text> {
        if self.hang == 0 || self.hang >= width {
            return self.text.wrap(width);
        }
        let split = self
            .text
            .plain()
            .char_indices()
            .nth(self.hang)
            .map_or(self.text.len(), |(i, _)| i);
        let gutter = self.text.slice(0..split);
        let code = self.text.slice(split..self.text.len());

        code.wrap(width - self.hang)
            .into_iter()
            .enumerate()
            .map(|(i, piece)| {
                let mut line = if i == 0 {
                    gutter.clone()
                } else {
                    Text::new(" ".repeat(self.hang))
                };
                line.append_text(&piece);
                line
            })
            .collect()
    }
}

fn render_frame(frame: &Frame, options: &TracebackOptions, out: &mut Vec<Row>) {
    let suppressed = frame.is_suppressed(&options.suppress);

    let mut header = Text::new("");
    if let Some(file) = &frame.file {
        let location = match frame.line {
            Some(line) => format!("{file}:{line}"),
            None => file.clone(),
        };
        header.append(&location, Some(StyleRef::Named("traceback.location".into())));
        header.append(" in ", None);
    } else {
        header.append("in ", None);
    }
    header.append(&frame.function, Some(StyleRef::Named("traceback.function".into())));
    if suppressed {
        header.stylize_before(StyleRef::Named("traceback.suppressed".into()));
    }
    out.push(Row::new(header));

    if suppressed {
        return;
    }
    if let (Some(file), Some(line)) = (&frame.file, frame.line) {
        if let Some((context, gutter)) = source_context(file, line as usize, options.extra_lines) {
            out.push(Row::blank());
            out.extend(context.into_iter().map(|text| Row { text, hang: gutter }));
        }
    }
}

/// Numbered source lines around `line` and the width of their gutter, or
/// `None` when the file can't be read.
pub fn source_context(file: &str, line: usize, extra: usize) -> Option<(Vec<Text>, usize)> {
    let source = fs::read_to_string(file).ok()?;
    let all: Vec<&str> = source.lines().collect();
    if line == 0 || line > all.len() {
        return None;
    }

    let first = line.saturating_sub(extra).max(1);
    let last = (line + extra).min(all.len());
    let number_width = last.to_string().len();

    let lines = (first..=last)
        .map(|no| {
            let is_target = no == line;
            let mut text = Text::new("");
            if is_target {
                text.append("❱ ", Some(StyleRef::Named("traceback.marker".into())));
            } else {
                text.append("  ", None);
            }
            text.append(
                &format!("{no:>number_width$} │ "),
                Some(StyleRef::Named("traceback.lineno".into())),
            );
            let code = RustHighlighter.highlight(Text::new(all[no - 1].replace('\t', "    ")));
            text.append_text(&code);
            text
        })
        .collect();

    // "❱ " + number + " │ "
    Some((lines, number_width + 5))
}

/// Frame `body` in a rounded box with `title` centred in the top border.
fn boxed(body: Vec<Row>, title: &str, width: usize) -> Vec<Text> {
    let width = width.max(title.chars().count() + 8);
    let inner = width - 4;
    let border = || Some(StyleRef::Named("traceback.border".into()));

    let fill = width - 2 - title.chars().count() - 2;
    let left = fill / 2;
    let right = fill - left;

    let mut top = Text::new("");
    top.append(&format!("╭{} ", "─".repeat(left)), border());
    top.append(title, Some(StyleRef::Named("traceback.title".into())));
    top.append(&format!(" {}╮", "─".repeat(right)), border());

    let mut lines = vec![top];
    for row in body {
        for piece in row.wrap(inner) {
            let mut row = Text::new("");
            row.append("│ ", border());
            row.append_text(&piece.fit(inner));
            row.append(" │", border());
            lines.push(row);
        }
    }

    let mut bottom = Text::new("");
    bottom.append(&format!("╰{}╯", "─".repeat(width - 2)), border());
    lines.push(bottom);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_box_lines_have_equal_width() {
        let tb = Traceback::from_panic("boom", Some("missing/file.rs:3:1"), Some(""), None);
        let lines = render(&tb, &TracebackOptions::default(), 60);
        let boxed: Vec<&Text> = lines.iter().take_while(|l| !l.plain().starts_with("panicked")).collect();
        assert!(boxed[0].plain().contains(TITLE));
        for line in &boxed {
            assert_eq!(line.width(), 60, "{:?}", line.plain());
        }
        assert!(boxed[1].plain().contains("missing/file.rs:3 in <panic location>"));
    }

    #[test]
    fn test_source_context_marks_target_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fn a() {{}}\nfn b() {{}}\nfn c() {{\n    panic!(\"x\");\n}}\nfn d() {{}}").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let (lines, gutter) = source_context(&path, 4, 1).unwrap();
        assert_eq!(gutter, 6);
        let plain: Vec<&str> = lines.iter().map(Text::plain).collect();
        assert_eq!(
            plain,
            vec!["  3 │ fn c() {", "❱ 4 │     panic!(\"x\");", "  5 │ }"]
        );
        assert!(source_context(&path, 99, 1).is_none());
    }

    #[test]
    fn test_suppressed_frames_have_no_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "line one").unwrap();
        let location = format!("{}:1:1", file.path().display());

        let mut tb = Traceback::from_panic("boom", Some(&location), Some(""), None);
        tb.frames[0].function = "tokio::runtime::run".into();
        let options = TracebackOptions {
            suppress: vec!["tokio".into()],
            ..TracebackOptions::default()
        };
        let lines = render(&tb, &options, 80);
        assert!(!lines.iter().any(|l| l.plain().contains("line one")));

        let lines = render(&tb, &TracebackOptions::default(), 80);
        assert!(lines.iter().any(|l| l.plain().contains("line one")));
    }

    #[test]
    fn test_wrapped_source_stays_right_of_the_gutter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "let value = compute(first_argument, second_argument, third_argument);"
        )
        .unwrap();
        let location = format!("{}:1:1", file.path().display());

        let tb = Traceback::from_panic("boom", Some(&location), Some(""), None);
        let lines = render(&tb, &TracebackOptions::default(), 44);
        let plain: Vec<&str> = lines.iter().map(Text::plain).collect();

        let first = plain.iter().position(|l| l.contains("❱ 1 │ let value")).unwrap();
        let continued = &plain[first + 1..first + 3];
        for line in continued {
            assert!(line.starts_with(&format!("│ {}", " ".repeat(6))), "{line:?}");
            assert!(line.contains("argument"), "{line:?}");
            assert_eq!(line.chars().count(), 44);
        }
    }

    #[test]
    fn test_long_stacks_are_elided() {
        let mut tb = Traceback::from_error(&["bad".to_string()], None);
        tb.frames = (0..10).map(|i| Frame::new(format!("f{i}"))).collect();
        let options = TracebackOptions {
            max_frames: 4,
            ..TracebackOptions::default()
        };
        let lines = render(&tb, &options, 80);
        assert!(lines.iter().any(|l| l.plain().contains("... 6 frames hidden ...")));
        assert!(lines.iter().any(|l| l.plain().contains("in f9")));
        assert!(!lines.iter().any(|l| l.plain().contains("in f5")));
    }
}
