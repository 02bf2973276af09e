//! Console markup.
//!
//! `"[bold red]alert[/bold red] [log.time]12:00[/]"` becomes a [`Text`] with
//! two styled spans.
//!
//! - `[style]` opens a style, `[/style]` closes the innermost matching tag,
//!   `[/]` closes the innermost open tag
//! - `\[` is a literal bracket
//! - brackets whose contents cannot be a tag (`[1, 2]`, `[]`) stay literal
//! - tags still open at the end of the input close there

use thiserror::Error;

use super::{StyleRef, Text};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("closing tag '[/{tag}]' at position {position} doesn't match any open tag")]
    UnmatchedClose { tag: String, position: usize },

    #[error("closing tag '[/]' at position {0} has nothing to close")]
    NothingToClose(usize),
}

struct OpenTag {
    name: String,
    start: usize,
}

/// Parse markup into styled text.
pub fn parse(markup: &str) -> Result<Text, MarkupError> {
    let mut text = Text::new("");
    let mut plain = String::with_capacity(markup.len());
    let mut stack: Vec<OpenTag> = Vec::new();
    let mut closed: Vec<(usize, usize, String)> = Vec::new();

    let mut rest = markup;
    let mut position = 0;

    while let Some(idx) = rest.find(['[', '\\']) {
        plain.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        if let Some(after) = tail.strip_prefix("\\[") {
            plain.push('[');
            position += idx + 2;
            rest = after;
            continue;
        }
        if tail.starts_with('\\') {
            plain.push('\\');
            position += idx + 1;
            rest = &tail[1..];
            continue;
        }

        let Some(close) = tail.find(']') else {
            plain.push_str(tail);
            rest = "";
            break;
        };
        let content = &tail[1..close];

        if !is_tag(content) {
            plain.push('[');
            position += idx + 1;
            rest = &tail[1..];
            continue;
        }

        let tag_position = position + idx;
        if let Some(name) = content.strip_prefix('/') {
            let name = name.trim();
            let open = if name.is_empty() {
                stack.pop().ok_or(MarkupError::NothingToClose(tag_position))?
            } else {
                let normalized = normalize(name);
                let found = stack
                    .iter()
                    .rposition(|tag| tag.name == normalized)
                    .ok_or_else(|| MarkupError::UnmatchedClose {
                        tag: name.to_string(),
                        position: tag_position,
                    })?;
                stack.remove(found)
            };
            closed.push((open.start, plain.len(), open.name));
        } else {
            stack.push(OpenTag {
                name: normalize(content),
                start: plain.len(),
            });
        }

        position += idx + close + 1;
        rest = &tail[close + 1..];
    }
    plain.push_str(rest);

    let end = plain.len();
    closed.extend(stack.into_iter().map(|tag| (tag.start, end, tag.name)));
    // Outer tags are applied first so inner ones override them.
    closed.sort_by_key(|(start, _, _)| *start);

    text.append(&plain, None);
    for (start, stop, name) in closed {
        text.stylize(start..stop, StyleRef::from(name.as_str()));
    }
    Ok(text)
}

/// Escape `[` so the string renders literally when parsed as markup.
pub fn escape(raw: &str) -> String {
    raw.replace('[', "\\[")
}

fn is_tag(content: &str) -> bool {
    let Some(first) = content.chars().next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || matches!(first, '/' | '#' | '@'))
        && !content.contains('[')
        && !content.contains('\n')
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{Style, Theme};

    #[test]
    fn test_parse_tags() {
        let text = parse("[bold red]alert[/bold red] done").unwrap();
        assert_eq!(text.plain(), "alert done");
        assert_eq!(
            text.render(&Theme::empty(), true),
            format!("{} done", Style::parse("bold red").unwrap().paint("alert", true))
        );
    }

    #[test]
    fn test_implicit_close_and_bare_close() {
        let text = parse("[green]a[/] b [blue]c").unwrap();
        assert_eq!(text.plain(), "a b c");
        let rendered = text.render(&Theme::empty(), true);
        assert!(rendered.contains("\x1b[32ma\x1b[0m"));
        assert!(rendered.contains("\x1b[34mc\x1b[0m"));
    }

    #[test]
    fn test_literal_brackets() {
        assert_eq!(parse("list [1, 2]").unwrap().plain(), "list [1, 2]");
        assert_eq!(parse("\\[red] raw").unwrap().plain(), "[red] raw");
        assert_eq!(parse("open [ bracket").unwrap().plain(), "open [ bracket");
        assert_eq!(escape("[x]"), "\\[x]");
    }

    #[test]
    fn test_unmatched_close_is_error() {
        assert_eq!(
            parse("a[/red]"),
            Err(MarkupError::UnmatchedClose {
                tag: "red".into(),
                position: 1
            })
        );
        assert_eq!(parse("[/]"), Err(MarkupError::NothingToClose(0)));
    }

    #[test]
    fn test_theme_names_in_tags() {
        let text = parse("[log.time]now[/log.time]").unwrap();
        let mut theme = Theme::empty();
        theme.insert("log.time", Style::parse("cyan").unwrap());
        assert_eq!(text.render(&theme, true), "\x1b[36mnow\x1b[0m");
    }
}
