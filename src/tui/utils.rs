//! Text helpers shared by every view: coloring, ANSI-aware width and padding.

use std::borrow::Cow;
use std::sync::OnceLock;

use crossterm::style::{Color, Stylize};
use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// Color `text`. The returned string ends with its own reset sequence so the
/// color never leaks past the fragment.
pub fn paint(text: &str, color: Color) -> String {
    text.with(color).to_string()
}

/// Bold variant of [`paint`].
pub fn paint_bold(text: &str, color: Color) -> String {
    text.with(color).bold().to_string()
}

fn ansi_escape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\x1B[@-_][0-?]*[ -/]*[@-~]").expect("static ANSI pattern is valid")
    })
}

/// Remove ANSI escape sequences.
pub fn strip_ansi(text: &str) -> String {
    ansi_escape().replace_all(text, "").into_owned()
}

/// Display width of `text` once escape sequences are removed.
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).width()
}

/// Replace control characters with spaces so a stored title cannot move
/// the cursor or upset width measurement.
pub fn printable(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Cut `text` to at most `width` display columns, measured the same way
/// `UnicodeWidthStr::width` measures the result.
pub fn truncate_to_width(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }
    let mut end = 0;
    for (idx, ch) in text.char_indices() {
        let next = idx + ch.len_utf8();
        if text[..next].width() > width {
            break;
        }
        end = next;
    }
    &text[..end]
}

/// Keep the last `width` display columns of `text`.
pub fn tail_to_width(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }
    let mut start = text.len();
    for (idx, _) in text.char_indices().rev() {
        if text[idx..].width() > width {
            break;
        }
        start = idx;
    }
    &text[start..]
}

/// Center plain `text` in a field of `width` columns; extra space goes right.
pub fn center(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let slack = width.saturating_sub(text.width());
    let left = slack / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(slack - left))
}
