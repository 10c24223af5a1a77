//! Boxed three-column board rendering.
//!
//! [`board_lines`] is pure: the same view, title and geometry always give
//! the same lines. [`write_frame`] puts a finished frame on screen with a
//! single write.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Color;
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthStr;

use crate::project::BoardView;
use crate::task::TaskSummary;
use crate::tui::colors::{BRIGHT_BLUE, GREEN, GREY, ORANGE, RED};
use crate::tui::geometry::BoardGeometry;
use crate::tui::utils::{center, paint, paint_bold, printable, truncate_to_width};

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStyle {
    pub min_col_width: usize,
    /// Rows left free under the board for the command line.
    pub reserve_rows: usize,
    pub clear_screen: bool,
}

impl Default for BoardStyle {
    fn default() -> Self {
        BoardStyle {
            min_col_width: 15,
            reserve_rows: 2,
            clear_screen: true,
        }
    }
}

fn rule(widths: &[usize; 3], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|&w| "─".repeat(w)).collect();
    let line = format!("{left}{}{right}", segments.join(&mid.to_string()));
    paint(&line, GREY)
}

fn row(cells: &[String]) -> String {
    let bar = paint("│", GREY);
    format!("{bar}{}{bar}", cells.join(&bar))
}

/// Word-wrap every task label of a column to `width`.
fn wrap_column(tasks: &[TaskSummary], width: usize) -> Vec<String> {
    let options = textwrap::Options::new(width).break_words(true);
    let mut lines = Vec::new();
    for task in tasks {
        let label = task.label();
        let label = printable(&label);
        let wrapped = textwrap::wrap(&label, &options);
        if wrapped.is_empty() {
            lines.push(String::new());
        }
        lines.extend(wrapped.into_iter().map(|l| l.into_owned()));
    }
    lines
}

/// Color a fragment and pad it to `width`. The padding sits after the
/// fragment's reset so it is never colored.
fn cell(fragment: &str, width: usize, color: Color) -> String {
    let fragment = truncate_to_width(fragment, width);
    let padding = " ".repeat(width.saturating_sub(fragment.width()));
    if fragment.is_empty() {
        padding
    } else {
        format!("{}{padding}", paint(fragment, color))
    }
}

/// Build every line of the board frame.
pub fn board_lines(
    view: &BoardView,
    title: &str,
    geometry: &BoardGeometry,
    style: &BoardStyle,
) -> Vec<String> {
    let widths = &geometry.col_widths;
    let columns: [(&str, &[TaskSummary], Color); 3] = [
        ("Todo", &view.todo, BRIGHT_BLUE),
        ("Doing", &view.doing, ORANGE),
        ("Done", &view.done, GREEN),
    ];

    let mut lines = Vec::new();

    if !title.is_empty() {
        lines.push(paint_bold(&center(&printable(title), geometry.board_width()), RED));
    }
    lines.push(rule(widths, '┌', '┬', '┐'));

    let header: Vec<String> = columns
        .iter()
        .zip(widths)
        .map(|((name, _, color), &w)| paint(&center(name, w), *color))
        .collect();
    lines.push(row(&header));
    lines.push(rule(widths, '├', '┼', '┤'));

    let wrapped: Vec<Vec<String>> = columns
        .iter()
        .zip(widths)
        .map(|((_, tasks, _), &w)| wrap_column(tasks, w))
        .collect();
    let task_rows = wrapped.iter().map(Vec::len).max().unwrap_or(0);
    for i in 0..task_rows {
        let cells: Vec<String> = columns
            .iter()
            .zip(widths)
            .zip(&wrapped)
            .map(|(((_, _, color), &w), col)| {
                cell(col.get(i).map(String::as_str).unwrap_or(""), w, *color)
            })
            .collect();
        lines.push(row(&cells));
    }

    // Pad so the bottom border lands just above the reserved rows.
    let pad = geometry
        .rows
        .saturating_sub(style.reserve_rows + lines.len() + 1);
    let blank: Vec<String> = widths.iter().map(|&w| " ".repeat(w)).collect();
    let empty_row = row(&blank);
    lines.extend(std::iter::repeat(empty_row).take(pad));

    lines.push(rule(widths, '└', '┴', '┘'));
    lines
}

/// Write a frame in one go, optionally clearing the screen first.
pub fn write_frame<W: Write>(out: &mut W, lines: &[String], clear: bool) -> io::Result<()> {
    let mut frame = Vec::new();
    if clear {
        queue!(frame, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    frame.extend_from_slice(lines.join("\n").as_bytes());
    out.write_all(&frame)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::utils::{strip_ansi, visible_width};
    use pretty_assertions::assert_eq;

    fn summary(id: u64, title: &str) -> TaskSummary {
        TaskSummary {
            id,
            title: title.into(),
        }
    }

    fn plain(lines: &[String]) -> Vec<String> {
        lines.iter().map(|l| strip_ansi(l)).collect()
    }

    #[test]
    fn test_empty_board_has_borders_header_and_padding() {
        let g = BoardGeometry::compute(49, 12, 15);
        let lines = board_lines(&BoardView::default(), "", &g, &BoardStyle::default());
        let expected_blank = format!("│{0}│{0}│{0}│", " ".repeat(15));
        let rule = "─".repeat(15);
        assert_eq!(
            plain(&lines),
            vec![
                format!("┌{rule}┬{rule}┬{rule}┐"),
                format!("│{}│{}│{}│", center("Todo", 15), center("Doing", 15), center("Done", 15)),
                format!("├{rule}┼{rule}┼{rule}┤"),
                expected_blank.clone(),
                expected_blank.clone(),
                expected_blank.clone(),
                expected_blank.clone(),
                expected_blank.clone(),
                expected_blank,
                format!("└{rule}┴{rule}┴{rule}┘"),
            ]
        );
        // rows - reserve_rows
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_task_lands_in_its_column() {
        let g = BoardGeometry::compute(100, 10, 15);
        assert_eq!(g.col_widths, [32, 32, 32]);
        let view = BoardView {
            doing: vec![summary(0, "Task Title 1")],
            ..Default::default()
        };
        let lines = plain(&board_lines(&view, "kb", &g, &BoardStyle::default()));
        assert_eq!(lines[0].trim(), "kb");
        assert_eq!(
            lines[4],
            format!("│{}│{:<32}│{}│", " ".repeat(32), "[0] Task Title 1", " ".repeat(32))
        );
    }

    #[test]
    fn test_long_titles_wrap_within_column() {
        let g = BoardGeometry::compute(49, 20, 15);
        let view = BoardView {
            todo: vec![summary(3, "a fairly long task title that wraps")],
            ..Default::default()
        };
        let lines = board_lines(&view, "proj", &g, &BoardStyle::default());
        let width = g.board_width();
        for line in &lines[1..] {
            assert_eq!(visible_width(line), width, "{line:?}");
        }
        let todo_cells: Vec<String> = plain(&lines)
            .iter()
            .skip(4)
            .map(|l| l.split('│').nth(1).unwrap_or("").trim_end().to_string())
            .take_while(|c| !c.is_empty())
            .collect();
        assert_eq!(todo_cells.join(" "), "[3] a fairly long task title that wraps");
        assert!(todo_cells.len() > 1);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let g = BoardGeometry::compute(100, 30, 15);
        let view = BoardView {
            todo: vec![summary(1, "one"), summary(2, "two")],
            doing: vec![summary(3, "three")],
            done: vec![summary(4, "four")],
        };
        let style = BoardStyle::default();
        assert_eq!(board_lines(&view, "t", &g, &style), board_lines(&view, "t", &g, &style));
    }

    #[test]
    fn test_colored_fragments_are_reset_before_padding() {
        let frag = cell("[1] x", 10, GREEN);
        assert_eq!(strip_ansi(&frag), "[1] x     ");
        if frag.contains("\x1b[38") {
            assert!(frag.ends_with("\x1b[39m     "), "{frag:?}");
        }
        assert_eq!(cell("", 4, GREEN), "    ");
    }

    #[test]
    fn test_control_characters_keep_columns_aligned() {
        let g = BoardGeometry::compute(49, 12, 15);
        let view = BoardView {
            todo: vec![summary(1, &"\u{7}".repeat(30))],
            doing: vec![summary(2, &format!("a{}b", "\u{85}".repeat(20)))],
            ..Default::default()
        };
        let lines = board_lines(&view, "bell\u{7}", &g, &BoardStyle::default());
        for line in &lines[1..] {
            assert_eq!(visible_width(line), g.board_width(), "{line:?}");
            assert!(!line.chars().any(|c| c.is_control() && c != '\x1b'), "{line:?}");
        }
        assert!(cell("\u{7}\u{7}\u{7}", 2, GREEN).len() >= 2);
    }

    #[test]
    fn test_no_padding_when_tasks_overflow_terminal() {
        let g = BoardGeometry::compute(49, 6, 15);
        let view = BoardView {
            todo: (0..10).map(|i| summary(i, "t")).collect(),
            ..Default::default()
        };
        let lines = board_lines(&view, "", &g, &BoardStyle::default());
        assert_eq!(lines.len(), 3 + 10 + 1);
    }

    #[test]
    fn test_write_frame_clears_then_writes_once() {
        let mut out = Vec::new();
        write_frame(&mut out, &["a".to_string(), "b".to_string()], true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[2J"));
        assert!(text.ends_with("a\nb"));

        let mut out = Vec::new();
        write_frame(&mut out, &["a".to_string()], false).unwrap();
        assert_eq!(out, b"a");
    }
}
