//! The command line at the bottom of every view.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthStr;

use crate::tui::colors::RED;
use crate::tui::keys::Key;
use crate::tui::utils::{paint, printable, tail_to_width, truncate_to_width};

/// Characters accepted on the command line.
pub fn command_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, ' ' | '-' | '_')
}

/// Characters accepted in free-text task fields. Control characters are
/// refused even when Unicode classes them as whitespace.
pub fn text_char(c: char) -> bool {
    if c.is_control() {
        return false;
    }
    c.is_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '-' | '_' | '.' | '$' | '{' | '}' | '!' | '@' | '#' | '%' | '^' | '&' | '*' | '(' | ')')
}

/// Result of feeding one key to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The buffer changed (or a backspace hit an empty buffer).
    Edited,
    /// Enter was pressed; carries the buffer, which is now empty.
    Submitted(String),
    /// Not an editing key; the view decides what it means.
    Forward(Key),
}

/// An input buffer plus the one-line status/error message shown beside it.
#[derive(Debug, Clone)]
pub struct LineEditor {
    pub buffer: String,
    pub message: String,
    accept: fn(char) -> bool,
}

impl LineEditor {
    /// Create an empty command line.
    pub fn new() -> Self {
        Self::with_charset(command_char)
    }

    pub fn with_charset(accept: fn(char) -> bool) -> Self {
        LineEditor {
            buffer: String::new(),
            message: String::new(),
            accept,
        }
    }

    pub fn handle(&mut self, key: Key) -> EditOutcome {
        match key {
            Key::Char(c) if (self.accept)(c) => {
                self.buffer.push(c);
                self.message.clear();
                EditOutcome::Edited
            }
            Key::Backspace => {
                self.buffer.pop();
                self.message.clear();
                EditOutcome::Edited
            }
            Key::Enter => EditOutcome::Submitted(std::mem::take(&mut self.buffer)),
            other => EditOutcome::Forward(other),
        }
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    /// Prompt text `[<message> ]<mode> >> <buffer>`, clipped to `cols - 1`
    /// columns so writing it never wraps. The end of the buffer stays
    /// visible; the message is cut first.
    pub fn prompt_line(&self, mode: Option<&str>, cols: u16) -> String {
        let limit = usize::from(cols).saturating_sub(1);
        let mode = mode.map(|m| format!("{m} ")).unwrap_or_default();
        let head = truncate_to_width(&mode, limit);
        let head = format!("{head}{}", truncate_to_width(">> ", limit.saturating_sub(head.width())));
        let buffer = printable(&self.buffer);
        let input = format!("{head}{}", tail_to_width(&buffer, limit.saturating_sub(head.width())));

        let room = limit.saturating_sub(input.width());
        let message = if self.message.is_empty() || room == 0 {
            String::new()
        } else {
            let message = format!("{} ", printable(&self.message));
            paint(truncate_to_width(&message, room), RED)
        };
        format!("{message}{input}")
    }

    /// Draw the prompt over the last terminal row.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        mode: Option<&str>,
        cols: u16,
        rows: u16,
    ) -> io::Result<()> {
        queue!(out, MoveTo(0, rows.saturating_sub(1)), Clear(ClearType::CurrentLine))?;
        write!(out, "{}", self.prompt_line(mode, cols))?;
        out.flush()
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}
