//! Single-keypress input and the terminal the views draw on.
//!
//! The terminal stays in cooked mode while a frame is drawn and is switched
//! to raw mode only for the one blocking read that follows. `RawModeGuard`
//! restores the previous mode when dropped, so every exit path out of the
//! read (including a panic) leaves the user's terminal usable.

use std::io::{self, Stdout, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::{debug, warn};

use crate::tui::geometry::FALLBACK_SIZE;

/// A decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Escape,
    /// Ctrl+C. Exits from every view.
    Interrupt,
    /// The window changed size; the view only needs a redraw.
    Resize,
    Other,
}

impl From<KeyEvent> for Key {
    fn from(ev: KeyEvent) -> Self {
        let ctrl = ev.modifiers.contains(KeyModifiers::CONTROL);
        match ev.code {
            KeyCode::Char('c') | KeyCode::Char('C') if ctrl => Key::Interrupt,
            // Some terminals send ^H for backspace.
            KeyCode::Char('h') if ctrl => Key::Backspace,
            KeyCode::Char(_) if ctrl => Key::Other,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Esc => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Raw mode held for the lifetime of the guard.
pub struct RawModeGuard {
    was_raw: bool,
}

impl RawModeGuard {
    pub fn acquire() -> io::Result<Self> {
        let was_raw = terminal::is_raw_mode_enabled()?;
        if !was_raw {
            terminal::enable_raw_mode()?;
        }
        Ok(RawModeGuard { was_raw })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if !self.was_raw {
            if let Err(e) = terminal::disable_raw_mode() {
                warn!("Failed to restore terminal mode: {e}");
            }
        }
    }
}

/// What the interaction loop needs from a terminal: somewhere to write
/// frames, the current size and a blocking key read.
pub trait Terminal: Write {
    /// Current `(columns, rows)`.
    fn size(&self) -> (u16, u16);

    /// Block until one key arrives.
    fn read_key(&mut self) -> io::Result<Key>;
}

/// The process's real terminal.
pub struct StdTerminal {
    out: Stdout,
}

impl StdTerminal {
    pub fn new() -> Self {
        StdTerminal { out: io::stdout() }
    }
}

impl Default for StdTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for StdTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Terminal for StdTerminal {
    fn size(&self) -> (u16, u16) {
        match terminal::size() {
            Ok((cols, rows)) if cols > 0 && rows > 0 => (cols, rows),
            Ok(_) => FALLBACK_SIZE,
            Err(e) => {
                debug!("Terminal size unavailable ({e}); using {FALLBACK_SIZE:?}");
                FALLBACK_SIZE
            }
        }
    }

    fn read_key(&mut self) -> io::Result<Key> {
        let _raw = RawModeGuard::acquire()?;
        loop {
            match event::read()? {
                Event::Key(ev) if ev.kind != KeyEventKind::Release => {
                    let key = Key::from(ev);
                    debug!("Key {:?} -> {key:?}", ev.code);
                    return Ok(key);
                }
                Event::Resize(..) => return Ok(Key::Resize),
                _ => {}
            }
        }
    }
}

/// A terminal fed from a fixed key script, for driving views in tests.
///
/// Once the script runs dry every read returns `Key::Interrupt`, which ends
/// any interaction loop.
#[cfg(test)]
pub struct ScriptedTerminal {
    pub keys: std::collections::VecDeque<Key>,
    pub output: Vec<u8>,
    pub size: (u16, u16),
}

#[cfg(test)]
impl ScriptedTerminal {
    pub fn new(size: (u16, u16)) -> Self {
        ScriptedTerminal {
            keys: Default::default(),
            output: Vec::new(),
            size,
        }
    }

    /// Queue every character of `text` followed by Enter.
    pub fn type_line(&mut self, text: &str) -> &mut Self {
        self.keys.extend(text.chars().map(Key::Char));
        self.keys.push_back(Key::Enter);
        self
    }

    pub fn press(&mut self, key: Key) -> &mut Self {
        self.keys.push_back(key);
        self
    }

    /// The last non-blank frame drawn, with escape sequences removed.
    pub fn last_frame(&self) -> String {
        let text = String::from_utf8_lossy(&self.output);
        text.split("\x1b[2J")
            .map(crate::tui::utils::strip_ansi)
            .filter(|frame| !frame.trim().is_empty())
            .last()
            .unwrap_or_default()
    }

    /// The last command line drawn, with escape sequences removed.
    pub fn last_prompt(&self) -> String {
        let text = String::from_utf8_lossy(&self.output);
        text.rsplit("\x1b[2K")
            .next()
            .map(crate::tui::utils::strip_ansi)
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Write for ScriptedTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl Terminal for ScriptedTerminal {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn read_key(&mut self) -> io::Result<Key> {
        Ok(self.keys.pop_front().unwrap_or(Key::Interrupt))
    }
}
