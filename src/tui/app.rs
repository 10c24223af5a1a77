//! The interaction loop shared by every view.
//!
//! `App` holds the current [`View`] plus the per-view input state and runs
//! one cycle per keypress: draw, block for a key, then either edit the
//! command line or hand the key to the view's handler. View handlers live in
//! `menu`, `board_view` and `task_form`; they mutate data only through the
//! [`Store`].

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use log::{info, warn};

use crate::store::Store;
use crate::tui::board::{write_frame, BoardStyle};
use crate::tui::enums::View;
use crate::tui::input::{text_char, LineEditor};
use crate::tui::keys::{Key, Terminal};

/// Main application state for the terminal user interface.
pub struct App<'a> {
    pub(super) store: &'a mut Store,
    pub(super) style: BoardStyle,
    pub(super) view: View,
    pub(super) input: LineEditor,
    /// Highlighted row in list views, wrapped modulo the list length.
    pub(super) selected: usize,
    /// Project awaiting delete confirmation in the project list.
    pub(super) pending_delete: Option<String>,
    pub(super) should_exit: bool,
}

impl<'a> App<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        App {
            store,
            style: BoardStyle::default(),
            view: View::MainMenu,
            input: LineEditor::new(),
            selected: 0,
            pending_delete: None,
            should_exit: false,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Switch views, dropping all per-view input state.
    pub(super) fn go(&mut self, view: View) {
        info!("View: {} -> {}", self.view.name(), view.name());
        self.input = match &view {
            View::TaskEditor { draft, .. } => {
                let mut editor = LineEditor::with_charset(text_char);
                editor.buffer = draft.title.clone();
                editor
            }
            View::ProjectCreate => LineEditor::with_charset(text_char),
            _ => LineEditor::new(),
        };
        self.selected = 0;
        self.pending_delete = None;
        self.view = view;
    }

    /// Move the highlight one step, wrapping around a list of `len` rows.
    pub(super) fn step_selection(&mut self, len: usize, forward: bool) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }

    /// Leave project-bound views whose project no longer exists.
    fn check_view(&mut self) {
        if let Some(project) = self.view.project() {
            if self.store.project(project).is_err() {
                warn!("Project '{project}' disappeared; returning to main menu");
                self.go(View::MainMenu);
                self.input.set_message("Project not found.");
            }
        }
    }

    fn render<T: Terminal>(&self, term: &mut T) -> io::Result<()> {
        match self.view.clone() {
            View::MainMenu => self.render_main_menu(term),
            View::ProjectList => self.render_project_list(term),
            View::ProjectCreate => self.render_project_create(term),
            View::Board { project } => self.render_board(term, &project),
            View::Backlog { project } => self.render_backlog(term, &project),
            View::TaskEditor { mode, draft, .. } => self.render_task_editor(term, mode, &draft),
        }
    }

    fn handle_key(&mut self, key: Key) {
        match self.view.clone() {
            View::MainMenu => self.handle_main_menu_input(key),
            View::ProjectList => self.handle_project_list_input(key),
            View::ProjectCreate => self.handle_project_create_input(key),
            View::Board { project } => self.handle_board_input(key, &project),
            View::Backlog { project } => self.handle_backlog_input(key, &project),
            View::TaskEditor { project, mode, draft } => {
                self.handle_task_editor_input(key, &project, mode, *draft)
            }
        }
    }

    /// Draw a plain (non-board) frame followed by the command line.
    pub(super) fn draw_screen<T: Terminal>(
        &self,
        term: &mut T,
        lines: &[String],
        mode: Option<&str>,
    ) -> io::Result<()> {
        let (cols, rows) = term.size();
        write_frame(term, lines, true)?;
        self.input.render(term, mode, cols, rows)
    }

    /// Main event loop for the TUI application.
    ///
    /// Returns once the user quits; the screen is cleared on the way out.
    pub fn run<T: Terminal>(&mut self, term: &mut T) -> io::Result<()> {
        loop {
            self.check_view();
            self.render(term)?;

            match term.read_key()? {
                Key::Interrupt => break,
                Key::Resize => continue,
                key => self.handle_key(key),
            }

            if self.should_exit {
                break;
            }
        }
        info!("Exiting from {}", self.view().name());
        clear_screen(term)
    }
}

/// Clear the whole screen and home the cursor.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}
