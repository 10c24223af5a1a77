//! Main menu, project list and project creation views.

use std::io;

use log::info;

use crate::tui::app::App;
use crate::tui::colors::{BRIGHT_GREEN, GREEN, GREY, ORANGE};
use crate::tui::enums::View;
use crate::tui::input::EditOutcome;
use crate::tui::keys::{Key, Terminal};
use crate::tui::utils::{paint, paint_bold, printable, visible_width};

const MENU_ITEMS: usize = 5;

fn banner() -> Vec<String> {
    vec![
        paint("kb - Kanban Command Line Tool", ORANGE),
        String::new(),
        format!("version {}", env!("CARGO_PKG_VERSION")),
        String::new(),
        paint("←↑↓→ Navigate, ENTER to Confirm, Type for New Board, Ctrl+C to Exit", GREY),
        String::new(),
    ]
}

/// Highlighted rows get an arrow and bold bright green.
fn list_entry(text: &str, selected: bool) -> String {
    let text = printable(text);
    if selected {
        paint_bold(&format!("→ {text}"), BRIGHT_GREEN)
    } else {
        paint(&text, GREEN)
    }
}

/// Center a block of lines on a `cols` x `rows` screen, leaving the bottom
/// row to the prompt.
fn center_block(lines: Vec<String>, cols: u16, rows: u16) -> Vec<String> {
    let widest = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    let left = " ".repeat((cols as usize).saturating_sub(widest) / 2);
    let top = (rows as usize).saturating_sub(1 + lines.len()) / 2;

    let mut out = vec![String::new(); top];
    out.extend(lines.into_iter().map(|l| format!("{left}{l}")));
    out
}

impl App<'_> {
    fn menu_items(&self) -> [String; MENU_ITEMS] {
        let recent = self.store.recent_project().unwrap_or("none");
        [
            format!("Open recent project: {recent}"),
            "Open existing project".to_string(),
            "Create new project".to_string(),
            "Open Settings".to_string(),
            "Quit kb".to_string(),
        ]
    }

    pub(super) fn render_main_menu<T: Terminal>(&self, term: &mut T) -> io::Result<()> {
        let mut lines = banner();
        lines.extend(
            self.menu_items()
                .iter()
                .enumerate()
                .map(|(i, item)| list_entry(item, i == self.selected)),
        );
        let (cols, rows) = term.size();
        self.draw_screen(term, &center_block(lines, cols, rows), None)
    }

    pub(super) fn handle_main_menu_input(&mut self, key: Key) {
        match self.input.handle(key) {
            EditOutcome::Edited => {}
            EditOutcome::Forward(Key::Up) => self.step_selection(MENU_ITEMS, false),
            EditOutcome::Forward(Key::Down) => self.step_selection(MENU_ITEMS, true),
            EditOutcome::Forward(_) => {}
            EditOutcome::Submitted(text) if !text.trim().is_empty() => {
                self.go(View::ProjectCreate);
                self.input.buffer = text;
            }
            EditOutcome::Submitted(_) => self.open_menu_item(),
        }
    }

    fn open_menu_item(&mut self) {
        match self.selected {
            0 => match self.store.recent_project().map(str::to_string) {
                Some(project) => self.go(View::Board { project }),
                None => self.go(View::ProjectList),
            },
            1 => self.go(View::ProjectList),
            2 => self.go(View::ProjectCreate),
            3 => self.input.set_message("Settings interface not implemented!"),
            _ => self.should_exit = true,
        }
    }

    fn project_titles(&self) -> Vec<String> {
        self.store.projects().iter().map(|p| p.title.clone()).collect()
    }

    pub(super) fn render_project_list<T: Terminal>(&self, term: &mut T) -> io::Result<()> {
        let titles = self.project_titles();
        let mut lines = vec![
            paint_bold("Projects", ORANGE),
            paint(
                "↑↓ Navigate, ENTER to Open, BACKSPACE to Delete, ESC to go Back",
                GREY,
            ),
            String::new(),
        ];
        if titles.is_empty() {
            lines.push(paint("No projects yet. Create one from the main menu.", GREY));
        }
        lines.extend(
            titles
                .iter()
                .enumerate()
                .map(|(i, title)| list_entry(title, i == self.selected)),
        );
        self.draw_screen(term, &lines, None)
    }

    pub(super) fn handle_project_list_input(&mut self, key: Key) {
        if let Some(title) = self.pending_delete.take() {
            if key == Key::Enter {
                self.confirm_project_delete(&title);
            } else {
                self.input.set_message("");
            }
            return;
        }

        let titles = self.project_titles();
        match key {
            Key::Up => self.step_selection(titles.len(), false),
            Key::Down => self.step_selection(titles.len(), true),
            Key::Escape => self.go(View::MainMenu),
            Key::Enter => match titles.get(self.selected) {
                Some(title) => match self.store.set_recent_project(title) {
                    Ok(()) => self.go(View::Board {
                        project: title.clone(),
                    }),
                    Err(e) => self.input.set_message(e.to_string()),
                },
                None => self.input.set_message("No projects found!"),
            },
            Key::Backspace => {
                if let Some(title) = titles.get(self.selected) {
                    self.input
                        .set_message(format!("Delete project '{title}'? Press ENTER to confirm."));
                    self.pending_delete = Some(title.clone());
                }
            }
            _ => {}
        }
    }

    fn confirm_project_delete(&mut self, title: &str) {
        match self.store.delete_project(title) {
            Ok(cleared_recent) => {
                if cleared_recent {
                    info!("Cleared most-recent project '{title}'");
                }
                let remaining = self.store.projects().len();
                self.selected = self.selected.min(remaining.saturating_sub(1));
                self.input.set_message(format!("Project '{title}' deleted."));
            }
            Err(e) => self.input.set_message(e.to_string()),
        }
    }

    pub(super) fn render_project_create<T: Terminal>(&self, term: &mut T) -> io::Result<()> {
        let lines = vec![
            paint_bold("Create New Project", ORANGE),
            paint("Type a title and press ENTER. ESC to go back.", GREY),
        ];
        self.draw_screen(term, &lines, Some("TITLE"))
    }

    pub(super) fn handle_project_create_input(&mut self, key: Key) {
        match self.input.handle(key) {
            EditOutcome::Forward(Key::Escape) => self.go(View::MainMenu),
            EditOutcome::Submitted(title) => {
                let title = title.trim().to_string();
                let created = self
                    .store
                    .create_project(&title)
                    .and_then(|_| self.store.set_recent_project(&title));
                match created {
                    Ok(()) => self.go(View::Board { project: title }),
                    Err(e) => self.input.set_message(e.to_string()),
                }
            }
            EditOutcome::Edited | EditOutcome::Forward(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::store::Store;
    use crate::tui::app::App;
    use crate::tui::enums::View;
    use crate::tui::keys::{Key, ScriptedTerminal};

    fn open_store(dir: &TempDir) -> Store {
        Store::open(&dir.path().join("settings.json")).unwrap()
    }

    #[test]
    fn test_main_menu_opens_recent_project() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let mut app = App::new(&mut store);
        app.handle_main_menu_input(Key::Enter);
        assert_eq!(app.view(), &View::Board { project: "kb".into() });
    }

    #[test]
    fn test_main_menu_selection_wraps() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let mut app = App::new(&mut store);
        app.handle_main_menu_input(Key::Up);
        assert_eq!(app.selected, 4);
        app.handle_main_menu_input(Key::Down);
        assert_eq!(app.selected, 0);

        app.selected = 3;
        app.handle_main_menu_input(Key::Enter);
        assert_eq!(app.input.message, "Settings interface not implemented!");

        app.selected = 4;
        app.handle_main_menu_input(Key::Enter);
        assert!(app.should_exit);
    }

    #[test]
    fn test_typed_text_prefills_project_create() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let mut app = App::new(&mut store);
        for c in "side".chars() {
            app.handle_main_menu_input(Key::Char(c));
        }
        app.handle_main_menu_input(Key::Enter);
        assert_eq!(app.view(), &View::ProjectCreate);
        assert_eq!(app.input.buffer, "side");
    }

    #[test]
    fn test_project_create_rejects_duplicates_and_blank() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        {
            let mut app = App::new(&mut store);
            app.go(View::ProjectCreate);
            for c in "kb".chars() {
                app.handle_project_create_input(Key::Char(c));
            }
            app.handle_project_create_input(Key::Enter);
            assert_eq!(app.view(), &View::ProjectCreate);
            assert_eq!(app.input.message, "Project 'kb' already exists!");
            assert!(app.input.buffer.is_empty());

            app.handle_project_create_input(Key::Enter);
            assert_eq!(app.input.message, "Title must not be blank!");
        }
        assert_eq!(store.projects().len(), 1);
    }

    #[test]
    fn test_project_create_opens_board_and_sets_recent() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let mut term = ScriptedTerminal::new((80, 24));
        term.press(Key::Down).press(Key::Down).press(Key::Enter);
        term.type_line("Garden");
        {
            let mut app = App::new(&mut store);
            app.run(&mut term).unwrap();
            assert_eq!(app.view(), &View::Board { project: "Garden".into() });
        }
        assert_eq!(store.recent_project(), Some("Garden"));
        assert!(term.last_frame().contains("Garden"));
    }

    #[test]
    fn test_project_delete_needs_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.create_project("Other").unwrap();
        {
            let mut app = App::new(&mut store);
            app.go(View::ProjectList);

            app.handle_project_list_input(Key::Backspace);
            assert_eq!(
                app.input.message,
                "Delete project 'kb'? Press ENTER to confirm."
            );
            // Any other key cancels.
            app.handle_project_list_input(Key::Down);
            assert!(app.pending_delete.is_none());
            assert_eq!(app.selected, 0);

            app.handle_project_list_input(Key::Backspace);
            app.handle_project_list_input(Key::Enter);
            assert_eq!(app.input.message, "Project 'kb' deleted.");
        }
        assert_eq!(store.projects().len(), 1);
        assert_eq!(store.recent_project(), None);
    }

    #[test]
    fn test_project_list_open_and_escape() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.create_project("Other").unwrap();
        {
            let mut app = App::new(&mut store);
            app.go(View::ProjectList);
            app.handle_project_list_input(Key::Escape);
            assert_eq!(app.view(), &View::MainMenu);

            app.go(View::ProjectList);
            app.handle_project_list_input(Key::Down);
            app.handle_project_list_input(Key::Enter);
            assert_eq!(app.view(), &View::Board { project: "Other".into() });
        }
        assert_eq!(store.recent_project(), Some("Other"));
    }

    #[test]
    fn test_empty_project_list() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.delete_project("kb").unwrap();
        let mut app = App::new(&mut store);
        app.go(View::ProjectList);
        app.handle_project_list_input(Key::Enter);
        assert_eq!(app.input.message, "No projects found!");
    }
}
