//! The board and backlog views.
//!
//! Both read their task lists from the store on every render, so what is on
//! screen always matches the last persisted state.

use std::io;

use log::debug;

use crate::fields::Status;
use crate::task::Task;
use crate::tui::app::App;
use crate::tui::board::{board_lines, write_frame};
use crate::tui::colors::{BRIGHT_GREEN, GREEN, GREY, ORANGE};
use crate::tui::command::{self, Command};
use crate::tui::enums::{EditorMode, View};
use crate::tui::geometry::BoardGeometry;
use crate::tui::input::EditOutcome;
use crate::tui::keys::{Key, Terminal};
use crate::tui::utils::{paint, paint_bold, printable};

impl App<'_> {
    pub(super) fn render_board<T: Terminal>(&self, term: &mut T, project: &str) -> io::Result<()> {
        let (cols, rows) = term.size();
        let geometry = BoardGeometry::compute(cols, rows, self.style.min_col_width);
        let view = self.store.board_view(project).unwrap_or_default();
        let lines = board_lines(&view, project, &geometry, &self.style);
        write_frame(term, &lines, self.style.clear_screen)?;
        self.input.render(term, Some("CMD"), cols, rows)
    }

    pub(super) fn handle_board_input(&mut self, key: Key, project: &str) {
        let line = match self.input.handle(key) {
            EditOutcome::Submitted(line) => line,
            EditOutcome::Edited | EditOutcome::Forward(_) => return,
        };
        match command::parse(&line) {
            Ok(Some(cmd)) => {
                debug!("Board command: {cmd:?}");
                self.run_board_command(cmd, project);
            }
            Ok(None) => {}
            Err(e) => self.input.set_message(e.to_string()),
        }
    }

    fn run_board_command(&mut self, cmd: Command, project: &str) {
        let project_view = || project.to_string();
        let result = match cmd {
            Command::Move { id, to } => self.store.move_task(project, id, to.as_deref()).map(drop),
            Command::Delete { id } => self.store.delete_task(project, id),
            Command::Edit { id } => self.store.task(project, id).cloned().map(|task| {
                self.go(View::TaskEditor {
                    project: project_view(),
                    mode: EditorMode::Edit,
                    draft: Box::new(task),
                })
            }),
            Command::Create => {
                self.go(View::TaskEditor {
                    project: project_view(),
                    mode: EditorMode::Create,
                    draft: Box::new(Task::new("")),
                });
                Ok(())
            }
            Command::Backlog => self.store.backlog_ids(project).map(|ids| {
                if ids.is_empty() {
                    self.input.set_message("There are no backlog tasks!");
                } else {
                    self.go(View::Backlog {
                        project: project_view(),
                    });
                }
            }),
            Command::Archive => self
                .store
                .tasks_with_status(project, Status::Archived)
                .map(|archived| archived.is_empty())
                .map(|empty| {
                    self.input.set_message(if empty {
                        "There are no archived tasks!"
                    } else {
                        "Archive interface not implemented!"
                    })
                }),
            Command::Complete => self.store.archive_completed(project).map(|swept| {
                self.input
                    .set_message(format!("Archived {swept} completed task(s)."))
            }),
            Command::Home => {
                self.go(View::MainMenu);
                Ok(())
            }
            Command::Quit => {
                self.should_exit = true;
                Ok(())
            }
            Command::View { .. } => {
                self.input.set_message("View interface not implemented!");
                Ok(())
            }
            Command::Unknown { input, .. } => {
                self.input
                    .set_message(format!("Invalid command input: {input}"));
                Ok(())
            }
        };
        if let Err(e) = result {
            self.input.set_message(e.to_string());
        }
    }

    pub(super) fn render_backlog<T: Terminal>(&self, term: &mut T, project: &str) -> io::Result<()> {
        let tasks = self
            .store
            .tasks_with_status(project, Status::Backlog)
            .unwrap_or_default();
        let selected = self.selected.min(tasks.len().saturating_sub(1));

        let mut lines = vec![
            paint_bold(&format!("{} Backlog Tasks", printable(project)), ORANGE),
            paint("Use the `move` command to move tasks to the board.", GREY),
            String::new(),
        ];
        lines.extend(tasks.iter().enumerate().map(|(i, task)| {
            let label = task.label();
            let label = printable(&label);
            if i == selected {
                paint_bold(&format!("→ {label}"), BRIGHT_GREEN)
            } else {
                paint(&label, GREEN)
            }
        }));
        self.draw_screen(term, &lines, Some("CMD"))
    }

    pub(super) fn handle_backlog_input(&mut self, key: Key, project: &str) {
        let count = self.store.backlog_ids(project).map(|ids| ids.len()).unwrap_or(0);
        let line = match self.input.handle(key) {
            EditOutcome::Submitted(line) => line,
            EditOutcome::Forward(Key::Up) => {
                self.input.set_message("");
                self.step_selection(count, false);
                return;
            }
            EditOutcome::Forward(Key::Down) => {
                self.input.set_message("");
                self.step_selection(count, true);
                return;
            }
            EditOutcome::Forward(Key::Left | Key::Right) => {
                self.input.set_message("Pagination not implemented!");
                return;
            }
            EditOutcome::Forward(Key::Escape) => {
                self.go(View::Board {
                    project: project.to_string(),
                });
                return;
            }
            EditOutcome::Edited | EditOutcome::Forward(_) => return,
        };

        match command::parse(&line) {
            Ok(None) => self.input.set_message("View interface not implemented!"),
            Ok(Some(Command::Move { id, to })) => {
                match self.store.move_task(project, id, to.as_deref()) {
                    Ok(_) => self.after_backlog_move(project),
                    Err(e) => self.input.set_message(e.to_string()),
                }
            }
            Ok(Some(_)) => {
                let verb = line.split_whitespace().next().unwrap_or_default();
                self.input.set_message(format!("Invalid command: {verb}!"));
            }
            Err(e) => self.input.set_message(e.to_string()),
        }
    }

    /// Re-read the backlog, keep the highlight in range and fall back to the
    /// board once nothing is left.
    fn after_backlog_move(&mut self, project: &str) {
        let remaining = self.store.backlog_ids(project).map(|ids| ids.len()).unwrap_or(0);
        if remaining == 0 {
            self.go(View::Board {
                project: project.to_string(),
            });
        } else {
            self.selected = self.selected.min(remaining - 1);
            self.input.set_message("");
        }
    }
}
