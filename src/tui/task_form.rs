//! Task editor view for creating and editing tasks.
//!
//! Only the title is editable here; the remaining attributes are listed
//! read-only so the user can see what the task carries.

use std::io;

use chrono::NaiveDate;
use log::info;

use crate::task::Task;
use crate::tui::app::App;
use crate::tui::colors::{BRIGHT_GREEN, GREY, ORANGE};
use crate::tui::enums::{EditorMode, View};
use crate::tui::input::EditOutcome;
use crate::tui::keys::{Key, Terminal};
use crate::tui::utils::{paint, paint_bold, printable};

fn date(value: Option<NaiveDate>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

/// `(label, value)` for every attribute shown under the title.
fn attributes(task: &Task) -> Vec<(&'static str, String)> {
    vec![
        ("Type", task.kind.to_string()),
        ("Description", task.description.clone()),
        ("Acceptance Criteria", task.acceptance_criteria.clone()),
        ("Priority", task.priority.to_string()),
        ("Status", task.status.to_string()),
        ("Effort", task.effort.to_string()),
        ("Start Date", date(task.start_date)),
        ("Complete Date", date(task.complete_date)),
        ("Tags", task.tags.join(", ")),
        ("Fix Version", task.fix_version.clone()),
        ("Linked Tasks", task.linked_tasks.len().to_string()),
        ("Checklist Items", task.checklist_items.len().to_string()),
    ]
}

impl App<'_> {
    pub(super) fn render_task_editor<T: Terminal>(
        &self,
        term: &mut T,
        mode: EditorMode,
        draft: &Task,
    ) -> io::Result<()> {
        let mut lines = vec![
            paint_bold(&format!("{mode} Task"), ORANGE),
            paint("Type the title and press ENTER to save. ESC to cancel.", GREY),
            String::new(),
            paint_bold(&format!("→ Title: {}", printable(&self.input.buffer)), BRIGHT_GREEN),
        ];
        lines.extend(
            attributes(draft)
                .into_iter()
                .map(|(label, value)| paint(&format!("  {label}: {}", printable(&value)), GREY)),
        );
        self.draw_screen(term, &lines, Some("(str)"))
    }

    pub(super) fn handle_task_editor_input(
        &mut self,
        key: Key,
        project: &str,
        mode: EditorMode,
        mut draft: Task,
    ) {
        let title = match self.input.handle(key) {
            EditOutcome::Submitted(title) => title,
            EditOutcome::Forward(Key::Escape) => {
                info!("Discarded {mode} task draft");
                self.go(View::Board {
                    project: project.to_string(),
                });
                return;
            }
            EditOutcome::Edited | EditOutcome::Forward(_) => return,
        };

        draft.title = title.trim().to_string();
        let saved = match mode {
            EditorMode::Create => self.store.create_task(project, draft).map(drop),
            EditorMode::Edit => self.store.update_task(project, draft),
        };
        match saved {
            Ok(()) => self.go(View::Board {
                project: project.to_string(),
            }),
            Err(e) => self.input.set_message(e.to_string()),
        }
    }
}
