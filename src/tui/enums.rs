//! Enumerations for TUI state management.

use std::fmt;

use crate::task::Task;

/// Whether the task editor creates a new task or rewrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EditorMode::Create => "CREATE",
            EditorMode::Edit => "EDIT",
        })
    }
}

/// The view the interaction loop is currently driving.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    MainMenu,
    ProjectList,
    ProjectCreate,
    Board { project: String },
    Backlog { project: String },
    TaskEditor {
        project: String,
        mode: EditorMode,
        /// Working copy; written back only when the editor is confirmed.
        draft: Box<Task>,
    },
}

impl View {
    /// The project a view is bound to, if any.
    pub fn project(&self) -> Option<&str> {
        match self {
            View::Board { project } | View::Backlog { project } | View::TaskEditor { project, .. } => {
                Some(project)
            }
            View::MainMenu | View::ProjectList | View::ProjectCreate => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::MainMenu => "main menu",
            View::ProjectList => "project list",
            View::ProjectCreate => "project create",
            View::Board { .. } => "board",
            View::Backlog { .. } => "backlog",
            View::TaskEditor { .. } => "task editor",
        }
    }
}
