//! Projects and the board view derived from them.
//!
//! A project owns an ordered list of tasks and the counter used to hand out
//! task ids. The `BoardView` is never stored: it is rebuilt from the project
//! every time the board is drawn.

use serde::{Deserialize, Serialize};

use crate::fields::Status;
use crate::task::{Task, TaskSummary};

/// A kanban project with its tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub next_task_id: u64,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Task summaries grouped into the three board columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    pub todo: Vec<TaskSummary>,
    pub doing: Vec<TaskSummary>,
    pub done: Vec<TaskSummary>,
}

impl Project {
    pub fn new(id: u64, title: &str) -> Self {
        Project {
            id,
            title: title.to_string(),
            next_task_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Get a task by ID.
    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a task by ID.
    pub fn task_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Tasks with the given status, in stored order.
    pub fn tasks_with_status(&self, status: Status) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn backlog_ids(&self) -> Vec<u64> {
        self.tasks_with_status(Status::Backlog)
            .into_iter()
            .map(|t| t.id)
            .collect()
    }

    pub fn board_view(&self) -> BoardView {
        let column = |status| {
            self.tasks_with_status(status)
                .into_iter()
                .map(Task::summary)
                .collect::<Vec<_>>()
        };
        BoardView {
            todo: column(Status::Todo),
            doing: column(Status::Doing),
            done: column(Status::Done),
        }
    }

    /// Raise the id counter above every stored task id.
    pub fn repair_next_task_id(&mut self) {
        let floor = self.tasks.iter().map(|t| t.id.saturating_add(1)).max().unwrap_or(0);
        self.next_task_id = self.next_task_id.max(floor);
    }
}
