//! Task data structure and related functionality.
//!
//! A `Task` is one card on a project's board. Its JSON shape matches the
//! settings file (camelCase keys), and every descriptive field is optional
//! on disk so older or hand-edited files still load.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// A work item owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: TaskType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub acceptance_criteria: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub effort: u32,
    #[serde(default, with = "optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "optional_date")]
    pub complete_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub fix_version: String,
    #[serde(default)]
    pub linked_tasks: Vec<LinkedTask>,
    #[serde(default)]
    pub checklist_items: Vec<ChecklistItem>,
}

/// A reference from one task to another in the same project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedTask {
    pub id: u64,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reason: String,
}

/// A single checklist entry inside a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

/// The `(id, title)` pair the board and backlog draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    pub id: u64,
    pub title: String,
}

impl Task {
    /// A fresh backlog task with every descriptive field at its default.
    /// The id is a placeholder; the store assigns the real one on creation.
    pub fn new(title: &str) -> Self {
        Task {
            id: 0,
            title: title.to_string(),
            kind: TaskType::default(),
            description: String::new(),
            acceptance_criteria: String::new(),
            priority: Priority::default(),
            status: Status::Backlog,
            effort: 0,
            start_date: None,
            complete_date: None,
            tags: Vec::new(),
            fix_version: String::new(),
            linked_tasks: Vec::new(),
            checklist_items: Vec::new(),
        }
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            id: self.id,
            title: self.title.clone(),
        }
    }

    /// Display label used on every list: `[id] title`.
    pub fn label(&self) -> String {
        self.summary().label()
    }
}

impl TaskSummary {
    pub fn label(&self) -> String {
        format!("[{}] {}", self.id, self.title)
    }
}

/// Dates are stored as `YYYY-MM-DD`; an empty string or `null` means unset.
mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_settings_task() {
        let json = r#"{
            "id": 0,
            "title": "Task Title 1",
            "type": "story",
            "description": "Task description 1",
            "acceptanceCriteria": "Acceptance Criteria for Task 1",
            "priority": "medium",
            "status": "todo",
            "effort": 3,
            "startDate": "2025-04-10",
            "completeDate": null,
            "tags": ["tag1"],
            "fixVersion": "v1.0.0",
            "linkedTasks": [{"id": 0, "type": "task", "reason": "blocked by"}],
            "checklistItems": [{"name": "Checklist Item Name 1", "completed": false}]
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.effort, 3);
        assert_eq!(task.start_date, NaiveDate::from_ymd_opt(2025, 4, 10));
        assert_eq!(task.complete_date, None);
        assert_eq!(task.linked_tasks[0].reason, "blocked by");
        assert_eq!(task.label(), "[0] Task Title 1");
    }

    #[test]
    fn test_minimal_task_defaults() {
        let task: Task = serde_json::from_str(r#"{"id": 4, "title": "t", "startDate": ""}"#).unwrap();
        assert_eq!(task.status, Status::Backlog);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.kind, TaskType::Story);
        assert_eq!(task.start_date, None);
        assert!(task.tags.is_empty());
    }

    #[test]
    fn test_serialises_camel_case() {
        let mut task = Task::new("x");
        task.start_date = NaiveDate::from_ymd_opt(2024, 1, 2);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["startDate"], "2024-01-02");
        assert_eq!(value["completeDate"], serde_json::Value::Null);
        assert_eq!(value["type"], "story");
        assert!(value.get("acceptanceCriteria").is_some());
    }
}
