//! Enumerations and field types for kanban tasks.
//!
//! This module defines the structured values a task can carry: its workflow
//! status, its type and its priority. All of them serialise to the lowercase
//! strings used in the settings file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Workflow status of a task.
///
/// `Backlog → Todo → Doing → Done` is the forward sequence used by `move`
/// without a destination. `Archived` sits outside that sequence and is only
/// reached through the completion sweep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Backlog,
    Todo,
    Doing,
    Done,
    Archived,
}

impl Status {
    /// The columns a task can be moved into, in flow order.
    pub const FLOW: [Status; 4] = [Status::Backlog, Status::Todo, Status::Doing, Status::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Backlog => "backlog",
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Done => "done",
            Status::Archived => "archived",
        }
    }

    /// Next column in the flow, `None` at the end of the flow or for
    /// statuses outside it.
    pub fn next(self) -> Option<Status> {
        let idx = Self::FLOW.iter().position(|&s| s == self)?;
        Self::FLOW.get(idx + 1).copied()
    }

    /// Whether the status is a valid `move` destination.
    pub fn in_flow(self) -> bool {
        Self::FLOW.contains(&self)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backlog" => Ok(Status::Backlog),
            "todo" => Ok(Status::Todo),
            "doing" => Ok(Status::Doing),
            "done" => Ok(Status::Done),
            "archived" => Ok(Status::Archived),
            other => Err(other.to_string()),
        }
    }
}

/// Kind of work a task represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Story,
    Bug,
    Feature,
    Spike,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskType::Story => "story",
            TaskType::Bug => "bug",
            TaskType::Feature => "feature",
            TaskType::Spike => "spike",
        })
    }
}

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Priority {
    #[serde(rename = "very low")]
    VeryLow,
    #[serde(rename = "low")]
    Low,
    #[default]
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "very high")]
    VeryHigh,
    #[serde(rename = "critical")]
    Critical,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::VeryLow => "very low",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::VeryHigh => "very high",
            Priority::Critical => "critical",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flow() {
        assert_eq!(Status::Backlog.next(), Some(Status::Todo));
        assert_eq!(Status::Todo.next(), Some(Status::Doing));
        assert_eq!(Status::Doing.next(), Some(Status::Done));
        assert_eq!(Status::Done.next(), None);
        assert_eq!(Status::Archived.next(), None);
        assert!(!Status::Archived.in_flow());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("doing".parse::<Status>(), Ok(Status::Doing));
        assert_eq!(" TODO ".parse::<Status>(), Ok(Status::Todo));
        assert_eq!("later".parse::<Status>(), Err("later".to_string()));
    }

    #[test]
    fn test_priority_serde_names() {
        let json = serde_json::to_string(&Priority::VeryHigh).unwrap();
        assert_eq!(json, "\"very high\"");
        let p: Priority = serde_json::from_str("\"very low\"").unwrap();
        assert_eq!(p, Priority::VeryLow);
    }
}
