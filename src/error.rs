//! Error type for repository operations.
//!
//! The `Display` text of each variant is what the interaction loops show on
//! the status line, so the wording is user facing.

use std::path::PathBuf;

use crate::fields::Status;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Project not found.")]
    ProjectNotFound,
    #[error("Task with id {0} not found.")]
    TaskNotFound(u64),
    #[error("Task is already in the last column '{0}'.")]
    LastColumn(Status),
    #[error("Invalid current status '{0}' for task.")]
    NoNextColumn(Status),
    #[error("Invalid destination column '{0}'. Valid options: [backlog, todo, doing, done]")]
    InvalidDestination(String),
    #[error("Project '{0}' already exists!")]
    DuplicateProject(String),
    #[error("Title must not be blank!")]
    BlankTitle,
    #[error("could not access settings at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
